//! BookBridge — HTTP API surface.
//!
//! Exposes the dish catalog, the booking queue, the cart ledger, and the
//! checkout submission as JSON routes over a shared application state.

pub mod error;
pub mod routes;
pub mod state;

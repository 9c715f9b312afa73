//! BookBridge — queue-to-cart materialization.
//!
//! Drives pending bookings into the cart ledger on the destination
//! surface: once at readiness, and again whenever the surface regains
//! visibility. Every pass converges to the same ledger state as a single
//! successful pass.

mod materializer;
mod readiness;

pub use materializer::CartMaterializer;
pub use readiness::{Readiness, ReadinessSignal, readiness};

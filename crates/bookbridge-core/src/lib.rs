//! BookBridge Core — shared domain abstractions.
//!
//! This crate defines the fundamental types that every other crate depends
//! on: the error taxonomy, the clock abstraction, currency-tagged amounts,
//! product identifiers, and the persisted booking queue state together with
//! the store contract. It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod money;
pub mod product;
pub mod store;

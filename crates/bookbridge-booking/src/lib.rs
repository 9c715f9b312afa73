//! BookBridge — booking queue bounded context.
//!
//! Owns the durable queue of pending bookings: deduplicated adds, quantity
//! updates, and the at-most-once materialization protocol that turns the
//! queue into cart ledger lines.

pub mod application;
pub mod domain;

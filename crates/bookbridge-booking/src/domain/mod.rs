//! Domain model for the booking queue.

pub mod queue;

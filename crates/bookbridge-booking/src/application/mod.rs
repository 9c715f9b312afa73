//! Application services for the booking queue.

pub mod service;

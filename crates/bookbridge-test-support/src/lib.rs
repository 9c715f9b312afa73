//! Shared test mocks and utilities for BookBridge.

mod clock;
mod store;

pub use clock::FixedClock;
pub use store::{FailingStateStore, InMemoryStateStore};

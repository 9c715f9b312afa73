//! BookBridge — durable booking queue stores.
//!
//! Implementations of the `StateStore` contract: a JSON file store (the
//! durable layer standing in for browser local storage) and a read-through
//! cache wrapper.

mod cached;
mod json_file;

pub use cached::CachedStore;
pub use json_file::JsonFileStore;

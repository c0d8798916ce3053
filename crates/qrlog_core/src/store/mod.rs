//! Persistent store adapter: durable string-only key/value storage.
//!
//! # Responsibility
//! - Define the `KeyValueStore` contract used by the event log and counter.
//! - Provide a SQLite-backed implementation and an in-memory one.
//!
//! # Invariants
//! - Values are opaque strings; encoding is the caller's concern.
//! - `set` replaces any previous value for the key.

pub mod kv_store;
pub mod memory_store;

pub use kv_store::{KeyValueStore, SqliteKeyValueStore, StoreError, StoreResult};
pub use memory_store::MemoryStore;

//! Scan result classification and dispatch.
//!
//! # Responsibility
//! - Map decoded text onto an `ActionCategory` (pure).
//! - Perform the navigation implied by a category through injected actions.
//!
//! # Invariants
//! - Classification has no I/O and is deterministic.
//! - Dispatch never navigates for `PlainText`.

pub mod classifier;
pub mod dispatcher;

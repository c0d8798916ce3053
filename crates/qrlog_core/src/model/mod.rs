//! Domain model for the generate/scan history.
//!
//! # Responsibility
//! - Define the persisted history record and its JSON wire shape.
//! - Define classification categories and scan failure types.
//!
//! # Invariants
//! - `HistoryEntry::value` is stored verbatim; no trimming or escaping.
//! - `ActionCategory` is derived data and never persisted.

pub mod action;
pub mod entry;
pub mod scan;

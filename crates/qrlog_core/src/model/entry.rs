//! History entry model.
//!
//! # Responsibility
//! - Define the record appended for every generate/scan event.
//! - Own the JSON wire shape shared with previously persisted logs.
//!
//! # Invariants
//! - `timestamp` is epoch milliseconds and doubles as the entry identity;
//!   equal stamps are told apart only by sequence position.
//! - `favorite` defaults to `false`, including when absent on the wire.

use serde::{Deserialize, Serialize};

/// How a history entry was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Text the user encoded into a code.
    Generated,
    /// Text decoded from a camera frame.
    Scanned,
}

impl EntryKind {
    /// Stable lowercase label, identical to the wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Scanned => "scanned",
        }
    }
}

/// One record of a generate or scan event.
///
/// Wire shape: `{"type": "...", "value": "...", "date": <ms>, "favorite": <bool>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Arbitrary text, possibly empty.
    pub value: String,
    /// Unix epoch milliseconds.
    #[serde(rename = "date")]
    pub timestamp: i64,
    #[serde(default)]
    pub favorite: bool,
}

impl HistoryEntry {
    /// Creates a non-favorite entry.
    pub fn new(kind: EntryKind, value: impl Into<String>, timestamp: i64) -> Self {
        Self {
            kind,
            value: value.into(),
            timestamp,
            favorite: false,
        }
    }

    pub fn generated(value: impl Into<String>, timestamp: i64) -> Self {
        Self::new(EntryKind::Generated, value, timestamp)
    }

    pub fn scanned(value: impl Into<String>, timestamp: i64) -> Self {
        Self::new(EntryKind::Scanned, value, timestamp)
    }

    /// Flips the favorite flag and returns the new value.
    pub fn toggle_favorite(&mut self) -> bool {
        self.favorite = !self.favorite;
        self.favorite
    }
}

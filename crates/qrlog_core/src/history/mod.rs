//! Durable event log and scan counter.
//!
//! # Responsibility
//! - Hydrate history and the scan tally once from the key/value store.
//! - Re-persist state synchronously inside every mutating method.
//!
//! # Invariants
//! - Read failures fall back to empty/zero state and are logged, never raised.
//! - Write failures are logged once and never retried; memory stays authoritative.
//!
//! # See also
//! - `store::KeyValueStore`

use crate::store::StoreError;
use serde_json::error::Category;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::{IntErrorKind, ParseIntError};

pub mod event_log;
pub mod scan_counter;

/// Store key holding the JSON-serialized history sequence.
pub const HISTORY_KEY: &str = "qrHistory";
/// Store key holding the decimal scan tally.
pub const SCAN_COUNT_KEY: &str = "scanCount";

/// Persistence failure recovered inside the history layer.
#[derive(Debug)]
pub enum PersistenceError {
    /// The backend could not be read.
    ReadFailed {
        key: &'static str,
        source: StoreError,
    },
    /// The stored value exists but does not parse.
    ReadCorrupt {
        key: &'static str,
        value_len: usize,
        reason: CorruptValue,
    },
    /// In-memory state could not be encoded.
    Serialize(serde_json::Error),
    /// The backend rejected the write.
    WriteFailed {
        key: &'static str,
        source: StoreError,
    },
}

impl PersistenceError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReadFailed { .. } => "store_read_failed",
            Self::ReadCorrupt { .. } => "store_read_corrupt",
            Self::Serialize(_) => "store_serialize_failed",
            Self::WriteFailed { .. } => "store_write_failed",
        }
    }
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadFailed { key, source } => write!(f, "failed to read `{key}`: {source}"),
            Self::ReadCorrupt {
                key,
                value_len,
                reason,
            } => write!(
                f,
                "stored value for `{key}` is corrupt: value_len={value_len} {reason}"
            ),
            Self::Serialize(err) => write!(f, "failed to serialize history: {err}"),
            Self::WriteFailed { key, source } => write!(f, "failed to write `{key}`: {source}"),
        }
    }
}

/// Why a stored value was rejected.
///
/// Metadata only: never carries the stored text, which may be user history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptValue {
    /// JSON that failed to parse or did not match the entry shape.
    Json {
        category: &'static str,
        line: usize,
        column: usize,
    },
    /// Text that is not a non-negative decimal integer.
    NotDecimal { kind: &'static str },
}

impl CorruptValue {
    pub(crate) fn from_json(err: &serde_json::Error) -> Self {
        let category = match err.classify() {
            Category::Io => "io",
            Category::Syntax => "syntax",
            Category::Data => "data",
            Category::Eof => "eof",
        };
        Self::Json {
            category,
            line: err.line(),
            column: err.column(),
        }
    }

    pub(crate) fn from_int(err: &ParseIntError) -> Self {
        let kind = match err.kind() {
            IntErrorKind::Empty => "empty",
            IntErrorKind::InvalidDigit => "invalid_digit",
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => "overflow",
            _ => "other",
        };
        Self::NotDecimal { kind }
    }
}

impl Display for CorruptValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json {
                category,
                line,
                column,
            } => write!(f, "json_error={category} line={line} column={column}"),
            Self::NotDecimal { kind } => write!(f, "decimal_error={kind}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadFailed { source, .. } | Self::WriteFailed { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::ReadCorrupt { .. } => None,
        }
    }
}

//! Persisted tally of successful scans.
//!
//! # Invariants
//! - The count only ever grows, by exactly one per `increment`.
//! - Stored as decimal text under `SCAN_COUNT_KEY`.
//! - Absent or unparseable stored values hydrate as zero.

use super::{CorruptValue, PersistenceError, SCAN_COUNT_KEY};
use crate::store::KeyValueStore;
use log::{error, info, warn};

pub struct ScanCounter<'s, S: KeyValueStore> {
    store: &'s S,
    count: u64,
}

impl<'s, S: KeyValueStore> ScanCounter<'s, S> {
    /// Loads the persisted tally, defaulting to zero.
    pub fn hydrate(store: &'s S) -> Self {
        let count = match load_count(store) {
            Ok(count) => {
                info!("event=counter_hydrate module=history status=ok count={count}");
                count
            }
            Err(err) => {
                warn!(
                    "event=counter_hydrate module=history status=fallback error_code={} error={}",
                    err.code(),
                    err
                );
                0
            }
        };

        Self { store, count }
    }

    /// Adds one scan, persists the new tally and returns it.
    pub fn increment(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        if let Err(source) = self.store.set(SCAN_COUNT_KEY, &self.count.to_string()) {
            let err = PersistenceError::WriteFailed {
                key: SCAN_COUNT_KEY,
                source,
            };
            error!(
                "event=counter_persist module=history status=error count={} error_code={} error={}",
                self.count,
                err.code(),
                err
            );
        }
        self.count
    }

    pub fn current(&self) -> u64 {
        self.count
    }
}

fn load_count<S: KeyValueStore>(store: &S) -> Result<u64, PersistenceError> {
    let raw = store
        .get(SCAN_COUNT_KEY)
        .map_err(|source| PersistenceError::ReadFailed {
            key: SCAN_COUNT_KEY,
            source,
        })?;

    match raw {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse::<u64>()
                .map_err(|err| PersistenceError::ReadCorrupt {
                    key: SCAN_COUNT_KEY,
                    value_len: raw.len(),
                    reason: CorruptValue::from_int(&err),
                })
        }
        _ => Ok(0),
    }
}

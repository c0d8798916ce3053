//! Ordered, persisted history of generate/scan events.
//!
//! # Responsibility
//! - Keep entries in insertion (chronological) order.
//! - Mirror the full sequence to the store after every mutation.
//!
//! # Invariants
//! - Entries are never reordered or removed; display order is a view.
//! - Indices passed to `toggle_favorite` are insertion-order indices.
//! - Corrupt stored history hydrates as an empty log.

use super::{CorruptValue, PersistenceError, HISTORY_KEY};
use crate::model::entry::HistoryEntry;
use crate::store::KeyValueStore;
use log::{debug, error, info, warn};

/// Append-only history log bound to a key/value store.
pub struct EventLog<'s, S: KeyValueStore> {
    store: &'s S,
    entries: Vec<HistoryEntry>,
}

impl<'s, S: KeyValueStore> EventLog<'s, S> {
    /// Loads the persisted sequence, failing open to an empty log.
    ///
    /// # Side effects
    /// - Reads `HISTORY_KEY` once.
    /// - Emits a `history_hydrate` event; `status=fallback` on read/parse failure.
    pub fn hydrate(store: &'s S) -> Self {
        let entries = match load_entries(store) {
            Ok(entries) => {
                info!(
                    "event=history_hydrate module=history status=ok entries={}",
                    entries.len()
                );
                entries
            }
            Err(err) => {
                warn!(
                    "event=history_hydrate module=history status=fallback error_code={} error={}",
                    err.code(),
                    err
                );
                Vec::new()
            }
        };

        Self { store, entries }
    }

    /// Appends `entry` at the end, persists the full sequence and returns
    /// the stored entry.
    pub fn append(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        debug!(
            "event=history_append module=history kind={} value_len={} timestamp={}",
            entry.kind.as_str(),
            entry.value.len(),
            entry.timestamp
        );
        let index = self.entries.len();
        self.entries.push(entry);
        self.persist("append");
        &self.entries[index]
    }

    /// Flips the favorite flag of the entry at insertion-order `index`.
    ///
    /// Returns the new flag value and persists the full sequence.
    ///
    /// # Panics
    /// Panics when `index` is out of range. Callers derive indices from the
    /// live sequence, so an out-of-range value is a programming error.
    pub fn toggle_favorite(&mut self, index: usize) -> bool {
        let len = self.entries.len();
        let Some(entry) = self.entries.get_mut(index) else {
            panic!("favorite index {index} out of range for history of length {len}");
        };
        let favorite = entry.toggle_favorite();
        self.persist("toggle_favorite");
        favorite
    }

    /// Full sequence in insertion order.
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Reverse-chronological view paired with insertion-order indices.
    ///
    /// The index is what `toggle_favorite` expects.
    pub fn newest_first(&self) -> impl Iterator<Item = (usize, &HistoryEntry)> + '_ {
        self.entries.iter().enumerate().rev()
    }

    /// Favorite entries in insertion order, with their indices.
    pub fn favorites(&self) -> impl Iterator<Item = (usize, &HistoryEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.favorite)
    }

    fn persist(&self, operation: &'static str) {
        if let Err(err) = self.try_persist() {
            error!(
                "event=history_persist module=history status=error op={operation} entries={} error_code={} error={}",
                self.entries.len(),
                err.code(),
                err
            );
        }
    }

    fn try_persist(&self) -> Result<(), PersistenceError> {
        let payload = serde_json::to_string(&self.entries).map_err(PersistenceError::Serialize)?;
        self.store
            .set(HISTORY_KEY, &payload)
            .map_err(|source| PersistenceError::WriteFailed {
                key: HISTORY_KEY,
                source,
            })
    }
}

fn load_entries<S: KeyValueStore>(store: &S) -> Result<Vec<HistoryEntry>, PersistenceError> {
    let raw = store
        .get(HISTORY_KEY)
        .map_err(|source| PersistenceError::ReadFailed {
            key: HISTORY_KEY,
            source,
        })?;

    match raw {
        Some(raw) if !raw.trim().is_empty() => {
            serde_json::from_str(&raw).map_err(|err| PersistenceError::ReadCorrupt {
                key: HISTORY_KEY,
                value_len: raw.len(),
                reason: CorruptValue::from_json(&err),
            })
        }
        _ => Ok(Vec::new()),
    }
}

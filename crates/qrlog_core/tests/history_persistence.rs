use qrlog_core::db::{open_db, open_db_in_memory};
use qrlog_core::{
    EventLog, HistoryEntry, KeyValueStore, MemoryStore, ScanCounter, SqliteKeyValueStore,
    StoreError, StoreResult, HISTORY_KEY, SCAN_COUNT_KEY,
};
use std::cell::Cell;

/// Store whose reads succeed but whose writes can be switched off.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: Cell<bool>,
    fail_reads: Cell<bool>,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(StoreError::Backend("read refused".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(StoreError::Backend("disk full".to_string()));
        }
        self.inner.set(key, value)
    }
}

fn sample_entries() -> Vec<HistoryEntry> {
    let mut favorite = HistoryEntry::scanned("https://example.com", 1_700_000_000_500);
    favorite.favorite = true;
    vec![
        HistoryEntry::generated("", 1_700_000_000_000),
        HistoryEntry::generated(r#"Hello, "World""#, 1_700_000_000_000),
        favorite,
        HistoryEntry::scanned("line one\nline two\t\u{1F600}", 1_700_000_001_000),
    ]
}

#[test]
fn sqlite_round_trip_reproduces_equal_sequence() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    let mut log = EventLog::hydrate(&store);
    for entry in sample_entries() {
        log.append(entry);
    }
    log.toggle_favorite(0);

    let rehydrated = EventLog::hydrate(&store);
    assert_eq!(rehydrated.all(), log.all());
    assert!(rehydrated.all()[0].favorite);
    assert_eq!(rehydrated.all()[1].value, r#"Hello, "World""#);
}

#[test]
fn history_and_counter_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qrlog.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteKeyValueStore::new(&conn);
        let mut log = EventLog::hydrate(&store);
        let mut counter = ScanCounter::hydrate(&store);
        log.append(HistoryEntry::scanned("tel:5551234", 10));
        counter.increment();
        counter.increment();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let log = EventLog::hydrate(&store);
    let counter = ScanCounter::hydrate(&store);
    assert_eq!(log.all(), &[HistoryEntry::scanned("tel:5551234", 10)]);
    assert_eq!(counter.current(), 2);
}

#[test]
fn stored_json_uses_expected_wire_fields() {
    let store = MemoryStore::new();
    let mut log = EventLog::hydrate(&store);
    log.append(HistoryEntry::generated(r#"say "hi""#, 1_700_000_000_000));

    let raw = store.get(HISTORY_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "type": "generated",
            "value": "say \"hi\"",
            "date": 1_700_000_000_000_i64,
            "favorite": false
        }])
    );
}

#[test]
fn hydrates_history_written_by_previous_versions() {
    let raw = r#"[
        {"type":"generated","value":"","date":1700000000000,"favorite":false},
        {"type":"scanned","value":"mailto:a@b.com","date":1700000000001,"favorite":true}
    ]"#;
    let store = MemoryStore::with_values([(HISTORY_KEY, raw)]);

    let log = EventLog::hydrate(&store);
    assert_eq!(log.len(), 2);
    assert_eq!(log.all()[0], HistoryEntry::generated("", 1_700_000_000_000));
    assert!(log.all()[1].favorite);
}

#[test]
fn corrupt_history_fails_open_to_empty_log() {
    for raw in ["{not json", "{\"type\":\"generated\"}", "[{\"type\":\"printed\",\"value\":\"x\",\"date\":1}]"] {
        let store = MemoryStore::with_values([(HISTORY_KEY, raw)]);
        let mut log = EventLog::hydrate(&store);
        assert!(log.is_empty(), "raw={raw}");

        log.append(HistoryEntry::generated("fresh", 5));
        let stored = store.get(HISTORY_KEY).unwrap().unwrap();
        let entries: Vec<HistoryEntry> = serde_json::from_str(&stored).unwrap();
        assert_eq!(entries, vec![HistoryEntry::generated("fresh", 5)]);
    }
}

#[test]
fn unreadable_store_hydrates_empty_state() {
    let store = FlakyStore::default();
    store.inner.set(HISTORY_KEY, "[]").unwrap();
    store.inner.set(SCAN_COUNT_KEY, "7").unwrap();
    store.fail_reads.set(true);

    assert!(EventLog::hydrate(&store).is_empty());
    assert_eq!(ScanCounter::hydrate(&store).current(), 0);
}

#[test]
fn write_failures_keep_in_memory_state() {
    let store = FlakyStore::default();
    let mut log = EventLog::hydrate(&store);
    let mut counter = ScanCounter::hydrate(&store);
    store.fail_writes.set(true);

    log.append(HistoryEntry::scanned("hello", 1));
    assert!(log.toggle_favorite(0));
    assert_eq!(counter.increment(), 1);

    assert_eq!(log.len(), 1);
    assert!(log.all()[0].favorite);
    assert_eq!(counter.current(), 1);
    assert_eq!(store.inner.get(HISTORY_KEY).unwrap(), None);
    assert_eq!(store.inner.get(SCAN_COUNT_KEY).unwrap(), None);

    store.fail_writes.set(false);
    log.append(HistoryEntry::scanned("again", 2));
    let stored: Vec<HistoryEntry> =
        serde_json::from_str(&store.inner.get(HISTORY_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), 2, "next successful write carries the full sequence");
}

#[test]
fn toggle_favorite_flips_only_target_and_twice_restores() {
    let store = MemoryStore::new();
    let mut log = EventLog::hydrate(&store);
    for entry in sample_entries() {
        log.append(entry);
    }
    let before = log.all().to_vec();

    assert!(log.toggle_favorite(1));
    for (index, (now, then)) in log.all().iter().zip(&before).enumerate() {
        if index == 1 {
            assert_eq!(now.favorite, !then.favorite);
            assert_eq!(now.value, then.value);
            assert_eq!(now.timestamp, then.timestamp);
        } else {
            assert_eq!(now, then);
        }
    }

    assert!(!log.toggle_favorite(1));
    assert_eq!(log.all(), before.as_slice());
}

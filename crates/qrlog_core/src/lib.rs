//! Core logic for QrLog: a durable, favoritable history of generated and
//! scanned codes, plus classification and dispatch of scan results.
//!
//! Rendering and decoding of code images live outside this crate; the core
//! only supplies text to an encoder and consumes text from a decoder.

pub mod action;
pub mod clock;
pub mod codec;
pub mod config;
pub mod db;
pub mod history;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use action::classifier::{classification_rules, classify, ClassificationRule};
pub use action::dispatcher::{dispatch, mail_prompt, DispatchOutcome, NavigationActions};
pub use clock::{Clock, SystemClock};
pub use codec::{CodeEncoder, DecodedFrame, EncodeRequest, EncodeRequestError, GenerateError};
pub use config::{ConfigError, CoreConfig};
pub use history::event_log::EventLog;
pub use history::scan_counter::ScanCounter;
pub use history::{PersistenceError, HISTORY_KEY, SCAN_COUNT_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::action::ActionCategory;
pub use model::entry::{EntryKind, HistoryEntry};
pub use model::scan::{CameraUnavailableReason, ScanError, ScanFailure, ScanNotification};
pub use service::session::{ScanOutcome, SessionController};
pub use store::{KeyValueStore, MemoryStore, SqliteKeyValueStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

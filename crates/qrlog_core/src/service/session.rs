//! Session controller for generate/scan events.
//!
//! # Responsibility
//! - Own the event log and scan counter for one process session.
//! - Build history entries, classify scan results and dispatch navigation.
//! - Track scanner state: persistent camera warning and one-shot notices.
//!
//! # Invariants
//! - The controller is the only writer of the log and counter.
//! - Each callback completes, persistence included, before returning.
//! - Entry timestamps never decrease, even across wall-clock steps back.
//! - The counter moves only on successful decodes, never on errors.

use crate::action::classifier::classify;
use crate::action::dispatcher::{dispatch, DispatchOutcome, NavigationActions};
use crate::clock::{Clock, SystemClock};
use crate::codec::{CodeEncoder, DecodedFrame, EncodeRequest, GenerateError};
use crate::history::event_log::EventLog;
use crate::history::scan_counter::ScanCounter;
use crate::model::action::ActionCategory;
use crate::model::entry::HistoryEntry;
use crate::model::scan::{CameraUnavailableReason, ScanError, ScanFailure, ScanNotification};
use crate::store::KeyValueStore;
use log::{info, warn};
use uuid::Uuid;

/// Result of recording one successfully decoded scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    pub category: ActionCategory,
    pub dispatch: DispatchOutcome,
    /// Scan tally after this scan.
    pub scan_count: u64,
    pub timestamp: i64,
}

/// Orchestrates history, counter and dispatch for one session.
pub struct SessionController<'s, S, N, C = SystemClock>
where
    S: KeyValueStore,
    N: NavigationActions,
    C: Clock,
{
    session_id: Uuid,
    log: EventLog<'s, S>,
    counter: ScanCounter<'s, S>,
    navigator: N,
    clock: C,
    scanning: bool,
    camera_warning: Option<CameraUnavailableReason>,
    notification: Option<ScanNotification>,
    last_scan_result: Option<String>,
}

impl<'s, S, N> SessionController<'s, S, N, SystemClock>
where
    S: KeyValueStore,
    N: NavigationActions,
{
    /// Hydrates a session from `store` using the system clock.
    pub fn new(store: &'s S, navigator: N) -> Self {
        Self::with_clock(store, navigator, SystemClock)
    }
}

impl<'s, S, N, C> SessionController<'s, S, N, C>
where
    S: KeyValueStore,
    N: NavigationActions,
    C: Clock,
{
    /// Hydrates a session from `store` with an explicit clock.
    ///
    /// # Side effects
    /// - Reads history and scan count once; corrupt values fall back to empty/zero.
    pub fn with_clock(store: &'s S, navigator: N, clock: C) -> Self {
        let session_id = Uuid::new_v4();
        let log = EventLog::hydrate(store);
        let counter = ScanCounter::hydrate(store);
        info!(
            "event=session_start module=session status=ok session_id={session_id} entries={} scan_count={}",
            log.len(),
            counter.current()
        );

        Self {
            session_id,
            log,
            counter,
            navigator,
            clock,
            scanning: false,
            camera_warning: None,
            notification: None,
            last_scan_result: None,
        }
    }

    /// Records a generated code. `text` is stored verbatim, empty included.
    pub fn record_generated(&mut self, text: impl Into<String>) -> &HistoryEntry {
        let timestamp = self.next_timestamp();
        let entry = HistoryEntry::generated(text, timestamp);
        info!(
            "event=code_generated module=session status=ok session_id={} value_len={} timestamp={timestamp}",
            self.session_id,
            entry.value.len()
        );
        self.log.append(entry)
    }

    /// Encodes `request` through `encoder` and records it on success.
    ///
    /// # Errors
    /// - `GenerateError::InvalidRequest` for malformed colors; nothing is recorded.
    /// - `GenerateError::Encoder` when the encoder fails; nothing is recorded.
    pub fn generate<E: CodeEncoder>(
        &mut self,
        request: &EncodeRequest,
        encoder: &E,
    ) -> Result<E::Output, GenerateError<E::Error>> {
        request.validate()?;
        let output = encoder.encode(request).map_err(|err| {
            warn!(
                "event=code_generated module=session status=error session_id={} error_code=encoder_failed error={err}",
                self.session_id
            );
            GenerateError::Encoder(err)
        })?;
        self.record_generated(request.text.as_str());
        Ok(output)
    }

    /// Records a decoder result.
    ///
    /// `None` (or an empty string) means no code was in view and is a no-op.
    /// Otherwise the counter is incremented, a `Scanned` entry appended, the
    /// scanner stopped, and the text classified and dispatched.
    pub fn record_scan(&mut self, text: Option<&str>) -> Option<ScanOutcome> {
        let text = text.filter(|text| !text.is_empty())?;

        let scan_count = self.counter.increment();
        let timestamp = self.next_timestamp();
        self.log.append(HistoryEntry::scanned(text, timestamp));
        self.last_scan_result = Some(text.to_string());
        self.scanning = false;

        let category = classify(text);
        let dispatched = dispatch(category, text, &mut self.navigator);
        info!(
            "event=scan_recorded module=session status=ok session_id={} category={} dispatch={} scan_count={scan_count} value_len={}",
            self.session_id,
            category.as_str(),
            dispatched.as_str(),
            text.len()
        );

        Some(ScanOutcome {
            category,
            dispatch: dispatched,
            scan_count,
            timestamp,
        })
    }

    /// Records a decoder/camera error and returns its classification.
    ///
    /// Camera unavailability sets the persistent warning. Any other error
    /// queues a one-shot notification and leaves the warning untouched.
    pub fn record_scan_error(&mut self, error: &ScanError) -> ScanFailure {
        let failure = error.classify();
        match &failure {
            ScanFailure::CameraUnavailable(reason) => {
                self.camera_warning = Some(*reason);
                warn!(
                    "event=scan_error module=session status=camera_unavailable session_id={} reason={} error_name={}",
                    self.session_id,
                    reason.as_str(),
                    error.name
                );
            }
            ScanFailure::DecodeTransient(detail) => {
                self.notification = Some(ScanNotification {
                    detail: detail.clone(),
                });
                warn!(
                    "event=scan_error module=session status=decode_transient session_id={} error_name={}",
                    self.session_id, error.name
                );
            }
        }
        failure
    }

    /// Routes one decoder frame: text first, then error, when present.
    pub fn handle_frame(&mut self, frame: DecodedFrame) -> Option<ScanOutcome> {
        let outcome = self.record_scan(frame.text.as_deref());
        if let Some(error) = frame.error.as_ref() {
            self.record_scan_error(error);
        }
        outcome
    }

    /// Flips the favorite flag of the entry at insertion-order `index`.
    ///
    /// # Panics
    /// Panics when `index` is not below `history().len()`.
    pub fn toggle_favorite(&mut self, index: usize) -> bool {
        let favorite = self.log.toggle_favorite(index);
        info!(
            "event=favorite_toggled module=session status=ok session_id={} index={index} favorite={favorite}",
            self.session_id
        );
        favorite
    }

    /// Starts (or restarts) scanning; clears any camera warning.
    pub fn start_scanning(&mut self) {
        self.scanning = true;
        self.camera_warning = None;
        info!(
            "event=scanner_state module=session status=started session_id={}",
            self.session_id
        );
    }

    /// Stops accepting new frames. In-flight callbacks still record.
    pub fn stop_scanning(&mut self) {
        self.scanning = false;
        info!(
            "event=scanner_state module=session status=stopped session_id={}",
            self.session_id
        );
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    /// Persistent camera warning, if the camera is unavailable.
    pub fn camera_warning(&self) -> Option<CameraUnavailableReason> {
        self.camera_warning
    }

    /// Takes the pending one-shot notification; later calls return `None`.
    pub fn take_notification(&mut self) -> Option<ScanNotification> {
        self.notification.take()
    }

    pub fn last_scan_result(&self) -> Option<&str> {
        self.last_scan_result.as_deref()
    }

    pub fn history(&self) -> &EventLog<'s, S> {
        &self.log
    }

    pub fn scan_count(&self) -> u64 {
        self.counter.current()
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    fn next_timestamp(&self) -> i64 {
        let now = self.clock.now_epoch_ms();
        match self.log.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        }
    }
}

//! Scan failure model.
//!
//! # Responsibility
//! - Describe decoder/camera errors as handed over by the codec collaborator.
//! - Classify them into persistent camera warnings vs. one-shot notices.
//!
//! # Invariants
//! - Only `NotAllowedError` and `NotFoundError` mean the camera is unavailable.
//! - Every other error name is a transient decode failure.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error name reported when camera permission is denied.
pub const PERMISSION_DENIED_ERROR: &str = "NotAllowedError";
/// Error name reported when no camera device exists.
pub const DEVICE_NOT_FOUND_ERROR: &str = "NotFoundError";
/// Error name used for single-frame decode failures.
pub const DECODE_ERROR: &str = "DecodeError";

/// Raw error reported by the decoder collaborator for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    /// Platform error name, e.g. `NotAllowedError`.
    pub name: String,
    /// Free-form diagnostic message.
    pub message: String,
}

impl ScanError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn permission_denied() -> Self {
        Self::new(PERMISSION_DENIED_ERROR, "camera permission denied")
    }

    pub fn device_not_found() -> Self {
        Self::new(DEVICE_NOT_FOUND_ERROR, "no camera device found")
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(DECODE_ERROR, message)
    }

    /// Maps this error onto the failure the session must surface.
    pub fn classify(&self) -> ScanFailure {
        match self.name.as_str() {
            PERMISSION_DENIED_ERROR => {
                ScanFailure::CameraUnavailable(CameraUnavailableReason::PermissionDenied)
            }
            DEVICE_NOT_FOUND_ERROR => {
                ScanFailure::CameraUnavailable(CameraUnavailableReason::DeviceNotFound)
            }
            _ => ScanFailure::DecodeTransient(self.message.clone()),
        }
    }
}

impl Display for ScanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl Error for ScanError {}

/// Why the camera cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraUnavailableReason {
    PermissionDenied,
    DeviceNotFound,
}

impl CameraUnavailableReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission_denied",
            Self::DeviceNotFound => "device_not_found",
        }
    }
}

/// Classified scan failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanFailure {
    /// Persistent warning; stays visible until scanning restarts.
    CameraUnavailable(CameraUnavailableReason),
    /// One bad frame; surfaced once, scanning continues.
    DecodeTransient(String),
}

impl Display for ScanFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CameraUnavailable(reason) => {
                write!(f, "camera unavailable: {}", reason.as_str())
            }
            Self::DecodeTransient(message) => write!(f, "scan failed: {message}"),
        }
    }
}

impl Error for ScanFailure {}

/// One-shot notification produced by a transient scan failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanNotification {
    pub detail: String,
}

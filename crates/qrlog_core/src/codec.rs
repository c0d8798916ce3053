//! Seams to the external code encoder/decoder.
//!
//! # Responsibility
//! - Describe what the core hands to the encoder (`EncodeRequest`).
//! - Describe what the decoder hands back per camera frame (`DecodedFrame`).
//!
//! # Invariants
//! - The core never inspects pixels; it only supplies or consumes text.
//! - Colors are `#rrggbb` strings passed through untouched once valid.

use crate::model::scan::ScanError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_FOREGROUND: &str = "#000000";
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex color regex"));

/// Input for one code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    /// Text to encode verbatim; may be empty.
    pub text: String,
    pub foreground: String,
    pub background: String,
}

impl EncodeRequest {
    /// Creates a request with default black-on-white colors.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            foreground: DEFAULT_FOREGROUND.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }

    pub fn with_colors(
        mut self,
        foreground: impl Into<String>,
        background: impl Into<String>,
    ) -> Self {
        self.foreground = foreground.into();
        self.background = background.into();
        self
    }

    /// Checks both colors are `#rrggbb`.
    ///
    /// The text is never validated.
    pub fn validate(&self) -> Result<(), EncodeRequestError> {
        for (field, value) in [
            ("foreground", &self.foreground),
            ("background", &self.background),
        ] {
            if !HEX_COLOR_RE.is_match(value) {
                return Err(EncodeRequestError::InvalidColor {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeRequestError {
    InvalidColor { field: &'static str, value: String },
}

impl Display for EncodeRequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidColor { field, value } => {
                write!(f, "{field} color must be #rrggbb, got `{value}`")
            }
        }
    }
}

impl Error for EncodeRequestError {}

/// External encoder turning text into a renderable code.
pub trait CodeEncoder {
    type Output;
    type Error: Error;

    fn encode(&self, request: &EncodeRequest) -> Result<Self::Output, Self::Error>;
}

/// Failure of `SessionController::generate`.
#[derive(Debug)]
pub enum GenerateError<E> {
    InvalidRequest(EncodeRequestError),
    Encoder(E),
}

impl<E: Display> Display for GenerateError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest(err) => write!(f, "{err}"),
            Self::Encoder(err) => write!(f, "encoder failed: {err}"),
        }
    }
}

impl<E: Error + 'static> Error for GenerateError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRequest(err) => Some(err),
            Self::Encoder(err) => Some(err),
        }
    }
}

impl<E> From<EncodeRequestError> for GenerateError<E> {
    fn from(value: EncodeRequestError) -> Self {
        Self::InvalidRequest(value)
    }
}

/// Decoder output for one camera frame.
///
/// Both halves may be absent (nothing in view).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedFrame {
    pub text: Option<String>,
    pub error: Option<ScanError>,
}

impl DecodedFrame {
    pub fn decoded(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            error: None,
        }
    }

    pub fn failed(error: ScanError) -> Self {
        Self {
            text: None,
            error: Some(error),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

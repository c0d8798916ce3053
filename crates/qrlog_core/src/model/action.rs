//! Action categories produced by scan classification.

/// What a decoded text asks the platform to do.
///
/// Derived on every scan; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionCategory {
    /// `tel:` link with at least one digit.
    Telephone,
    /// `mailto:` link; opened only after user confirmation.
    Mail,
    /// `http://` or `https://` link.
    Web,
    /// Anything else. No navigation happens.
    PlainText,
}

impl ActionCategory {
    /// Stable label used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Telephone => "telephone",
            Self::Mail => "mail",
            Self::Web => "web",
            Self::PlainText => "plain_text",
        }
    }
}

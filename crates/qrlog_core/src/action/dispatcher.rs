//! Effectful dispatch of classified scan results.
//!
//! # Responsibility
//! - Translate an `ActionCategory` into calls on platform navigation actions.
//! - Ask for confirmation before handing a `mailto:` link to the mail client.
//!
//! # Invariants
//! - At most one navigation call per dispatch.
//! - Navigation always receives the original, unstripped text.

use crate::model::action::ActionCategory;

const MAILTO_PREFIX: &str = "mailto:";

/// Platform navigation capabilities supplied by the embedding UI.
pub trait NavigationActions {
    /// Opens `url` in a new browsing context (new tab/window/app).
    fn open_in_new_context(&mut self, url: &str);
    /// Opens `url` replacing the current context.
    fn open_in_same_context(&mut self, url: &str);
    /// Asks the user a yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<N: NavigationActions + ?Sized> NavigationActions for &mut N {
    fn open_in_new_context(&mut self, url: &str) {
        (**self).open_in_new_context(url);
    }

    fn open_in_same_context(&mut self, url: &str) {
        (**self).open_in_same_context(url);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }
}

/// What dispatch actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    OpenedNewContext,
    OpenedSameContext,
    /// Mail link whose confirmation was refused.
    Declined,
    NoAction,
}

impl DispatchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenedNewContext => "opened_new_context",
            Self::OpenedSameContext => "opened_same_context",
            Self::Declined => "declined",
            Self::NoAction => "no_action",
        }
    }
}

/// Performs the navigation implied by `category` for `text`.
pub fn dispatch<N: NavigationActions + ?Sized>(
    category: ActionCategory,
    text: &str,
    actions: &mut N,
) -> DispatchOutcome {
    match category {
        ActionCategory::Telephone | ActionCategory::Web => {
            actions.open_in_new_context(text);
            DispatchOutcome::OpenedNewContext
        }
        ActionCategory::Mail => {
            if actions.confirm(&mail_prompt(text)) {
                actions.open_in_same_context(text);
                DispatchOutcome::OpenedSameContext
            } else {
                DispatchOutcome::Declined
            }
        }
        ActionCategory::PlainText => DispatchOutcome::NoAction,
    }
}

/// Confirmation prompt shown before opening a mail link.
pub fn mail_prompt(text: &str) -> String {
    let address = text.strip_prefix(MAILTO_PREFIX).unwrap_or(text);
    format!("Do you want to open your mail client for {address}?")
}

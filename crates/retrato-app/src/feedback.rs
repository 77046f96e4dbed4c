//! Single-slot status banner shown after user actions.

use serde::{Deserialize, Serialize};

/// Visual category of a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Success,
    Error,
    Info,
    Warning,
}

/// The banner's current content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
    pub visible: bool,
}

/// Owner of the single feedback slot.
///
/// A new message unconditionally replaces whatever is on screen; there is
/// no queueing or stacking.
#[derive(Debug, Clone)]
pub struct FeedbackBanner {
    current: Feedback,
}

impl FeedbackBanner {
    /// Start hidden with an empty info message.
    pub fn new() -> Self {
        Self {
            current: Feedback {
                kind: FeedbackKind::Info,
                message: String::new(),
                visible: false,
            },
        }
    }

    /// Replace the current message and make the banner visible.
    pub fn show(&mut self, kind: FeedbackKind, message: impl Into<String>) {
        self.current = Feedback {
            kind,
            message: message.into(),
            visible: true,
        };
    }

    /// Hide the banner.  The last kind and message are retained; visibility
    /// alone gates rendering.
    pub fn hide(&mut self) {
        self.current.visible = false;
    }

    /// Snapshot of the banner state.
    pub fn current(&self) -> &Feedback {
        &self.current
    }
}

impl Default for FeedbackBanner {
    fn default() -> Self {
        Self::new()
    }
}

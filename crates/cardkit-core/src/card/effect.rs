//! Effects a card session asks its owner to perform.

use serde::Serialize;

use crate::models::{AttachmentId, FileUpload};

/// A side effect produced by a card transition.
///
/// The session never calls out to the owner itself. Each transition returns
/// the effects in the order they must be applied: callbacks to invoke, focus
/// moves and confirmation requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum CardEffect {
    /// Invoke `onSave(title, description)`.
    Save { title: String, description: String },
    /// Invoke `onEdit()`.
    Edit,
    /// Invoke `onDelete()`.
    Delete,
    /// Invoke `onDuplicate()`.
    Duplicate,
    /// Invoke `onCancel()`.
    Cancel,
    /// Invoke `onFilesAdded(files)`.
    FilesAdded { files: Vec<FileUpload> },
    /// Invoke `onFileRemove(attachmentId)`.
    FileRemove { id: AttachmentId },
    /// Move keyboard focus to the title field after `delay_ms`.
    FocusTitle { delay_ms: u64 },
    /// Release focus held by the editable fields.
    BlurFields,
    /// Return keyboard focus to the menu trigger button.
    FocusMenuTrigger,
    /// Ask the user a yes/no question; answer with `resolve_confirmation`.
    RequestConfirmation { prompt: String },
}

/// Result of feeding one input into a card session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Effects to apply, in order.
    pub effects: Vec<CardEffect>,
    /// Whether the input event's default action must be suppressed.
    pub suppress_default: bool,
}

impl Outcome {
    /// An outcome with no effects.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            effects: Vec::new(),
            suppress_default: false,
        }
    }

    /// An outcome carrying the given effects.
    #[must_use]
    pub const fn with(effects: Vec<CardEffect>) -> Self {
        Self {
            effects,
            suppress_default: false,
        }
    }

    /// Mark the triggering event's default action as suppressed.
    #[must_use]
    pub const fn suppressing_default(mut self) -> Self {
        self.suppress_default = true;
        self
    }

    pub(crate) fn push(&mut self, effect: CardEffect) {
        self.effects.push(effect);
    }

    pub(crate) fn push_if(&mut self, registered: bool, effect: CardEffect) {
        if registered {
            self.effects.push(effect);
        }
    }

    /// True when there is nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && !self.suppress_default
    }
}

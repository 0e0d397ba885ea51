//! Inputs a card receives from its owner.

use serde::{Deserialize, Serialize};

use crate::models::{Attachment, ItemId};

/// Values the owning list passes to a card when mounting it.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardProps {
    /// Presence enables the attachment panel toggle.
    pub item_id: Option<ItemId>,
    /// Committed title; `None` is treated as empty.
    pub title: Option<String>,
    /// Committed description; `None` is treated as empty.
    pub description: Option<String>,
    /// Enables edit mode and the edit-related menu entries.
    pub editable: bool,
    /// Start directly in edit mode and focus the title.
    pub auto_focus: bool,
    /// Initial attachment list.
    pub attachments: Vec<Attachment>,
    /// Whether a drag-handle prop bag was supplied.
    pub drag_handle: bool,
    /// Owner is persisting a change; disables the menu trigger.
    pub is_saving: bool,
}

/// Which optional callbacks the owner registered.
///
/// A session only emits the effect for a callback that is registered, and
/// some behaviour depends on registration alone (menu entries, the
/// new-item cancel path, attachment removal controls).
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Collaborators {
    pub save: bool,
    pub edit: bool,
    pub delete: bool,
    pub duplicate: bool,
    pub cancel: bool,
    pub files_added: bool,
    pub file_remove: bool,
}

impl Collaborators {
    /// Every callback registered.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            save: true,
            edit: true,
            delete: true,
            duplicate: true,
            cancel: true,
            files_added: true,
            file_remove: true,
        }
    }

    /// Whether any menu-bearing callback is present.
    #[must_use]
    pub const fn any_menu_action(&self) -> bool {
        self.edit || self.delete || self.duplicate
    }
}

//! Collapsible attachment panel state.

use serde::Serialize;

use crate::models::{Attachment, AttachmentId};

/// How a single attachment tile previews its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TilePreview {
    /// Inline image loaded from the attachment url.
    Image { url: String },
    /// Generic file icon with the file name.
    File,
}

/// One entry of the expanded attachment grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentTile {
    pub id: AttachmentId,
    pub name: String,
    pub preview: TilePreview,
    /// Whether the per-file remove control is shown.
    pub removable: bool,
}

/// What the attachment area of a card renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum AttachmentView {
    /// Card has no item id; no toggle, no panel.
    Hidden,
    /// Toggle shown, panel closed.
    Collapsed { count: usize },
    /// Panel open with nothing attached.
    Empty { message: String },
    /// Panel open with one tile per attachment, in list order.
    Grid { tiles: Vec<AttachmentTile> },
}

/// Expanded flag plus the attachment list the card currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentPanel {
    expanded: bool,
    attachments: Vec<Attachment>,
}

impl AttachmentPanel {
    #[must_use]
    pub const fn new(attachments: Vec<Attachment>) -> Self {
        Self {
            expanded: false,
            attachments,
        }
    }

    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Replace the list with the owner's current one.
    pub fn replace(&mut self, attachments: Vec<Attachment>) {
        self.attachments = attachments;
    }

    #[must_use]
    pub fn contains(&self, id: AttachmentId) -> bool {
        self.attachments.iter().any(|attachment| attachment.id == id)
    }

    /// Label of the toggle button, e.g. `Files (3)`.
    #[must_use]
    pub fn badge(&self) -> String {
        format!("Files ({})", self.attachments.len())
    }

    /// Build the panel view.
    #[must_use]
    pub fn view(&self, removable: bool, empty_message: &str) -> AttachmentView {
        if !self.expanded {
            return AttachmentView::Collapsed {
                count: self.attachments.len(),
            };
        }
        if self.attachments.is_empty() {
            return AttachmentView::Empty {
                message: empty_message.to_string(),
            };
        }

        let tiles = self
            .attachments
            .iter()
            .map(|attachment| AttachmentTile {
                id: attachment.id,
                name: attachment.name.clone(),
                preview: if attachment.is_image() {
                    TilePreview::Image {
                        url: attachment.url.clone(),
                    }
                } else {
                    TilePreview::File
                },
                removable,
            })
            .collect();
        AttachmentView::Grid { tiles }
    }
}

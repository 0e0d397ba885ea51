//! Card edit session: the edit-state controller and its composition with the
//! menu watcher and the attachment panel.

use serde::{Deserialize, Serialize};

use super::attachments::{AttachmentPanel, AttachmentView};
use super::dismiss::{DismissListeners, DismissalWatcher, ManualListeners, MenuAction, PointerTarget};
use super::effect::{CardEffect, Outcome};
use super::props::{CardProps, Collaborators};
use crate::config::CardConfig;
use crate::models::{Attachment, AttachmentId, FileUpload, ItemId};
use crate::util::text_or_empty;

/// Interaction mode of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardMode {
    #[default]
    Viewing,
    Editing,
}

/// Keys the card reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKey {
    Enter,
    Escape,
    Other,
}

/// A yes/no question waiting for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmRequest {
    pub prompt: String,
}

/// Text to render in a title or description slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayText {
    pub text: String,
    /// Render muted: the slot shows the empty fallback or is empty.
    pub muted: bool,
    /// Placeholder hint for an empty editable field.
    pub hint: Option<String>,
}

/// The control cluster in the card's corner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "controls", rename_all = "snake_case")]
pub enum CardControls {
    /// Nothing to offer: not editable and no menu callbacks.
    Hidden,
    /// Save and cancel buttons while editing.
    EditActions,
    /// Options menu trigger; `busy` swaps the icon for a spinner and disables it.
    Menu {
        open: bool,
        busy: bool,
        items: Vec<MenuAction>,
    },
}

/// Serializable view of a session's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSnapshot {
    pub mode: CardMode,
    pub title: String,
    pub description: String,
    pub draft_title: String,
    pub draft_description: String,
    pub original_title: String,
    pub original_description: String,
    pub menu_open: bool,
    pub expanded: bool,
    pub attachment_count: usize,
    pub pending_confirmation: Option<String>,
    pub is_saving: bool,
}

/// Local state of one mounted item card.
///
/// Every input is a method returning an [`Outcome`]. Calls that are not valid
/// in the current state change nothing and return an empty outcome.
#[derive(Debug)]
pub struct CardSession {
    config: CardConfig,
    collaborators: Collaborators,
    item_id: Option<ItemId>,
    editable: bool,
    drag_handle: bool,
    is_saving: bool,
    mode: CardMode,
    title: String,
    description: String,
    draft_title: String,
    draft_description: String,
    original_title: String,
    original_description: String,
    pending_confirmation: Option<ConfirmRequest>,
    menu: DismissalWatcher,
    panel: AttachmentPanel,
}

impl CardSession {
    /// Create the session for a freshly mounted card.
    ///
    /// With `auto_focus` the card starts in edit mode and asks for the title
    /// to be focused.
    pub fn mount(
        props: CardProps,
        collaborators: Collaborators,
        config: CardConfig,
    ) -> (Self, Outcome) {
        let title = text_or_empty(props.title);
        let description = text_or_empty(props.description);
        let mode = if props.auto_focus {
            CardMode::Editing
        } else {
            CardMode::Viewing
        };

        let session = Self {
            collaborators,
            item_id: props.item_id,
            editable: props.editable,
            drag_handle: props.drag_handle,
            is_saving: props.is_saving,
            mode,
            draft_title: title.clone(),
            draft_description: description.clone(),
            original_title: title.clone(),
            original_description: description.clone(),
            title,
            description,
            pending_confirmation: None,
            menu: DismissalWatcher::new(Box::new(ManualListeners)),
            panel: AttachmentPanel::new(props.attachments),
            config,
        };

        let mut outcome = Outcome::none();
        if props.auto_focus {
            outcome.push(CardEffect::FocusTitle {
                delay_ms: session.config.focus_delay_ms,
            });
        }
        tracing::debug!(item_id = ?session.item_id, mode = ?session.mode, "Card mounted");
        (session, outcome)
    }

    /// Use `listeners` for the menu's document listeners.
    pub fn set_listeners(&mut self, listeners: Box<dyn DismissListeners>) {
        self.menu.replace_listeners(listeners);
    }

    // -----------------------------------------------------------------------
    // Edit-state controller
    // -----------------------------------------------------------------------

    /// Enter edit mode from viewing.
    pub fn begin_edit(&mut self) -> Outcome {
        if self.mode != CardMode::Viewing {
            tracing::trace!("begin_edit ignored while editing");
            return Outcome::none();
        }

        self.menu.close();
        self.original_title.clone_from(&self.title);
        self.original_description.clone_from(&self.description);
        self.draft_title.clone_from(&self.title);
        self.draft_description.clone_from(&self.description);
        self.mode = CardMode::Editing;
        tracing::debug!(item_id = ?self.item_id, "Card entered edit mode");

        let mut outcome = Outcome::none();
        outcome.push_if(self.collaborators.edit, CardEffect::Edit);
        outcome.push(CardEffect::FocusTitle {
            delay_ms: self.config.focus_delay_ms,
        });
        outcome
    }

    /// Replace the title draft with the field's raw text.
    pub fn set_draft_title(&mut self, text: impl Into<String>) -> Outcome {
        if self.accepts_edit_input() {
            self.draft_title = text.into();
        }
        Outcome::none()
    }

    /// Replace the description draft with the field's raw text.
    pub fn set_draft_description(&mut self, text: impl Into<String>) -> Outcome {
        if self.accepts_edit_input() {
            self.draft_description = text.into();
        }
        Outcome::none()
    }

    /// Save the drafts and return to viewing.
    pub fn commit(&mut self) -> Outcome {
        if !self.accepts_edit_input() {
            tracing::trace!("commit ignored");
            return Outcome::none();
        }

        self.title.clone_from(&self.draft_title);
        self.description.clone_from(&self.draft_description);
        self.mode = CardMode::Viewing;
        tracing::debug!(item_id = ?self.item_id, "Card edits committed");

        let mut outcome = Outcome::none();
        outcome.push_if(
            self.collaborators.save,
            CardEffect::Save {
                title: self.title.clone(),
                description: self.description.clone(),
            },
        );
        outcome.push(CardEffect::BlurFields);
        outcome
    }

    /// Leave edit mode without saving.
    ///
    /// A never-saved card (empty title and description) whose owner handles
    /// cancel is handed straight back to the owner. Otherwise unsaved drafts
    /// require confirmation first.
    pub fn cancel(&mut self) -> Outcome {
        if !self.accepts_edit_input() {
            tracing::trace!("cancel ignored");
            return Outcome::none();
        }

        if self.collaborators.cancel && self.title.is_empty() && self.description.is_empty() {
            self.restore_originals();
            self.mode = CardMode::Viewing;
            tracing::debug!(item_id = ?self.item_id, "New card cancelled");
            return Outcome::with(vec![CardEffect::Cancel]);
        }

        if self.is_dirty() {
            let prompt = self.config.discard_prompt.clone();
            self.pending_confirmation = Some(ConfirmRequest {
                prompt: prompt.clone(),
            });
            tracing::debug!(item_id = ?self.item_id, "Cancel awaiting confirmation");
            return Outcome::with(vec![CardEffect::RequestConfirmation { prompt }]);
        }

        self.finish_cancel()
    }

    /// Answer a pending confirmation.
    pub fn resolve_confirmation(&mut self, accepted: bool) -> Outcome {
        if self.pending_confirmation.take().is_none() {
            tracing::trace!("resolve_confirmation ignored: nothing pending");
            return Outcome::none();
        }

        if accepted {
            self.finish_cancel()
        } else {
            tracing::debug!(item_id = ?self.item_id, "Cancel declined, still editing");
            Outcome::none()
        }
    }

    /// Key-down inside the title or description field.
    ///
    /// `Escape` outside edit mode reaches the menu like a document key.
    pub fn handle_key(&mut self, key: CardKey) -> Outcome {
        if self.pending_confirmation.is_some() {
            return Outcome::none();
        }

        match key {
            CardKey::Enter => {
                if self.mode == CardMode::Editing {
                    self.commit().suppressing_default()
                } else {
                    Outcome::none().suppressing_default()
                }
            }
            CardKey::Escape if self.mode == CardMode::Editing => {
                self.cancel().suppressing_default()
            }
            CardKey::Escape => self.document_key(key),
            CardKey::Other => Outcome::none(),
        }
    }

    /// Double-click on the card body.
    pub fn double_click_body(&mut self) -> Outcome {
        if self.editable && self.mode == CardMode::Viewing {
            self.begin_edit()
        } else {
            Outcome::none()
        }
    }

    /// The owner changed the committed text.
    ///
    /// While editing only the committed values move; the snapshot taken at
    /// edit entry stays frozen.
    pub fn sync_props(&mut self, title: Option<String>, description: Option<String>) -> Outcome {
        let title = text_or_empty(title);
        let description = text_or_empty(description);
        if title == self.title && description == self.description {
            return Outcome::none();
        }

        if self.mode == CardMode::Viewing {
            self.draft_title.clone_from(&title);
            self.draft_description.clone_from(&description);
            self.original_title.clone_from(&title);
            self.original_description.clone_from(&description);
        }
        self.title = title;
        self.description = description;
        tracing::debug!(item_id = ?self.item_id, "Card props synced");
        Outcome::none()
    }

    /// Reflect the owner's in-flight save.
    pub fn set_saving(&mut self, saving: bool) -> Outcome {
        self.is_saving = saving;
        Outcome::none()
    }

    // -----------------------------------------------------------------------
    // Dismissal watcher
    // -----------------------------------------------------------------------

    /// Click on the menu trigger.
    pub fn toggle_menu(&mut self) -> Outcome {
        if self.mode != CardMode::Viewing || self.is_saving || !self.has_controls() {
            tracing::trace!("toggle_menu ignored");
            return Outcome::none();
        }
        self.menu.toggle();
        tracing::debug!(open = self.menu.is_open(), "Card menu toggled");
        Outcome::none()
    }

    /// Close the menu programmatically.
    pub fn close_menu(&mut self) -> Outcome {
        self.menu.close();
        Outcome::none()
    }

    /// Document pointer-down reported by the menu listeners.
    pub fn pointer_down(&mut self, target: PointerTarget) -> Outcome {
        if self.menu.pointer_down(target) {
            tracing::debug!("Card menu dismissed by outside click");
        }
        Outcome::none()
    }

    /// Document key-down reported by the menu listeners.
    pub fn document_key(&mut self, key: CardKey) -> Outcome {
        if key == CardKey::Escape && self.menu.close() {
            tracing::debug!("Card menu dismissed by escape");
            return Outcome::with(vec![CardEffect::FocusMenuTrigger]);
        }
        Outcome::none()
    }

    /// Pick an entry from the open menu. The menu closes before the action runs.
    pub fn select_menu_action(&mut self, action: MenuAction) -> Outcome {
        if !self.menu.is_open() || !self.menu_items().contains(&action) {
            tracing::trace!(?action, "Menu action ignored");
            return Outcome::none();
        }

        self.menu.close();
        tracing::debug!(?action, "Card menu action selected");
        match action {
            MenuAction::Edit if self.editable => self.begin_edit(),
            MenuAction::Edit => Outcome::with(vec![CardEffect::Edit]),
            MenuAction::Duplicate => Outcome::with(vec![CardEffect::Duplicate]),
            MenuAction::Delete => Outcome::with(vec![CardEffect::Delete]),
        }
    }

    /// Entries the options menu offers.
    #[must_use]
    pub fn menu_items(&self) -> Vec<MenuAction> {
        let mut items = Vec::with_capacity(3);
        if self.editable || self.collaborators.edit {
            items.push(MenuAction::Edit);
        }
        if self.collaborators.duplicate {
            items.push(MenuAction::Duplicate);
        }
        if self.collaborators.delete {
            items.push(MenuAction::Delete);
        }
        items
    }

    /// The corner control cluster for the current state.
    #[must_use]
    pub fn controls(&self) -> CardControls {
        if !self.has_controls() {
            return CardControls::Hidden;
        }
        match self.mode {
            CardMode::Editing => CardControls::EditActions,
            CardMode::Viewing => CardControls::Menu {
                open: self.menu.is_open(),
                busy: self.is_saving,
                items: self.menu_items(),
            },
        }
    }

    // -----------------------------------------------------------------------
    // Attachment panel
    // -----------------------------------------------------------------------

    /// Click on the `Files (n)` toggle.
    pub fn toggle_attachments(&mut self) -> Outcome {
        if self.item_id.is_none() || self.pending_confirmation.is_some() {
            tracing::trace!("toggle_attachments ignored");
            return Outcome::none();
        }
        self.panel.toggle();
        Outcome::none()
    }

    /// The owner replaced the attachment list.
    pub fn set_attachments(&mut self, attachments: Vec<Attachment>) -> Outcome {
        self.panel.replace(attachments);
        Outcome::none()
    }

    /// Remove control clicked on a tile.
    pub fn remove_attachment(&mut self, id: AttachmentId) -> Outcome {
        if self.item_id.is_none()
            || self.pending_confirmation.is_some()
            || !self.attachments_removable()
            || !self.panel.contains(id)
        {
            tracing::trace!(%id, "remove_attachment ignored");
            return Outcome::none();
        }
        Outcome::with(vec![CardEffect::FileRemove { id }])
    }

    /// Files picked or dropped onto the card.
    pub fn add_files(&mut self, files: Vec<FileUpload>) -> Outcome {
        if self.pending_confirmation.is_some() || !self.accepts_files() || files.is_empty() {
            tracing::trace!("add_files ignored");
            return Outcome::none();
        }
        Outcome::with(vec![CardEffect::FilesAdded { files }])
    }

    /// What the attachment area renders.
    #[must_use]
    pub fn attachment_view(&self) -> AttachmentView {
        if self.item_id.is_none() {
            return AttachmentView::Hidden;
        }
        self.panel.view(
            self.attachments_removable(),
            &self.config.empty_attachments_text,
        )
    }

    /// Label for the attachment toggle.
    #[must_use]
    pub fn files_badge(&self) -> String {
        self.panel.badge()
    }

    /// Whether the card offers a file picker.
    #[must_use]
    pub const fn accepts_files(&self) -> bool {
        self.editable && self.collaborators.files_added
    }

    // -----------------------------------------------------------------------
    // Display
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn display_title(&self) -> DisplayText {
        self.display(
            &self.title,
            &self.draft_title,
            &self.config.title_placeholder,
        )
    }

    #[must_use]
    pub fn display_description(&self) -> DisplayText {
        self.display(
            &self.description,
            &self.draft_description,
            &self.config.description_placeholder,
        )
    }

    fn display(&self, committed: &str, draft: &str, placeholder: &str) -> DisplayText {
        match self.mode {
            CardMode::Viewing if committed.is_empty() => DisplayText {
                text: self.config.empty_text.clone(),
                muted: true,
                hint: None,
            },
            CardMode::Viewing => DisplayText {
                text: committed.to_string(),
                muted: false,
                hint: None,
            },
            CardMode::Editing => DisplayText {
                text: draft.to_string(),
                muted: draft.is_empty(),
                hint: Some(placeholder.to_string()),
            },
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub const fn mode(&self) -> CardMode {
        self.mode
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn draft_title(&self) -> &str {
        &self.draft_title
    }

    #[must_use]
    pub fn draft_description(&self) -> &str {
        &self.draft_description
    }

    #[must_use]
    pub fn original_title(&self) -> &str {
        &self.original_title
    }

    #[must_use]
    pub fn original_description(&self) -> &str {
        &self.original_description
    }

    #[must_use]
    pub const fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    #[must_use]
    pub const fn expanded(&self) -> bool {
        self.panel.is_expanded()
    }

    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        self.panel.attachments()
    }

    #[must_use]
    pub const fn pending_confirmation(&self) -> Option<&ConfirmRequest> {
        self.pending_confirmation.as_ref()
    }

    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.is_saving
    }

    #[must_use]
    pub const fn editable(&self) -> bool {
        self.editable
    }

    #[must_use]
    pub const fn item_id(&self) -> Option<ItemId> {
        self.item_id
    }

    #[must_use]
    pub const fn has_drag_handle(&self) -> bool {
        self.drag_handle
    }

    #[must_use]
    pub const fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Whether the drafts differ from the edit-entry snapshot.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.draft_title != self.original_title
            || self.draft_description != self.original_description
    }

    #[must_use]
    pub fn snapshot(&self) -> CardSnapshot {
        CardSnapshot {
            mode: self.mode,
            title: self.title.clone(),
            description: self.description.clone(),
            draft_title: self.draft_title.clone(),
            draft_description: self.draft_description.clone(),
            original_title: self.original_title.clone(),
            original_description: self.original_description.clone(),
            menu_open: self.menu.is_open(),
            expanded: self.panel.is_expanded(),
            attachment_count: self.panel.attachments().len(),
            pending_confirmation: self
                .pending_confirmation
                .as_ref()
                .map(|request| request.prompt.clone()),
            is_saving: self.is_saving,
        }
    }

    // -----------------------------------------------------------------------
    // Private
    // -----------------------------------------------------------------------

    fn accepts_edit_input(&self) -> bool {
        self.mode == CardMode::Editing && self.pending_confirmation.is_none()
    }

    const fn has_controls(&self) -> bool {
        self.editable || self.collaborators.any_menu_action()
    }

    const fn attachments_removable(&self) -> bool {
        self.editable && self.collaborators.file_remove
    }

    fn restore_originals(&mut self) {
        self.draft_title.clone_from(&self.original_title);
        self.draft_description.clone_from(&self.original_description);
    }

    fn finish_cancel(&mut self) -> Outcome {
        self.restore_originals();
        self.mode = CardMode::Viewing;
        tracing::debug!(item_id = ?self.item_id, "Card edits discarded");

        let mut outcome = Outcome::with(vec![CardEffect::BlurFields]);
        outcome.push_if(self.collaborators.cancel, CardEffect::Cancel);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::dismiss::testing::CountingListeners;
    use super::*;

    const PROMPT: &str =
        "You have unsaved changes. Are you sure you want to cancel? Your changes will be lost.";

    fn props(title: &str, description: &str) -> CardProps {
        CardProps {
            item_id: Some(ItemId::new()),
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            editable: true,
            ..CardProps::default()
        }
    }

    fn mount(props: CardProps, collaborators: Collaborators) -> CardSession {
        CardSession::mount(props, collaborators, CardConfig::default()).0
    }

    fn saver() -> Collaborators {
        Collaborators {
            save: true,
            ..Collaborators::default()
        }
    }

    #[test]
    fn null_text_is_empty() {
        let card = mount(
            CardProps {
                title: None,
                description: None,
                ..CardProps::default()
            },
            Collaborators::default(),
        );
        assert_eq!(card.title(), "");
        assert_eq!(card.description(), "");
        assert_eq!(card.mode(), CardMode::Viewing);
    }

    #[test]
    fn auto_focus_mounts_editing_and_focuses_title() {
        let (card, outcome) = CardSession::mount(
            CardProps {
                auto_focus: true,
                ..props("", "")
            },
            Collaborators::default(),
            CardConfig::default(),
        );
        assert_eq!(card.mode(), CardMode::Editing);
        assert_eq!(
            outcome.effects,
            vec![CardEffect::FocusTitle { delay_ms: 50 }]
        );
    }

    #[test]
    fn begin_edit_snapshots_and_focuses() {
        let mut card = mount(
            props("Groceries", "Milk"),
            Collaborators {
                edit: true,
                ..Collaborators::default()
            },
        );

        let outcome = card.begin_edit();
        assert_eq!(card.mode(), CardMode::Editing);
        assert_eq!(card.original_title(), "Groceries");
        assert_eq!(card.original_description(), "Milk");
        assert_eq!(card.draft_title(), "Groceries");
        assert_eq!(
            outcome.effects,
            vec![CardEffect::Edit, CardEffect::FocusTitle { delay_ms: 50 }]
        );

        // second call is a no-op
        assert!(card.begin_edit().is_empty());
    }

    #[test]
    fn commit_saves_last_drafts() {
        let mut card = mount(props("Draft", ""), saver());
        card.begin_edit();
        card.set_draft_title("Draft v2");
        card.set_draft_title("Draft v3");
        card.set_draft_description(" details ");

        let outcome = card.commit();
        assert_eq!(
            outcome.effects,
            vec![
                CardEffect::Save {
                    title: "Draft v3".to_string(),
                    description: " details ".to_string(),
                },
                CardEffect::BlurFields,
            ]
        );
        assert_eq!(card.mode(), CardMode::Viewing);
        assert_eq!(card.title(), "Draft v3");
        assert_eq!(card.description(), " details ");
    }

    #[test]
    fn commit_without_save_callback_still_commits() {
        let mut card = mount(props("A", "B"), Collaborators::default());
        card.begin_edit();
        card.set_draft_title("C");
        assert_eq!(card.commit().effects, vec![CardEffect::BlurFields]);
        assert_eq!(card.title(), "C");
    }

    #[test]
    fn commit_and_cancel_ignored_while_viewing() {
        let mut card = mount(props("A", "B"), Collaborators::all());
        assert!(card.commit().is_empty());
        assert!(card.cancel().is_empty());
        assert!(card.set_draft_title("x").is_empty());
        assert_eq!(card.draft_title(), "A");
        assert_eq!(card.title(), "A");
    }

    #[test]
    fn cancel_without_changes_skips_prompt() {
        let mut card = mount(props("Title", "Body"), Collaborators::default());
        card.begin_edit();

        let outcome = card.cancel();
        assert_eq!(outcome.effects, vec![CardEffect::BlurFields]);
        assert_eq!(card.mode(), CardMode::Viewing);
        assert_eq!(card.title(), "Title");
        assert_eq!(card.description(), "Body");
        assert!(card.pending_confirmation().is_none());
    }

    #[test]
    fn cancel_with_changes_declined_keeps_editing() {
        let mut card = mount(props("Draft", ""), Collaborators::default());
        card.begin_edit();
        card.set_draft_title("Draft v2");

        let outcome = card.cancel();
        assert_eq!(
            outcome.effects,
            vec![CardEffect::RequestConfirmation {
                prompt: PROMPT.to_string()
            }]
        );
        assert_eq!(card.pending_confirmation().unwrap().prompt, PROMPT);

        assert!(card.resolve_confirmation(false).is_empty());
        assert_eq!(card.mode(), CardMode::Editing);
        assert_eq!(card.draft_title(), "Draft v2");
        assert!(card.pending_confirmation().is_none());
    }

    #[test]
    fn cancel_with_changes_accepted_restores() {
        let mut card = mount(props("Draft", ""), Collaborators::default());
        card.begin_edit();
        card.set_draft_title("Draft v2");
        card.cancel();

        let outcome = card.resolve_confirmation(true);
        assert_eq!(outcome.effects, vec![CardEffect::BlurFields]);
        assert_eq!(card.mode(), CardMode::Viewing);
        assert_eq!(card.title(), "Draft");
        assert_eq!(card.draft_title(), "Draft");
    }

    #[test]
    fn accepted_cancel_notifies_owner() {
        let mut card = mount(
            props("Saved", "Text"),
            Collaborators {
                cancel: true,
                ..Collaborators::default()
            },
        );
        card.begin_edit();
        card.set_draft_description("Changed");
        card.cancel();

        assert_eq!(
            card.resolve_confirmation(true).effects,
            vec![CardEffect::BlurFields, CardEffect::Cancel]
        );
        assert_eq!(card.description(), "Text");
    }

    #[test]
    fn new_empty_card_cancel_goes_straight_to_owner() {
        let mut card = mount(
            CardProps {
                auto_focus: true,
                ..props("", "")
            },
            Collaborators {
                cancel: true,
                ..Collaborators::default()
            },
        );
        assert_eq!(card.mode(), CardMode::Editing);
        card.set_draft_title("typed but not saved");

        let outcome = card.cancel();
        assert_eq!(outcome.effects, vec![CardEffect::Cancel]);
        assert!(card.pending_confirmation().is_none());
        assert_eq!(card.mode(), CardMode::Viewing);
    }

    #[test]
    fn empty_card_without_cancel_callback_uses_dirty_check() {
        let mut card = mount(props("", ""), Collaborators::default());
        card.begin_edit();
        card.set_draft_title("x");
        assert_eq!(
            card.cancel().effects,
            vec![CardEffect::RequestConfirmation {
                prompt: PROMPT.to_string()
            }]
        );
    }

    #[test]
    fn inputs_ignored_while_confirmation_pending() {
        let mut card = mount(props("T", "D"), saver());
        card.begin_edit();
        card.set_draft_title("T2");
        card.cancel();

        assert!(card.commit().is_empty());
        assert!(card.cancel().is_empty());
        assert!(card.handle_key(CardKey::Enter).is_empty());
        card.set_draft_title("T3");
        assert_eq!(card.draft_title(), "T2");
        assert!(card.pending_confirmation().is_some());
    }

    #[test]
    fn resolve_without_pending_is_noop() {
        let mut card = mount(props("T", "D"), Collaborators::default());
        card.begin_edit();
        assert!(card.resolve_confirmation(true).is_empty());
        assert_eq!(card.mode(), CardMode::Editing);
    }

    #[test]
    fn enter_commits_and_suppresses_newline() {
        let mut card = mount(props("T", "D"), saver());
        card.begin_edit();
        card.set_draft_title("T2");

        let outcome = card.handle_key(CardKey::Enter);
        assert!(outcome.suppress_default);
        assert_eq!(card.mode(), CardMode::Viewing);
        assert_eq!(card.title(), "T2");
    }

    #[test]
    fn escape_cancels_while_editing() {
        let mut card = mount(props("T", "D"), Collaborators::default());
        card.begin_edit();
        let outcome = card.handle_key(CardKey::Escape);
        assert!(outcome.suppress_default);
        assert_eq!(card.mode(), CardMode::Viewing);

        assert!(card.handle_key(CardKey::Escape).is_empty());
        assert!(card.handle_key(CardKey::Other).is_empty());
    }

    #[test]
    fn double_click_enters_edit_only_when_editable() {
        let mut card = mount(props("T", "D"), Collaborators::default());
        assert!(!card.double_click_body().is_empty());
        assert_eq!(card.mode(), CardMode::Editing);

        let mut locked = mount(
            CardProps {
                editable: false,
                ..props("T", "D")
            },
            Collaborators::default(),
        );
        assert!(locked.double_click_body().is_empty());
        assert_eq!(locked.mode(), CardMode::Viewing);
    }

    #[test]
    fn sync_props_while_viewing_refreshes_everything() {
        let mut card = mount(props("Old", "Text"), Collaborators::default());
        card.sync_props(Some("New".to_string()), None);
        assert_eq!(card.title(), "New");
        assert_eq!(card.description(), "");
        assert_eq!(card.draft_title(), "New");
        assert_eq!(card.original_title(), "New");
    }

    #[test]
    fn sync_props_while_editing_keeps_snapshot() {
        let mut card = mount(props("Old", "Text"), Collaborators::default());
        card.begin_edit();
        card.set_draft_title("Mine");
        card.sync_props(Some("Theirs".to_string()), Some("Text".to_string()));

        assert_eq!(card.title(), "Theirs");
        assert_eq!(card.original_title(), "Old");
        assert_eq!(card.draft_title(), "Mine");
    }

    #[test]
    fn menu_requires_viewing_and_not_saving() {
        let mut card = mount(props("T", "D"), Collaborators::default());
        card.toggle_menu();
        assert!(card.menu_open());
        card.toggle_menu();
        assert!(!card.menu_open());

        card.set_saving(true);
        card.toggle_menu();
        assert!(!card.menu_open());
        assert_eq!(
            card.controls(),
            CardControls::Menu {
                open: false,
                busy: true,
                items: vec![MenuAction::Edit],
            }
        );

        card.set_saving(false);
        card.begin_edit();
        card.toggle_menu();
        assert!(!card.menu_open());
        assert_eq!(card.controls(), CardControls::EditActions);
    }

    #[test]
    fn menu_closed_when_editing_starts() {
        let listeners = CountingListeners::default();
        let mut card = mount(props("T", "D"), Collaborators::default());
        card.set_listeners(Box::new(listeners.clone()));

        card.toggle_menu();
        assert_eq!(listeners.live(), 1);
        card.double_click_body();
        assert!(!card.menu_open());
        assert_eq!(listeners.live(), 0);
    }

    #[test]
    fn outside_click_and_escape_dismiss_menu() {
        let listeners = CountingListeners::default();
        let mut card = mount(props("T", "D"), Collaborators::default());
        card.set_listeners(Box::new(listeners.clone()));

        card.toggle_menu();
        card.pointer_down(PointerTarget::Menu);
        assert!(card.menu_open());
        card.pointer_down(PointerTarget::Outside);
        assert!(!card.menu_open());
        assert_eq!(listeners.live(), 0);

        card.toggle_menu();
        let outcome = card.document_key(CardKey::Escape);
        assert_eq!(outcome.effects, vec![CardEffect::FocusMenuTrigger]);
        assert!(!card.menu_open());
        assert_eq!(listeners.live(), 0);

        // escape with the menu closed does nothing
        assert!(card.document_key(CardKey::Escape).is_empty());
    }

    #[test]
    fn dropping_session_releases_listeners() {
        let listeners = CountingListeners::default();
        let mut card = mount(props("T", "D"), Collaborators::default());
        card.set_listeners(Box::new(listeners.clone()));
        card.toggle_menu();
        drop(card);
        assert_eq!(listeners.live(), 0);
    }

    #[test]
    fn menu_items_follow_collaborators() {
        let card = mount(
            CardProps {
                editable: false,
                ..props("T", "D")
            },
            Collaborators {
                delete: true,
                ..Collaborators::default()
            },
        );
        assert_eq!(card.menu_items(), vec![MenuAction::Delete]);

        let card = mount(props("T", "D"), Collaborators::all());
        assert_eq!(
            card.menu_items(),
            vec![MenuAction::Edit, MenuAction::Duplicate, MenuAction::Delete]
        );

        let card = mount(
            CardProps {
                editable: false,
                ..props("T", "D")
            },
            Collaborators::default(),
        );
        assert_eq!(card.controls(), CardControls::Hidden);
    }

    #[test]
    fn menu_action_closes_before_callback() {
        let listeners = CountingListeners::default();
        let mut card = mount(props("T", "D"), Collaborators::all());
        card.set_listeners(Box::new(listeners.clone()));

        card.toggle_menu();
        let outcome = card.select_menu_action(MenuAction::Duplicate);
        assert_eq!(outcome.effects, vec![CardEffect::Duplicate]);
        assert!(!card.menu_open());
        assert_eq!(listeners.live(), 0);

        card.toggle_menu();
        assert_eq!(
            card.select_menu_action(MenuAction::Delete).effects,
            vec![CardEffect::Delete]
        );

        // closed menu ignores selections
        assert!(card.select_menu_action(MenuAction::Delete).is_empty());
    }

    #[test]
    fn edit_menu_action_enters_edit_when_editable() {
        let mut card = mount(props("T", "D"), Collaborators::all());
        card.toggle_menu();
        let outcome = card.select_menu_action(MenuAction::Edit);
        assert_eq!(card.mode(), CardMode::Editing);
        assert_eq!(
            outcome.effects,
            vec![CardEffect::Edit, CardEffect::FocusTitle { delay_ms: 50 }]
        );
    }

    #[test]
    fn edit_menu_action_delegates_when_read_only() {
        let mut card = mount(
            CardProps {
                editable: false,
                ..props("T", "D")
            },
            Collaborators {
                edit: true,
                ..Collaborators::default()
            },
        );
        card.toggle_menu();
        assert_eq!(
            card.select_menu_action(MenuAction::Edit).effects,
            vec![CardEffect::Edit]
        );
        assert_eq!(card.mode(), CardMode::Viewing);
    }

    #[test]
    fn unlisted_menu_action_ignored() {
        let mut card = mount(props("T", "D"), Collaborators::default());
        card.toggle_menu();
        assert!(card.select_menu_action(MenuAction::Delete).is_empty());
        assert!(card.menu_open());
    }

    #[test]
    fn attachment_toggle_requires_item_id() {
        let mut card = mount(
            CardProps {
                item_id: None,
                ..props("T", "D")
            },
            Collaborators::default(),
        );
        card.toggle_attachments();
        assert!(!card.expanded());
        assert_eq!(card.attachment_view(), AttachmentView::Hidden);
    }

    #[test]
    fn attachment_toggle_independent_of_mode() {
        let mut card = mount(props("T", "D"), Collaborators::default());
        card.begin_edit();
        card.toggle_attachments();
        assert!(card.expanded());
        card.commit();
        assert!(card.expanded());
        card.toggle_attachments();
        assert!(!card.expanded());
        assert_eq!(card.attachment_view(), AttachmentView::Collapsed { count: 0 });
    }

    #[test]
    fn expanded_empty_panel_message() {
        let mut card = mount(props("T", "D"), Collaborators::default());
        card.toggle_attachments();
        assert_eq!(
            card.attachment_view(),
            AttachmentView::Empty {
                message: "No files attached".to_string()
            }
        );
        assert_eq!(card.files_badge(), "Files (0)");
    }

    #[test]
    fn remove_attachment_requires_editable_and_collaborator() {
        let attachment =
            Attachment::new("a.png", "file:///tmp/a.png", "image/png").unwrap();
        let id = attachment.id;

        let mut card = mount(
            CardProps {
                attachments: vec![attachment.clone()],
                ..props("T", "D")
            },
            Collaborators {
                file_remove: true,
                ..Collaborators::default()
            },
        );
        assert_eq!(
            card.remove_attachment(id).effects,
            vec![CardEffect::FileRemove { id }]
        );
        assert!(card.remove_attachment(AttachmentId::new()).is_empty());

        let mut read_only = mount(
            CardProps {
                editable: false,
                attachments: vec![attachment],
                ..props("T", "D")
            },
            Collaborators {
                file_remove: true,
                ..Collaborators::default()
            },
        );
        assert!(read_only.remove_attachment(id).is_empty());
    }

    #[test]
    fn add_files_requires_collaborator() {
        let files = vec![FileUpload::new("a.pdf", "application/pdf", 10)];

        let mut card = mount(props("T", "D"), Collaborators::default());
        assert!(card.add_files(files.clone()).is_empty());

        let mut card = mount(
            props("T", "D"),
            Collaborators {
                files_added: true,
                ..Collaborators::default()
            },
        );
        assert!(card.add_files(Vec::new()).is_empty());
        assert_eq!(
            card.add_files(files.clone()).effects,
            vec![CardEffect::FilesAdded { files }]
        );
    }

    #[test]
    fn remove_attachment_ignored_without_item_id() {
        let attachment =
            Attachment::new("a.png", "file:///tmp/a.png", "image/png").unwrap();
        let id = attachment.id;

        let mut card = mount(
            CardProps {
                item_id: None,
                attachments: vec![attachment],
                ..props("T", "D")
            },
            Collaborators::all(),
        );
        assert_eq!(card.attachment_view(), AttachmentView::Hidden);
        assert!(card.remove_attachment(id).is_empty());
    }

    #[test]
    fn attachment_inputs_ignored_while_confirmation_pending() {
        let attachment =
            Attachment::new("a.png", "file:///tmp/a.png", "image/png").unwrap();
        let id = attachment.id;

        let mut card = mount(
            CardProps {
                attachments: vec![attachment],
                ..props("T", "D")
            },
            Collaborators::all(),
        );
        card.begin_edit();
        card.set_draft_title("T2");
        card.cancel();
        assert!(card.pending_confirmation().is_some());

        assert!(card.toggle_attachments().is_empty());
        assert!(!card.snapshot().expanded);
        assert!(card.remove_attachment(id).is_empty());
        assert!(card
            .add_files(vec![FileUpload::new("b.txt", "text/plain", 4)])
            .is_empty());

        card.resolve_confirmation(false);
        assert_eq!(
            card.remove_attachment(id).effects,
            vec![CardEffect::FileRemove { id }]
        );
    }

    #[test]
    fn set_attachments_replaces_list() {
        let mut card = mount(props("T", "D"), Collaborators::default());
        let attachment =
            Attachment::new("b.txt", "file:///tmp/b.txt", "text/plain").unwrap();
        card.set_attachments(vec![attachment.clone()]);
        assert_eq!(card.attachments(), &[attachment]);
        assert_eq!(card.files_badge(), "Files (1)");
    }

    #[test]
    fn display_text_uses_fallback_and_placeholders() {
        let mut card = mount(props("", "Body"), Collaborators::default());
        assert_eq!(
            card.display_title(),
            DisplayText {
                text: "N/A".to_string(),
                muted: true,
                hint: None,
            }
        );
        assert_eq!(card.display_description().text, "Body");

        card.begin_edit();
        assert_eq!(
            card.display_title(),
            DisplayText {
                text: String::new(),
                muted: true,
                hint: Some("Item title".to_string()),
            }
        );
        assert_eq!(
            card.display_description().hint.as_deref(),
            Some("Item description")
        );
    }

    #[test]
    fn scenario_dirty_cancel_decline_then_accept() {
        let mut card = mount(
            CardProps {
                title: Some("Draft".to_string()),
                description: Some(String::new()),
                ..props("", "")
            },
            Collaborators::default(),
        );
        card.begin_edit();
        card.set_draft_title("Draft v2");

        assert!(matches!(
            card.cancel().effects.as_slice(),
            [CardEffect::RequestConfirmation { .. }]
        ));
        card.resolve_confirmation(false);
        assert_eq!(card.mode(), CardMode::Editing);
        assert_eq!(card.draft_title(), "Draft v2");

        card.cancel();
        card.resolve_confirmation(true);
        assert_eq!(card.title(), "Draft");
        assert_eq!(card.mode(), CardMode::Viewing);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut card = mount(props("T", "D"), Collaborators::default());
        card.begin_edit();
        card.set_draft_title("T2");
        card.cancel();

        let snapshot = card.snapshot();
        assert_eq!(snapshot.mode, CardMode::Editing);
        assert_eq!(snapshot.draft_title, "T2");
        assert_eq!(snapshot.pending_confirmation.as_deref(), Some(PROMPT));
        assert!(!snapshot.menu_open);
    }
}

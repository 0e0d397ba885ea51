//! Interaction scripts replayed by `cardkit replay`.

use serde::Deserialize;
use serde_json::{Map, Value};

use cardkit_core::card::{CardKey, CardProps, Collaborators, MenuAction, PointerTarget};
use cardkit_core::models::{Attachment, AttachmentId, FileUpload};

use crate::error::CliError;

/// A card to mount plus the inputs to feed it, in order.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub card: CardProps,
    #[serde(default)]
    pub collaborators: Collaborators,
    /// Fields laid over the loaded card configuration for this script.
    #[serde(default)]
    pub config: Option<Map<String, Value>>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json_str(payload: &str) -> Result<Self, CliError> {
        serde_json::from_str(payload).map_err(|error| CliError::Script(error.to_string()))
    }
}

/// One user or owner input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case", deny_unknown_fields)]
pub enum Step {
    BeginEdit,
    SetTitle {
        text: String,
    },
    SetDescription {
        text: String,
    },
    Commit,
    Cancel,
    Confirm {
        accept: bool,
    },
    Key {
        key: CardKey,
    },
    DoubleClick,
    ToggleMenu,
    CloseMenu,
    /// `Escape` seen by the document listeners rather than a field.
    EscapeDocument,
    PointerDown {
        target: PointerTarget,
    },
    Select {
        action: MenuAction,
    },
    ToggleFiles,
    RemoveFile {
        #[serde(default)]
        id: Option<AttachmentId>,
        #[serde(default)]
        name: Option<String>,
    },
    AddFiles {
        files: Vec<FileUpload>,
    },
    SetFiles {
        attachments: Vec<Attachment>,
    },
    Saving {
        value: bool,
    },
    Sync {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
}

impl Step {
    /// Short human label used in text output.
    pub fn label(&self) -> String {
        match self {
            Self::BeginEdit => "begin_edit".to_string(),
            Self::SetTitle { text } => format!("set_title {text:?}"),
            Self::SetDescription { text } => format!("set_description {text:?}"),
            Self::Commit => "commit".to_string(),
            Self::Cancel => "cancel".to_string(),
            Self::Confirm { accept } => format!("confirm accept={accept}"),
            Self::Key { key } => format!("key {key:?}"),
            Self::DoubleClick => "double_click".to_string(),
            Self::ToggleMenu => "toggle_menu".to_string(),
            Self::CloseMenu => "close_menu".to_string(),
            Self::EscapeDocument => "escape_document".to_string(),
            Self::PointerDown { target } => format!("pointer_down {target:?}"),
            Self::Select { action } => format!("select {}", action.label()),
            Self::ToggleFiles => "toggle_files".to_string(),
            Self::RemoveFile { id, name } => match (id, name) {
                (Some(id), _) => format!("remove_file {id}"),
                (None, Some(name)) => format!("remove_file {name:?}"),
                (None, None) => "remove_file".to_string(),
            },
            Self::AddFiles { files } => format!("add_files ({})", files.len()),
            Self::SetFiles { attachments } => format!("set_files ({})", attachments.len()),
            Self::Saving { value } => format!("saving {value}"),
            Self::Sync { .. } => "sync".to_string(),
        }
    }
}

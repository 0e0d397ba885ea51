//! Attachment model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::util::{is_image_mime_type, normalize_text_option};

/// A unique identifier for an attachment, using UUID v7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentId(Uuid);

impl AttachmentId {
    /// Create a new unique attachment ID using UUID v7.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID.
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for AttachmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AttachmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A file associated with an item card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique attachment identifier.
    #[serde(default)]
    pub id: AttachmentId,
    /// Display file name.
    pub name: String,
    /// Location the preview is loaded from.
    pub url: String,
    /// Content MIME type.
    pub mime_type: String,
}

impl Attachment {
    /// Create a new attachment record.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        let url = url.into().trim().to_string();
        let mime_type = mime_type.into().trim().to_string();

        if name.is_empty() {
            return Err(Error::InvalidInput(
                "Attachment name cannot be empty".to_string(),
            ));
        }
        if url.is_empty() {
            return Err(Error::InvalidInput(
                "Attachment url cannot be empty".to_string(),
            ));
        }
        if mime_type.is_empty() {
            return Err(Error::InvalidInput(
                "Attachment mime_type cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: AttachmentId::new(),
            name,
            url,
            mime_type,
        })
    }

    /// Whether the attachment should render as an image preview.
    #[must_use]
    pub fn is_image(&self) -> bool {
        is_image_mime_type(&self.mime_type)
    }
}

/// A file the user picked or dropped onto a card, before the owner stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    /// Original file name.
    pub name: String,
    /// Detected MIME type.
    pub mime_type: String,
    /// File size in bytes.
    #[serde(default)]
    pub size_bytes: u64,
    /// Where the picked file can be read from, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl FileUpload {
    /// Describe a picked file.
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            location: None,
        }
    }

    /// Attach the location the file was picked from.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Store the upload as an attachment.
    ///
    /// Uploads without a location get a `memory://` url so they still render
    /// as a tile.
    pub fn into_attachment(self) -> Result<Attachment> {
        let url = normalize_text_option(self.location)
            .unwrap_or_else(|| format!("memory://{}", self.name.trim()));
        Attachment::new(self.name, url, self.mime_type)
    }
}

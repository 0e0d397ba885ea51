//! Item model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::attachment::Attachment;

/// A unique identifier for an item, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Create a new unique item ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// An item owned by a parent list and rendered as a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Card title
    pub title: String,
    /// Card description
    pub description: String,
    /// Files associated with the item, in display order
    pub attachments: Vec<Attachment>,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

impl Item {
    /// Create a new item with the given text
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: ItemId::new(),
            title: title.into(),
            description: description.into(),
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an empty, never-saved item
    #[must_use]
    pub fn blank() -> Self {
        Self::new("", "")
    }

    /// Copy this item under a fresh identifier
    #[must_use]
    pub fn duplicate(&self) -> Self {
        let mut copy = Self::new(self.title.clone(), self.description.clone());
        copy.attachments.clone_from(&self.attachments);
        copy
    }

    /// Apply committed card text
    pub fn update_text(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.title = title.into();
        self.description = description.into();
        self.touch();
    }

    /// Bump the update timestamp
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }

    /// An item with neither title nor description has never been saved
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.description.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_unique() {
        let id1 = ItemId::new();
        let id2 = ItemId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_item_id_parse() {
        let id = ItemId::new();
        let parsed: ItemId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_item_new() {
        let item = Item::new("Groceries", "Milk and eggs");
        assert_eq!(item.title, "Groceries");
        assert_eq!(item.description, "Milk and eggs");
        assert!(item.attachments.is_empty());
        assert!(item.created_at > 0);
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn test_blank_item() {
        assert!(Item::blank().is_blank());
        assert!(!Item::new("Title", "").is_blank());
        // whitespace is content: the card compares raw text
        assert!(!Item::new(" ", "").is_blank());
    }

    #[test]
    fn test_duplicate_keeps_content() {
        let mut item = Item::new("Plan", "Outline");
        item.attachments.push(
            Attachment::new("plan.png", "file:///tmp/plan.png", "image/png").unwrap(),
        );

        let copy = item.duplicate();
        assert_ne!(copy.id, item.id);
        assert_eq!(copy.title, item.title);
        assert_eq!(copy.description, item.description);
        assert_eq!(copy.attachments, item.attachments);
    }

    #[test]
    fn test_update_text_touches() {
        let mut item = Item::new("Old", "");
        let before = item.updated_at;
        item.update_text("New", "Body");
        assert_eq!(item.title, "New");
        assert_eq!(item.description, "Body");
        assert!(item.updated_at >= before);
    }
}

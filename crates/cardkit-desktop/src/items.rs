//! Item list operations backing the parent list's card callbacks.
//!
//! Kept free of Dioxus types so they can be unit tested.

use cardkit_core::models::{AttachmentId, FileUpload, Item, ItemId};

fn position(items: &[Item], id: ItemId) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

/// Seed items shown when the window opens.
#[must_use]
pub fn demo_items() -> Vec<Item> {
    vec![
        Item::new("Groceries", "Milk, eggs and coffee beans"),
        Item::new("Quarterly report", "Draft the summary section"),
        Item::new("Ideas", ""),
    ]
}

/// Insert a blank item at the top and return its id.
pub fn insert_blank(items: &mut Vec<Item>) -> ItemId {
    let item = Item::blank();
    let id = item.id;
    items.insert(0, item);
    id
}

/// Apply committed card text. Returns false if the item is gone.
pub fn save_text(items: &mut [Item], id: ItemId, title: &str, description: &str) -> bool {
    let Some(index) = position(items, id) else {
        return false;
    };
    items[index].update_text(title, description);
    true
}

/// Insert a copy right after the original and return the copy's id.
pub fn duplicate(items: &mut Vec<Item>, id: ItemId) -> Option<ItemId> {
    let index = position(items, id)?;
    let copy = items[index].duplicate();
    let copy_id = copy.id;
    items.insert(index + 1, copy);
    Some(copy_id)
}

pub fn remove(items: &mut Vec<Item>, id: ItemId) -> bool {
    let Some(index) = position(items, id) else {
        return false;
    };
    items.remove(index);
    true
}

/// Remove the item only if it was never saved.
pub fn discard_if_blank(items: &mut Vec<Item>, id: ItemId) -> bool {
    match position(items, id) {
        Some(index) if items[index].is_blank() => {
            items.remove(index);
            true
        }
        _ => false,
    }
}

/// Store uploads as attachments. Returns how many were added.
pub fn add_uploads(items: &mut [Item], id: ItemId, uploads: Vec<FileUpload>) -> usize {
    let Some(index) = position(items, id) else {
        return 0;
    };

    let mut added = 0;
    for upload in uploads {
        match upload.into_attachment() {
            Ok(attachment) => {
                items[index].attachments.push(attachment);
                added += 1;
            }
            Err(e) => tracing::warn!("Skipping upload: {}", e),
        }
    }
    if added > 0 {
        items[index].touch();
    }
    added
}

pub fn remove_attachment(items: &mut [Item], id: ItemId, attachment_id: AttachmentId) -> bool {
    let Some(index) = position(items, id) else {
        return false;
    };
    let item = &mut items[index];
    let before = item.attachments.len();
    item.attachments
        .retain(|attachment| attachment.id != attachment_id);
    let removed = item.attachments.len() != before;
    if removed {
        item.touch();
    }
    removed
}

/// Move the dragged item to the drop target's slot.
pub fn reorder(items: &mut Vec<Item>, dragged: ItemId, target: ItemId) -> bool {
    if dragged == target {
        return false;
    }
    let (Some(from), Some(to)) = (position(items, dragged), position(items, target)) else {
        return false;
    };
    let item = items.remove(from);
    items.insert(to, item);
    true
}

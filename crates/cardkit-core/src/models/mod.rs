//! Data models for cardkit

mod attachment;
mod item;

pub use attachment::{Attachment, AttachmentId, FileUpload};
pub use item::{Item, ItemId};

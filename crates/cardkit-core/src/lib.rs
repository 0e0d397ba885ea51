//! cardkit-core - Core library for cardkit
//!
//! This crate contains the item card interaction core: the edit-state
//! controller, the options menu dismissal watcher and the attachment panel,
//! plus the shared models and configuration used by the desktop and CLI
//! front ends.

pub mod card;
pub mod config;
pub mod error;
pub mod models;
pub mod util;

pub use card::{CardEffect, CardSession, Outcome};
pub use config::CardConfig;
pub use error::{Error, Result};
pub use models::{Attachment, AttachmentId, FileUpload, Item, ItemId};

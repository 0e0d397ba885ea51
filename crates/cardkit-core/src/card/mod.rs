//! Headless interaction core of an item card.
//!
//! A [`CardSession`] owns the card's local state: edit mode and drafts, the
//! options menu and its dismissal listeners, and the attachment panel. Inputs
//! are methods; each returns an [`Outcome`] listing the owner callbacks and
//! focus changes the host must apply.

mod attachments;
mod dismiss;
mod effect;
mod props;
mod session;

pub use attachments::{AttachmentPanel, AttachmentTile, AttachmentView, TilePreview};
pub use dismiss::{
    DismissListeners, DismissalWatcher, ListenerGuard, ManualListeners, MenuAction, PointerTarget,
};
pub use effect::{CardEffect, Outcome};
pub use props::{CardProps, Collaborators};
pub use session::{
    CardControls, CardKey, CardMode, CardSession, CardSnapshot, ConfirmRequest, DisplayText,
};

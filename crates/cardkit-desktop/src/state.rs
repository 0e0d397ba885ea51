//! Application state management
//!
//! Global state accessible via Dioxus context providers.

use dioxus::prelude::*;

use cardkit_core::models::{Item, ItemId};
use cardkit_core::CardConfig;

use crate::theme::ResolvedTheme;

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// Items shown as cards, in display order
    pub items: Signal<Vec<Item>>,
    /// Item created by "New item" that has not been saved yet
    pub fresh_item: Signal<Option<ItemId>>,
    /// Item whose save is in flight
    pub saving_item: Signal<Option<ItemId>>,
    /// Item currently being dragged by its handle
    pub dragging_item: Signal<Option<ItemId>>,
    /// Card text and timing configuration
    pub config: Signal<CardConfig>,
    /// Resolved theme
    pub theme: Signal<ResolvedTheme>,
}

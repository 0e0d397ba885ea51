//! UI Components
//!
//! Item card and the parent list that owns its callbacks.

mod attachment_grid;
mod card_menu;
mod confirm_dialog;
mod item_card;
mod item_list;

pub use item_card::{DragHandle, ItemCard};
pub use item_list::ItemList;

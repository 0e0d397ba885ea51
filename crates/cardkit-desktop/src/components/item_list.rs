//! Item list component
//!
//! Owns the items and implements every card callback against them.

use std::time::Duration;

use dioxus::prelude::*;

use cardkit_core::models::{AttachmentId, FileUpload, ItemId};

use super::item_card::{DragHandle, ItemCard};
use crate::items;
use crate::state::AppState;

/// How long the simulated save keeps a card busy.
const SAVE_LATENCY: Duration = Duration::from_millis(600);

/// List of item cards with a "New item" action
#[component]
pub fn ItemList() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let item_list = (state.items)();
    let fresh = (state.fresh_item)();
    let saving = (state.saving_item)();
    let dragging = (state.dragging_item)();

    let new_item = move |_| {
        if (state.fresh_item)().is_some() {
            return;
        }
        let id = items::insert_blank(&mut state.items.write());
        tracing::info!("Created item {}", id);
        state.fresh_item.set(Some(id));
    };

    rsx! {
        div {
            class: "item-list",
            style: "
                max-width: 640px;
                margin: 0 auto;
                padding: 24px 16px;
                display: flex;
                flex-direction: column;
                gap: 12px;
            ",

            div {
                style: "display: flex; align-items: center; justify-content: space-between;",
                h2 { style: "margin: 0; font-size: 18px; color: {colors.text_primary};", "Items" }
                button {
                    style: "
                        border: none;
                        background: {colors.accent};
                        color: {colors.accent_text};
                        border-radius: 6px;
                        padding: 6px 12px;
                        font-size: 13px;
                        cursor: pointer;
                    ",
                    onclick: new_item,
                    "New item"
                }
            }

            if item_list.is_empty() {
                div {
                    style: "padding: 20px; text-align: center; color: {colors.text_muted};",
                    "No items yet"
                }
            }

            for item in item_list {
                {
                    let item_id = item.id;
                    rsx! {
                        div {
                            key: "{item_id}",
                            ondragover: move |evt| evt.prevent_default(),
                            ondrop: move |evt| {
                                evt.prevent_default();
                                drop_on(state, item_id);
                            },
                            ItemCard {
                                item_id,
                                title: item.title.clone(),
                                description: item.description.clone(),
                                editable: true,
                                auto_focus: fresh == Some(item_id),
                                attachments: item.attachments.clone(),
                                is_saving: saving == Some(item_id),
                                is_dragging: dragging == Some(item_id),
                                drag_handle: DragHandle {
                                    on_drag_start: EventHandler::new(move |()| {
                                        state.dragging_item.set(Some(item_id));
                                    }),
                                    on_drag_end: EventHandler::new(move |()| {
                                        state.dragging_item.set(None);
                                    }),
                                },
                                on_save: move |(title, description): (String, String)| {
                                    save_item(state, item_id, &title, &description);
                                },
                                on_delete: move |()| {
                                    if items::remove(&mut state.items.write(), item_id) {
                                        tracing::info!("Deleted item {}", item_id);
                                    }
                                },
                                on_duplicate: move |()| {
                                    if let Some(copy) = items::duplicate(&mut state.items.write(), item_id) {
                                        tracing::info!("Duplicated item {} as {}", item_id, copy);
                                    }
                                },
                                on_cancel: move |()| {
                                    discard_item(state, item_id);
                                },
                                on_files_added: move |files: Vec<FileUpload>| {
                                    let added = items::add_uploads(&mut state.items.write(), item_id, files);
                                    tracing::info!("Attached {} files to item {}", added, item_id);
                                },
                                on_file_remove: move |attachment_id: AttachmentId| {
                                    if items::remove_attachment(&mut state.items.write(), item_id, attachment_id) {
                                        tracing::info!("Removed attachment {} from item {}", attachment_id, item_id);
                                    }
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}

fn save_item(mut state: AppState, id: ItemId, title: &str, description: &str) {
    if !items::save_text(&mut state.items.write(), id, title, description) {
        tracing::warn!("Save for missing item {}", id);
        return;
    }
    if (state.fresh_item)() == Some(id) {
        state.fresh_item.set(None);
    }

    state.saving_item.set(Some(id));
    spawn(async move {
        tokio::time::sleep(SAVE_LATENCY).await;
        if (state.saving_item)() == Some(id) {
            state.saving_item.set(None);
        }
        tracing::debug!("Item {} saved", id);
    });
}

fn discard_item(mut state: AppState, id: ItemId) {
    if (state.fresh_item)() == Some(id) {
        state.fresh_item.set(None);
    }
    if items::discard_if_blank(&mut state.items.write(), id) {
        tracing::info!("Discarded unsaved item {}", id);
    }
}

fn drop_on(mut state: AppState, target: ItemId) {
    let Some(dragged) = (state.dragging_item)() else {
        return;
    };
    state.dragging_item.set(None);
    if items::reorder(&mut state.items.write(), dragged, target) {
        tracing::debug!("Moved item {} onto {}", dragged, target);
    }
}

//! Item card component
//!
//! Renders a [`CardSession`] and turns its outcomes into owner callbacks and
//! DOM focus changes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dioxus::prelude::*;

use cardkit_core::card::{
    CardControls, CardEffect, CardKey, CardMode, CardProps, CardSession, Collaborators, Outcome,
};
use cardkit_core::models::{Attachment, AttachmentId, FileUpload, ItemId};

use super::attachment_grid::AttachmentGrid;
use super::card_menu::{trigger_dom_id, CardMenu, EvalDismissListeners, MenuEvent};
use super::confirm_dialog::ConfirmDialog;
use crate::state::AppState;

static NEXT_CARD: AtomicU64 = AtomicU64::new(1);

/// Drag affordance the owning list hands to a card's grip.
#[derive(Clone, Copy, PartialEq)]
pub struct DragHandle {
    pub on_drag_start: EventHandler<()>,
    pub on_drag_end: EventHandler<()>,
}

/// Owner callbacks registered on a card.
#[derive(Clone, Copy)]
struct CardCallbacks {
    on_save: Option<EventHandler<(String, String)>>,
    on_edit: Option<EventHandler<()>>,
    on_delete: Option<EventHandler<()>>,
    on_duplicate: Option<EventHandler<()>>,
    on_cancel: Option<EventHandler<()>>,
    on_files_added: Option<EventHandler<Vec<FileUpload>>>,
    on_file_remove: Option<EventHandler<AttachmentId>>,
}

impl CardCallbacks {
    const fn collaborators(&self) -> Collaborators {
        Collaborators {
            save: self.on_save.is_some(),
            edit: self.on_edit.is_some(),
            delete: self.on_delete.is_some(),
            duplicate: self.on_duplicate.is_some(),
            cancel: self.on_cancel.is_some(),
            files_added: self.on_files_added.is_some(),
            file_remove: self.on_file_remove.is_some(),
        }
    }
}

fn dom_key(card: u64) -> String {
    format!("card-{card}")
}

fn title_dom_id(card: u64) -> String {
    format!("cardkit-title-{card}")
}

fn description_dom_id(card: u64) -> String {
    format!("cardkit-description-{card}")
}

fn focus_script(element_id: &str) -> String {
    format!("document.getElementById({element_id:?})?.focus();")
}

fn blur_script(card: u64) -> String {
    format!(
        "for (const id of [{:?}, {:?}]) {{ document.getElementById(id)?.blur(); }}",
        title_dom_id(card),
        description_dom_id(card)
    )
}

fn card_key(key: &Key) -> CardKey {
    match key {
        Key::Enter => CardKey::Enter,
        Key::Escape => CardKey::Escape,
        _ => CardKey::Other,
    }
}

/// Raised shadow while the card is being dragged.
const fn card_shadow(is_dragging: bool) -> &'static str {
    if is_dragging {
        "0 8px 24px rgba(0, 0, 0, 0.18)"
    } else {
        "0 1px 3px rgba(0, 0, 0, 0.06)"
    }
}

fn apply_effects(outcome: Outcome, callbacks: CardCallbacks, card: u64) {
    for effect in outcome.effects {
        match effect {
            CardEffect::Save { title, description } => {
                if let Some(handler) = callbacks.on_save {
                    handler.call((title, description));
                }
            }
            CardEffect::Edit => {
                if let Some(handler) = callbacks.on_edit {
                    handler.call(());
                }
            }
            CardEffect::Delete => {
                if let Some(handler) = callbacks.on_delete {
                    handler.call(());
                }
            }
            CardEffect::Duplicate => {
                if let Some(handler) = callbacks.on_duplicate {
                    handler.call(());
                }
            }
            CardEffect::Cancel => {
                if let Some(handler) = callbacks.on_cancel {
                    handler.call(());
                }
            }
            CardEffect::FilesAdded { files } => {
                if let Some(handler) = callbacks.on_files_added {
                    handler.call(files);
                }
            }
            CardEffect::FileRemove { id } => {
                if let Some(handler) = callbacks.on_file_remove {
                    handler.call(id);
                }
            }
            CardEffect::FocusTitle { delay_ms } => {
                let script = focus_script(&title_dom_id(card));
                spawn(async move {
                    // let the editable fields render first
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    let _ = document::eval(&script);
                });
            }
            CardEffect::BlurFields => {
                let _ = document::eval(&blur_script(card));
            }
            CardEffect::FocusMenuTrigger => {
                let _ = document::eval(&focus_script(&trigger_dom_id(&dom_key(card))));
            }
            CardEffect::RequestConfirmation { .. } => {
                tracing::debug!("Card {} asking to discard edits", card);
            }
        }
    }
}

/// A single item rendered as an editable card.
#[allow(clippy::too_many_arguments)]
#[component]
pub fn ItemCard(
    item_id: Option<ItemId>,
    title: Option<String>,
    description: Option<String>,
    #[props(default)] editable: bool,
    #[props(default)] auto_focus: bool,
    #[props(default)] attachments: Vec<Attachment>,
    #[props(default)] is_saving: bool,
    #[props(default)] is_dragging: bool,
    drag_handle: Option<DragHandle>,
    on_save: Option<EventHandler<(String, String)>>,
    on_edit: Option<EventHandler<()>>,
    on_delete: Option<EventHandler<()>>,
    on_duplicate: Option<EventHandler<()>>,
    on_cancel: Option<EventHandler<()>>,
    on_files_added: Option<EventHandler<Vec<FileUpload>>>,
    on_file_remove: Option<EventHandler<AttachmentId>>,
) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let callbacks = CardCallbacks {
        on_save,
        on_edit,
        on_delete,
        on_duplicate,
        on_cancel,
        on_files_added,
        on_file_remove,
    };
    let card = use_hook(|| NEXT_CARD.fetch_add(1, Ordering::Relaxed));

    let mut session = use_hook(|| {
        let props = CardProps {
            item_id,
            title: title.clone(),
            description: description.clone(),
            editable,
            auto_focus,
            attachments: attachments.clone(),
            drag_handle: drag_handle.is_some(),
            is_saving,
        };
        let (session, outcome) =
            CardSession::mount(props, callbacks.collaborators(), (state.config)());
        let mut session = Signal::new(session);

        let on_menu_event = Callback::new(move |event: MenuEvent| {
            let outcome = match event {
                MenuEvent::Pointer(target) => session.write().pointer_down(target),
                MenuEvent::Escape => session.write().document_key(CardKey::Escape),
            };
            apply_effects(outcome, callbacks, card);
        });
        session
            .write()
            .set_listeners(Box::new(EvalDismissListeners::new(dom_key(card), on_menu_event)));

        apply_effects(outcome, callbacks, card);
        session
    });

    use_effect(use_reactive(
        (&title, &description),
        move |(title, description)| {
            session.write().sync_props(title, description);
        },
    ));
    use_effect(use_reactive(
        (&attachments, &is_saving),
        move |(attachments, is_saving)| {
            let mut current = session.write();
            current.set_attachments(attachments);
            current.set_saving(is_saving);
        },
    ));

    let (mode, title_text, description_text, controls, attachment_view, badge, pending, can_add) = {
        let current = session.read();
        (
            current.mode(),
            current.display_title(),
            current.display_description(),
            current.controls(),
            current.attachment_view(),
            current.files_badge(),
            current.pending_confirmation().map(|request| request.prompt.clone()),
            current.accepts_files(),
        )
    };
    let editing = mode == CardMode::Editing;
    let title_color = if title_text.muted {
        colors.text_muted
    } else {
        colors.text_primary
    };
    let description_color = if description_text.muted {
        colors.text_muted
    } else {
        colors.text_secondary
    };
    let border = if editing { colors.accent } else { colors.border };

    let on_field_key = move |evt: Event<KeyboardData>| {
        let outcome = session.write().handle_key(card_key(&evt.key()));
        if outcome.suppress_default {
            evt.prevent_default();
            evt.stop_propagation();
        }
        apply_effects(outcome, callbacks, card);
    };

    let on_body_double_click = move |_: Event<MouseData>| {
        let outcome = session.write().double_click_body();
        apply_effects(outcome, callbacks, card);
    };

    rsx! {
        div {
            class: if editing { "item-card editing" } else { "item-card" },
            style: "
                position: relative;
                background: {colors.bg_primary};
                border: 1px solid {border};
                border-radius: 10px;
                padding: 12px 14px;
                box-shadow: {card_shadow(is_dragging)};
            ",

            div {
                style: "display: flex; align-items: flex-start; gap: 8px;",

                if let Some(handle) = drag_handle {
                    div {
                        draggable: "true",
                        title: "Drag to reorder",
                        style: "cursor: grab; color: {colors.text_muted}; padding-top: 2px; user-select: none;",
                        ondragstart: move |_| handle.on_drag_start.call(()),
                        ondragend: move |_| handle.on_drag_end.call(()),
                        "⠿"
                    }
                }

                div {
                    style: "flex: 1; min-width: 0;",
                    ondoubleclick: on_body_double_click,
                    if editing {
                        input {
                            id: "{title_dom_id(card)}",
                            r#type: "text",
                            value: "{title_text.text}",
                            placeholder: "{title_text.hint.clone().unwrap_or_default()}",
                            style: "
                                width: 100%;
                                box-sizing: border-box;
                                font-size: 15px;
                                font-weight: 600;
                                border: none;
                                outline: none;
                                background: transparent;
                                color: {colors.text_primary};
                            ",
                            oninput: move |evt| {
                                session.write().set_draft_title(evt.value());
                            },
                            onkeydown: on_field_key,
                        }
                    } else {
                        div {
                            style: "font-size: 15px; font-weight: 600; color: {title_color}; overflow-wrap: anywhere;",
                            "{title_text.text}"
                        }
                    }
                }

                {match controls {
                    CardControls::Hidden => rsx! {},
                    CardControls::EditActions => rsx! {
                        div {
                            style: "display: flex; gap: 4px;",
                            button {
                                title: "Save",
                                style: "
                                    border: none;
                                    background: {colors.accent};
                                    color: {colors.accent_text};
                                    border-radius: 6px;
                                    padding: 3px 10px;
                                    font-size: 12px;
                                    cursor: pointer;
                                ",
                                onclick: move |_| {
                                    let outcome = session.write().commit();
                                    apply_effects(outcome, callbacks, card);
                                },
                                "Save"
                            }
                            button {
                                title: "Cancel",
                                style: "
                                    border: 1px solid {colors.border};
                                    background: transparent;
                                    color: {colors.text_secondary};
                                    border-radius: 6px;
                                    padding: 3px 10px;
                                    font-size: 12px;
                                    cursor: pointer;
                                ",
                                onclick: move |_| {
                                    let outcome = session.write().cancel();
                                    apply_effects(outcome, callbacks, card);
                                },
                                "Cancel"
                            }
                        }
                    },
                    CardControls::Menu { open, busy, items } => rsx! {
                        CardMenu {
                            dom_key: dom_key(card),
                            open,
                            busy,
                            items,
                            on_toggle: move |()| {
                                let outcome = session.write().toggle_menu();
                                apply_effects(outcome, callbacks, card);
                            },
                            on_select: move |action| {
                                let outcome = session.write().select_menu_action(action);
                                apply_effects(outcome, callbacks, card);
                            },
                        }
                    },
                }}
            }

            div {
                style: "margin-top: 6px;",
                ondoubleclick: on_body_double_click,
                if editing {
                    textarea {
                        id: "{description_dom_id(card)}",
                        value: "{description_text.text}",
                        placeholder: "{description_text.hint.clone().unwrap_or_default()}",
                        rows: "3",
                        style: "
                            width: 100%;
                            box-sizing: border-box;
                            font-size: 13px;
                            font-family: inherit;
                            border: 1px solid {colors.border};
                            border-radius: 6px;
                            padding: 6px 8px;
                            resize: vertical;
                            outline: none;
                            background: {colors.bg_secondary};
                            color: {colors.text_primary};
                        ",
                        oninput: move |evt| {
                            session.write().set_draft_description(evt.value());
                        },
                        onkeydown: on_field_key,
                    }
                } else {
                    div {
                        style: "font-size: 13px; color: {description_color}; white-space: pre-wrap; overflow-wrap: anywhere;",
                        "{description_text.text}"
                    }
                }
            }

            AttachmentGrid {
                badge,
                view: attachment_view,
                can_add,
                on_toggle: move |()| {
                    session.write().toggle_attachments();
                },
                on_remove: move |id| {
                    let outcome = session.write().remove_attachment(id);
                    apply_effects(outcome, callbacks, card);
                },
                on_add: move |files| {
                    let outcome = session.write().add_files(files);
                    apply_effects(outcome, callbacks, card);
                },
            }

            if let Some(prompt) = pending {
                ConfirmDialog {
                    prompt,
                    on_answer: move |accepted| {
                        let outcome = session.write().resolve_confirmation(accepted);
                        apply_effects(outcome, callbacks, card);
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn keys_map_to_card_keys() {
        assert_eq!(card_key(&Key::Enter), CardKey::Enter);
        assert_eq!(card_key(&Key::Escape), CardKey::Escape);
        assert_eq!(card_key(&Key::Character("a".to_string())), CardKey::Other);
    }

    #[test]
    fn scripts_address_card_fields() {
        assert_eq!(
            focus_script(&title_dom_id(3)),
            r#"document.getElementById("cardkit-title-3")?.focus();"#
        );
        let blur = blur_script(3);
        assert!(blur.contains(r#""cardkit-title-3""#));
        assert!(blur.contains(r#""cardkit-description-3""#));
    }

    #[test]
    fn dragging_card_is_raised() {
        assert_ne!(card_shadow(true), card_shadow(false));
        assert!(card_shadow(true).contains("24px"));
    }

    #[test]
    fn callbacks_register_collaborators() {
        let callbacks = CardCallbacks {
            on_save: None,
            on_edit: None,
            on_delete: None,
            on_duplicate: None,
            on_cancel: None,
            on_files_added: None,
            on_file_remove: None,
        };
        assert_eq!(callbacks.collaborators(), Collaborators::default());
    }
}

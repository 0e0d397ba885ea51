//! Options menu of an item card and its document-level dismiss listeners.

use std::rc::Rc;

use dioxus::document::{self, Document};
use dioxus::prelude::*;
use serde::Deserialize;

use cardkit_core::card::{DismissListeners, ListenerGuard, MenuAction, PointerTarget};

use crate::state::AppState;

/// Installs `mousedown` and `keydown` listeners on the document and reports
/// which of the card's menu elements a pointer landed in. Calling the
/// registered detach function removes both listeners and ends the stream.
const ATTACH_SCRIPT: &str = r#"
const key = "__CARD__";
const inside = (id, target) => {
    const el = document.getElementById(id);
    return !!el && el.contains(target);
};
const onPointer = (event) => {
    let target = "outside";
    if (inside("cardkit-menu-" + key, event.target)) {
        target = "menu";
    } else if (inside("cardkit-trigger-" + key, event.target)) {
        target = "trigger";
    }
    dioxus.send({ kind: "pointer", target });
};
const onKey = (event) => {
    if (event.key === "Escape") {
        dioxus.send({ kind: "escape" });
    }
};
document.addEventListener("mousedown", onPointer);
document.addEventListener("keydown", onKey);
window.__cardkitDismiss = window.__cardkitDismiss || {};
window.__cardkitDismiss[key] = () => {
    document.removeEventListener("mousedown", onPointer);
    document.removeEventListener("keydown", onKey);
    delete window.__cardkitDismiss[key];
    dioxus.send({ kind: "detached" });
};
await new Promise(() => {});
"#;

const DETACH_SCRIPT: &str = r#"
const detach = window.__cardkitDismiss && window.__cardkitDismiss["__CARD__"];
if (detach) { detach(); }
"#;

/// Document event relevant to an open menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Pointer(PointerTarget),
    Escape,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ListenerMessage {
    Pointer { target: PointerTarget },
    Escape,
    Detached,
}

fn script_for(template: &str, dom_key: &str) -> String {
    template.replace("__CARD__", dom_key)
}

/// Dismiss listeners backed by `document::eval`.
///
/// Each `attach` starts a script that streams document events back to
/// `on_event`; the returned guard runs the detach script.
pub struct EvalDismissListeners {
    dom_key: String,
    document: Rc<dyn Document>,
    on_event: Callback<MenuEvent>,
}

impl EvalDismissListeners {
    pub fn new(dom_key: impl Into<String>, on_event: Callback<MenuEvent>) -> Self {
        Self {
            dom_key: dom_key.into(),
            document: document::document(),
            on_event,
        }
    }
}

impl DismissListeners for EvalDismissListeners {
    fn attach(&mut self) -> ListenerGuard {
        let mut eval = self.document.eval(script_for(ATTACH_SCRIPT, &self.dom_key));
        let on_event = self.on_event;
        let dom_key = self.dom_key.clone();

        spawn(async move {
            loop {
                match eval.recv::<ListenerMessage>().await {
                    Ok(ListenerMessage::Pointer { target }) => {
                        on_event.call(MenuEvent::Pointer(target));
                    }
                    Ok(ListenerMessage::Escape) => on_event.call(MenuEvent::Escape),
                    Ok(ListenerMessage::Detached) => break,
                    Err(e) => {
                        tracing::warn!("Dismiss listener stream for {} ended: {:?}", dom_key, e);
                        break;
                    }
                }
            }
        });

        let document = Rc::clone(&self.document);
        let detach = script_for(DETACH_SCRIPT, &self.dom_key);
        ListenerGuard::new(move || {
            let _ = document.eval(detach);
        })
    }
}

pub fn menu_dom_id(dom_key: &str) -> String {
    format!("cardkit-menu-{dom_key}")
}

pub fn trigger_dom_id(dom_key: &str) -> String {
    format!("cardkit-trigger-{dom_key}")
}

/// Icon shown on the trigger: a spinner glyph while the owner is saving.
pub const fn trigger_glyph(busy: bool) -> &'static str {
    if busy {
        "\u{21bb}"
    } else {
        "\u{22ee}"
    }
}

/// Menu trigger plus the dropdown panel when open.
#[component]
pub fn CardMenu(
    dom_key: String,
    open: bool,
    busy: bool,
    items: Vec<MenuAction>,
    on_toggle: EventHandler<()>,
    on_select: EventHandler<MenuAction>,
) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let trigger_id = trigger_dom_id(&dom_key);
    let menu_id = menu_dom_id(&dom_key);
    let cursor = if busy { "progress" } else { "pointer" };

    rsx! {
        div {
            style: "position: relative;",

            button {
                id: "{trigger_id}",
                title: "Options",
                disabled: busy,
                style: "
                    border: none;
                    background: transparent;
                    color: {colors.text_secondary};
                    font-size: 16px;
                    width: 28px;
                    height: 28px;
                    border-radius: 6px;
                    cursor: {cursor};
                ",
                onclick: move |evt| {
                    evt.stop_propagation();
                    on_toggle.call(());
                },
                "{trigger_glyph(busy)}"
            }

            if open {
                div {
                    id: "{menu_id}",
                    role: "menu",
                    style: "
                        position: absolute;
                        right: 0;
                        top: 32px;
                        min-width: 140px;
                        background: {colors.bg_primary};
                        border: 1px solid {colors.border};
                        border-radius: 8px;
                        box-shadow: 0 6px 20px rgba(0, 0, 0, 0.15);
                        padding: 4px;
                        z-index: 10;
                    ",
                    for action in items {
                        button {
                            key: "{action.label()}",
                            role: "menuitem",
                            style: "
                                display: block;
                                width: 100%;
                                text-align: left;
                                border: none;
                                background: transparent;
                                padding: 6px 10px;
                                border-radius: 6px;
                                cursor: pointer;
                                color: {item_color(action, colors.error, colors.text_primary)};
                            ",
                            onclick: move |evt| {
                                evt.stop_propagation();
                                on_select.call(action);
                            },
                            "{action.label()}"
                        }
                    }
                }
            }
        }
    }
}

const fn item_color(action: MenuAction, destructive: &'static str, normal: &'static str) -> &'static str {
    if action.is_destructive() {
        destructive
    } else {
        normal
    }
}

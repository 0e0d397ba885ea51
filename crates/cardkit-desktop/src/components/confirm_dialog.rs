//! Modal yes/no prompt for discarding unsaved card edits.

use dioxus::prelude::*;

use crate::state::AppState;

/// Blocks the window until the user answers. `Escape` declines.
#[component]
pub fn ConfirmDialog(prompt: String, on_answer: EventHandler<bool>) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    rsx! {
        div {
            role: "alertdialog",
            tabindex: "-1",
            style: "
                position: fixed;
                inset: 0;
                background: {colors.overlay};
                display: flex;
                align-items: center;
                justify-content: center;
                z-index: 100;
            ",
            onmounted: move |evt| async move {
                let _ = evt.set_focus(true).await;
            },
            onkeydown: move |evt: Event<KeyboardData>| {
                if evt.key() == Key::Escape {
                    evt.stop_propagation();
                    on_answer.call(false);
                }
            },
            onclick: move |evt| evt.stop_propagation(),
            ondoubleclick: move |evt| evt.stop_propagation(),

            div {
                style: "
                    max-width: 360px;
                    background: {colors.bg_primary};
                    color: {colors.text_primary};
                    border: 1px solid {colors.border};
                    border-radius: 10px;
                    padding: 18px;
                    box-shadow: 0 12px 32px rgba(0, 0, 0, 0.25);
                ",
                p { style: "margin: 0 0 16px 0; font-size: 14px; line-height: 1.5;", "{prompt}" }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px;",
                    button {
                        style: "
                            padding: 5px 12px;
                            font-size: 13px;
                            border: 1px solid {colors.border};
                            background: {colors.bg_secondary};
                            color: {colors.text_primary};
                            border-radius: 6px;
                            cursor: pointer;
                        ",
                        onclick: move |_| on_answer.call(false),
                        "Keep editing"
                    }
                    button {
                        style: "
                            padding: 5px 12px;
                            font-size: 13px;
                            border: none;
                            background: {colors.error};
                            color: #ffffff;
                            border-radius: 6px;
                            cursor: pointer;
                        ",
                        onclick: move |_| on_answer.call(true),
                        "Discard changes"
                    }
                }
            }
        }
    }
}

//! Main application component

use dioxus::prelude::*;

use cardkit_core::CardConfig;

use crate::components::ItemList;
use crate::items::demo_items;
use crate::state::AppState;
use crate::theme::{preference_from_env, resolve_theme};

/// Root application component
#[component]
pub fn App() -> Element {
    let launch_config = use_context::<CardConfig>();

    let items = use_signal(demo_items);
    let fresh_item = use_signal(|| None);
    let saving_item = use_signal(|| None);
    let dragging_item = use_signal(|| None);
    let config = use_signal(move || launch_config);
    let theme = use_signal(|| resolve_theme(preference_from_env()));

    use_context_provider(|| AppState {
        items,
        fresh_item,
        saving_item,
        dragging_item,
        config,
        theme,
    });

    let colors = theme().palette();

    rsx! {
        div {
            class: "app-container",
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
                font-size: 14px;
                background: {colors.bg_tertiary};
                color: {colors.text_primary};
            ",
            ItemList {}
        }
    }
}

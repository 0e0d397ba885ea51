//! cardkit desktop shell
//!
//! A window showing a list of item cards with inline editing, options menus
//! and attachment panels.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod items;
mod state;
mod theme;

use std::path::PathBuf;

use cardkit_core::CardConfig;
use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "cardkit_desktop=debug,cardkit_core=debug";

/// Card configuration named by `CARDKIT_CONFIG`, or defaults.
fn load_card_config() -> CardConfig {
    let Some(path) = std::env::var_os("CARDKIT_CONFIG").map(PathBuf::from) else {
        return CardConfig::default();
    };
    match CardConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
            CardConfig::default()
        }
    }
}

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    tracing::info!("Starting cardkit...");
    let card_config = load_card_config();

    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("cardkit")
            .with_inner_size(LogicalSize::new(720.0, 760.0)),
    );

    dioxus::LaunchBuilder::new()
        .with_cfg(config)
        .with_context(card_config)
        .launch(app::App);
}

//! Attachment toggle, preview grid and file picker of an item card.

use dioxus::prelude::*;
use rfd::AsyncFileDialog;

use cardkit_core::card::{AttachmentTile, AttachmentView, TilePreview};
use cardkit_core::models::{AttachmentId, FileUpload};

use crate::state::AppState;
use crate::theme::ColorPalette;

/// Guess a MIME type from a file name, falling back to a generic binary type.
pub fn guess_mime_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Let the user pick files and describe them as uploads.
pub async fn pick_uploads() -> Vec<FileUpload> {
    let Some(handles) = AsyncFileDialog::new().pick_files().await else {
        return Vec::new();
    };

    handles
        .into_iter()
        .filter(|handle| !handle.file_name().trim().is_empty())
        .map(|handle| {
            let name = handle.file_name();
            let path = handle.path();
            let size_bytes = std::fs::metadata(path).map_or(0, |meta| meta.len());
            FileUpload::new(name.clone(), guess_mime_type(&name), size_bytes)
                .with_location(format!("file://{}", path.display()))
        })
        .collect()
}

/// `Files (n)` toggle followed by the panel body.
#[component]
pub fn AttachmentGrid(
    badge: String,
    view: AttachmentView,
    can_add: bool,
    on_toggle: EventHandler<()>,
    on_remove: EventHandler<AttachmentId>,
    on_add: EventHandler<Vec<FileUpload>>,
) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    if view == AttachmentView::Hidden {
        return rsx! {};
    }
    let expanded = !matches!(view, AttachmentView::Collapsed { .. });

    let pick_files = move |evt: MouseEvent| {
        evt.stop_propagation();
        spawn(async move {
            let uploads = pick_uploads().await;
            tracing::debug!("Picked {} files", uploads.len());
            if !uploads.is_empty() {
                on_add.call(uploads);
            }
        });
    };

    rsx! {
        div {
            style: "margin-top: 10px;",

            div {
                style: "display: flex; align-items: center; gap: 8px;",
                button {
                    style: "
                        border: 1px solid {colors.border};
                        background: {colors.bg_secondary};
                        color: {colors.text_secondary};
                        font-size: 12px;
                        padding: 3px 10px;
                        border-radius: 999px;
                        cursor: pointer;
                    ",
                    "aria-expanded": "{expanded}",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        on_toggle.call(());
                    },
                    "{badge}"
                }
                if can_add {
                    button {
                        style: "
                            border: none;
                            background: transparent;
                            color: {colors.accent};
                            font-size: 12px;
                            cursor: pointer;
                        ",
                        onclick: pick_files,
                        "Add files"
                    }
                }
            }

            {match view {
                AttachmentView::Empty { message } => rsx! {
                    div {
                        style: "margin-top: 8px; font-size: 12px; color: {colors.text_muted};",
                        "{message}"
                    }
                },
                AttachmentView::Grid { tiles } => rsx! {
                    div {
                        style: "
                            margin-top: 8px;
                            display: grid;
                            grid-template-columns: repeat(auto-fill, minmax(96px, 1fr));
                            gap: 8px;
                        ",
                        for tile in tiles {
                            AttachmentTileView {
                                key: "{tile.id}",
                                tile: tile.clone(),
                                on_remove,
                            }
                        }
                    }
                },
                AttachmentView::Hidden | AttachmentView::Collapsed { .. } => rsx! {},
            }}
        }
    }
}

#[component]
fn AttachmentTileView(tile: AttachmentTile, on_remove: EventHandler<AttachmentId>) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let id = tile.id;

    rsx! {
        div {
            title: "{tile.name}",
            style: "
                position: relative;
                border: 1px solid {colors.border};
                border-radius: 8px;
                overflow: hidden;
                background: {colors.bg_tertiary};
                height: 88px;
            ",
            {tile_body(&tile, colors)}
            if tile.removable {
                button {
                    title: "Remove file",
                    style: "
                        position: absolute;
                        top: 4px;
                        right: 4px;
                        border: none;
                        border-radius: 999px;
                        width: 20px;
                        height: 20px;
                        background: {colors.overlay};
                        color: #ffffff;
                        cursor: pointer;
                        font-size: 12px;
                        line-height: 20px;
                        padding: 0;
                    ",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        on_remove.call(id);
                    },
                    "✕"
                }
            }
        }
    }
}

fn tile_body(tile: &AttachmentTile, colors: &ColorPalette) -> Element {
    match &tile.preview {
        TilePreview::Image { url } => rsx! {
            img {
                src: "{url}",
                alt: "{tile.name}",
                style: "width: 100%; height: 100%; object-fit: cover; display: block;",
            }
        },
        TilePreview::File => rsx! {
            div {
                style: "
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100%;
                    gap: 4px;
                    padding: 6px;
                    box-sizing: border-box;
                    color: {colors.text_secondary};
                ",
                span { style: "font-size: 22px;", "📄" }
                span {
                    style: "
                        font-size: 11px;
                        max-width: 100%;
                        overflow: hidden;
                        text-overflow: ellipsis;
                        white-space: nowrap;
                    ",
                    "{tile.name}"
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_mime_from_extension() {
        assert_eq!(guess_mime_type("photo.PNG"), "image/png");
        assert_eq!(guess_mime_type("notes.txt"), "text/plain");
        assert_eq!(guess_mime_type("blob"), "application/octet-stream");
    }
}

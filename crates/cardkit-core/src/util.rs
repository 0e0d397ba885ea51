//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Collapse optional card text into the displayed value (`None` is empty).
///
/// Unlike [`normalize_text_option`] this keeps surrounding whitespace: card
/// text is compared byte for byte when checking for unsaved changes.
pub fn text_or_empty(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Check whether a MIME type names an image.
pub fn is_image_mime_type(mime_type: &str) -> bool {
    mime_type
        .trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

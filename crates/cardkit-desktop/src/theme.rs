//! Theme configuration for the desktop shell

use std::str::FromStr;
use std::sync::OnceLock;

/// Cached system dark mode preference (detected once at startup)
static SYSTEM_DARK_MODE: OnceLock<bool> = OnceLock::new();

/// Theme requested through `CARDKIT_THEME`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" | "" => Ok(Self::System),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// Resolved theme (light or dark)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    /// Get the color palette for this theme
    #[must_use]
    pub const fn palette(self) -> &'static ColorPalette {
        match self {
            Self::Light => &LIGHT_PALETTE,
            Self::Dark => &DARK_PALETTE,
        }
    }
}

/// Resolve a preference to an actual light/dark theme
#[must_use]
pub fn resolve_theme(preference: ThemePreference) -> ResolvedTheme {
    match preference {
        ThemePreference::Light => ResolvedTheme::Light,
        ThemePreference::Dark => ResolvedTheme::Dark,
        ThemePreference::System => {
            if *SYSTEM_DARK_MODE.get_or_init(detect_system_dark_mode) {
                ResolvedTheme::Dark
            } else {
                ResolvedTheme::Light
            }
        }
    }
}

/// Read the preference from the environment, ignoring bad values
#[must_use]
pub fn preference_from_env() -> ThemePreference {
    match std::env::var("CARDKIT_THEME") {
        Ok(value) => value.parse().unwrap_or_else(|error| {
            tracing::warn!("Ignoring CARDKIT_THEME: {}", error);
            ThemePreference::System
        }),
        Err(_) => ThemePreference::System,
    }
}

#[cfg(target_os = "macos")]
fn detect_system_dark_mode() -> bool {
    use std::process::Command;
    match Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
    {
        Ok(output) => String::from_utf8_lossy(&output.stdout)
            .trim()
            .eq_ignore_ascii_case("dark"),
        Err(e) => {
            tracing::warn!("Failed to detect system theme: {}", e);
            false
        }
    }
}

#[cfg(not(target_os = "macos"))]
fn detect_system_dark_mode() -> bool {
    let is_dark = std::env::var("GTK_THEME")
        .map(|theme| theme.to_lowercase().contains("dark"))
        .unwrap_or(false);
    tracing::debug!(
        "System theme detected: {}",
        if is_dark { "dark" } else { "light" }
    );
    is_dark
}

/// Color palette for the application
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub bg_tertiary: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub accent_text: &'static str,
    pub error: &'static str,
    pub overlay: &'static str,
}

/// Light theme colors
pub const LIGHT_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#ffffff",
    bg_secondary: "#f8f9fa",
    bg_tertiary: "#f1f3f4",
    text_primary: "#1a1a1a",
    text_secondary: "#5f6368",
    text_muted: "#9aa0a6",
    border: "#dadce0",
    accent: "#4f46e5",
    accent_text: "#ffffff",
    error: "#dc2626",
    overlay: "rgba(0, 0, 0, 0.35)",
};

/// Dark theme colors
pub const DARK_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#1a1a1a",
    bg_secondary: "#242424",
    bg_tertiary: "#2d2d2d",
    text_primary: "#e8eaed",
    text_secondary: "#9aa0a6",
    text_muted: "#5f6368",
    border: "#3c4043",
    accent: "#818cf8",
    accent_text: "#1a1a1a",
    error: "#f87171",
    overlay: "rgba(0, 0, 0, 0.6)",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_preferences() {
        assert_eq!("Dark".parse(), Ok(ThemePreference::Dark));
        assert_eq!(" light ".parse(), Ok(ThemePreference::Light));
        assert_eq!("".parse(), Ok(ThemePreference::System));
        assert!("sepia".parse::<ThemePreference>().is_err());
    }

    #[test]
    fn explicit_preferences_skip_detection() {
        assert_eq!(resolve_theme(ThemePreference::Dark), ResolvedTheme::Dark);
        assert_eq!(resolve_theme(ThemePreference::Light), ResolvedTheme::Light);
        assert_eq!(ResolvedTheme::Dark.palette().bg_primary, "#1a1a1a");
    }
}

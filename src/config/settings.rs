//! User settings and preferences for SERP Preview
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

use crate::preview::{FormFields, FormOptions, PreviewOptions};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark, Theme::System]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 640.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Appearance
    // ─────────────────────────────────────────────────────────────────────────
    /// Color theme (light, dark, or system)
    pub theme: Theme,

    /// Window size and position
    pub window_size: WindowSize,

    // ─────────────────────────────────────────────────────────────────────────
    // Preview
    // ─────────────────────────────────────────────────────────────────────────
    /// Region selectors, class names and field limits of the preview
    pub preview: PreviewOptions,

    /// Text shown in place of the snippet while the form is empty
    pub hint_message: String,

    // ─────────────────────────────────────────────────────────────────────────
    // Form
    // ─────────────────────────────────────────────────────────────────────────
    /// Base URL, page title template and indexing notice
    pub form: FormOptions,

    /// Whether to restore the last typed values on startup
    pub restore_draft: bool,

    /// Values typed when the application last closed
    pub draft: FormFields,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            window_size: WindowSize::default(),
            preview: PreviewOptions::default(),
            hint_message: String::from(
                "Enter a title, URL or description to see the search result preview.",
            ),
            form: FormOptions::default(),
            restore_draft: true,
            draft: FormFields::default(),
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        self.preview.sanitize();

        if self.hint_message.trim().is_empty() {
            self.hint_message = Self::default().hint_message;
        }

        // A template without the placeholder would hide the typed title
        if !self
            .form
            .page_title_template
            .contains(crate::preview::TITLE_PLACEHOLDER)
        {
            self.form.page_title_template = FormOptions::default().page_title_template;
        }

        if !self.restore_draft {
            self.draft = FormFields::default();
        }
    }

    /// Load settings and sanitize them to ensure validity.
    ///
    /// This is a convenience method that deserializes and then sanitizes.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.preview.title_limit, 55);
        assert_eq!(settings.preview.description_limit, 156);
        assert_eq!(settings.window_size.width, 960.0);
        assert!(settings.restore_draft);
        assert!(settings.draft.title.is_empty());
        assert!(settings.draft.indexed);
    }

    #[test]
    fn test_theme_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(serde_json::to_string(&Theme::System).unwrap(), "\"system\"");
    }

    #[test]
    fn test_theme_labels() {
        let labels: Vec<&str> = Theme::all().iter().map(Theme::label).collect();
        assert_eq!(labels, vec!["Light", "Dark", "System"]);
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let mut original = Settings::default();
        original.theme = Theme::Dark;
        original.form.base_url = "https://example.com".to_string();
        original.draft.title = "Draft".to_string();

        let json = serde_json::to_string_pretty(&original).unwrap();
        let deserialized: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let json = r#"{"theme": "dark", "preview": {"title_limit": 70}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.preview.title_limit, 70);
        assert_eq!(settings.preview.description_limit, 156);
        assert_eq!(settings.form, FormOptions::default());
    }

    #[test]
    fn test_settings_deserialize_empty_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_sanitize_window_size() {
        let mut settings = Settings::default();
        settings.window_size.width = 10.0;
        settings.window_size.height = 99_999.0;
        settings.sanitize();
        assert_eq!(settings.window_size.width, Settings::MIN_WINDOW_SIZE);
        assert_eq!(settings.window_size.height, Settings::MAX_WINDOW_SIZE);
    }

    #[test]
    fn test_sanitize_restores_template_without_placeholder() {
        let mut settings = Settings::default();
        settings.form.page_title_template = "Static title".to_string();
        settings.sanitize();
        assert_eq!(settings.form.page_title_template, "##title##");
    }

    #[test]
    fn test_sanitize_drops_draft_when_not_restoring() {
        let mut settings = Settings::default();
        settings.restore_draft = false;
        settings.draft.description = "left over".to_string();
        settings.sanitize();
        assert_eq!(settings.draft, FormFields::default());
    }

    #[test]
    fn test_from_json_sanitized() {
        let json = r#"{"preview": {"title_limit": 0}, "hint_message": ""}"#;
        let settings = Settings::from_json_sanitized(json).unwrap();
        assert_eq!(settings.preview.title_limit, PreviewOptions::MIN_LIMIT);
        assert_eq!(settings.hint_message, Settings::default().hint_message);
    }
}

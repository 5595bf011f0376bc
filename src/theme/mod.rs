//! Theme System for SERP Preview
//!
//! This module defines the colours used by the form and the snippet preview
//! for the light and dark themes, and converts them into egui `Visuals`.
//!
//! # Usage
//!
//! ```ignore
//! use crate::theme::ThemeColors;
//! use crate::config::Theme;
//!
//! let colors = ThemeColors::from_theme(Theme::Dark, &ctx.style().visuals);
//! ctx.set_visuals(colors.to_visuals());
//! ui.label(RichText::new("Title").color(colors.serp.title));
//! ```

use crate::config::Theme;
use eframe::egui::{Color32, Stroke, Visuals};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// All colours for one theme variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    /// Base UI colors (backgrounds, borders)
    pub base: BaseColors,
    /// Colors of the rendered search result
    pub serp: SerpColors,
}

impl ThemeColors {
    /// Colours for `theme`; `System` follows the current egui visuals.
    pub fn from_theme(theme: Theme, visuals: &Visuals) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
            Theme::System => {
                if visuals.dark_mode {
                    Self::dark()
                } else {
                    Self::light()
                }
            }
        }
    }

    pub fn light() -> Self {
        Self {
            base: BaseColors::light(),
            serp: SerpColors::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            base: BaseColors::dark(),
            serp: SerpColors::dark(),
        }
    }

    /// Check if this is a dark theme (useful for conditional styling).
    pub fn is_dark(&self) -> bool {
        self.base.background.r() < 128
    }

    /// Convert theme colors to egui Visuals for UI styling.
    pub fn to_visuals(&self) -> Visuals {
        let mut visuals = if self.is_dark() {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.base.background;
        visuals.window_fill = self.base.background;
        visuals.extreme_bg_color = self.base.input;
        visuals.faint_bg_color = self.base.background_secondary;
        visuals.hyperlink_color = self.serp.title;
        visuals.error_fg_color = self.serp.counter_limit;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.base.border);

        visuals
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Base Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Base UI colors for backgrounds and borders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColors {
    pub background: Color32,
    /// Panels and the snippet card
    pub background_secondary: Color32,
    /// Text inputs
    pub input: Color32,
    pub border: Color32,
}

impl BaseColors {
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(255, 255, 255),
            background_secondary: Color32::from_rgb(248, 249, 250),
            input: Color32::from_rgb(245, 245, 245),
            border: Color32::from_rgb(218, 220, 224),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(32, 33, 36),
            background_secondary: Color32::from_rgb(41, 42, 45),
            input: Color32::from_rgb(48, 49, 52),
            border: Color32::from_rgb(60, 64, 67),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SERP Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Colors of the snippet preview and the description counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SerpColors {
    pub title: Color32,
    pub url: Color32,
    pub description: Color32,
    /// Background of words matching the hovered word
    pub keyword_mark: Color32,
    pub hint: Color32,
    pub counter: Color32,
    /// Counter colour while the description is over its limit
    pub counter_limit: Color32,
    /// "Not indexed" notice
    pub notice: Color32,
}

impl SerpColors {
    pub fn light() -> Self {
        Self {
            title: Color32::from_rgb(26, 13, 171),
            url: Color32::from_rgb(0, 102, 33),
            description: Color32::from_rgb(84, 84, 84),
            keyword_mark: Color32::from_rgb(255, 236, 153),
            hint: Color32::from_rgb(120, 120, 120),
            counter: Color32::from_rgb(120, 120, 120),
            counter_limit: Color32::from_rgb(200, 40, 40),
            notice: Color32::from_rgb(176, 96, 0),
        }
    }

    pub fn dark() -> Self {
        Self {
            title: Color32::from_rgb(138, 180, 248),
            url: Color32::from_rgb(129, 201, 149),
            description: Color32::from_rgb(189, 193, 198),
            keyword_mark: Color32::from_rgb(110, 90, 20),
            hint: Color32::from_rgb(154, 160, 166),
            counter: Color32::from_rgb(154, 160, 166),
            counter_limit: Color32::from_rgb(242, 139, 130),
            notice: Color32::from_rgb(253, 214, 99),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_theme_explicit_variants() {
        let visuals = Visuals::light();
        assert_eq!(ThemeColors::from_theme(Theme::Dark, &visuals), ThemeColors::dark());
        assert_eq!(ThemeColors::from_theme(Theme::Light, &visuals), ThemeColors::light());
    }

    #[test]
    fn test_system_theme_follows_visuals() {
        assert!(ThemeColors::from_theme(Theme::System, &Visuals::dark()).is_dark());
        assert!(!ThemeColors::from_theme(Theme::System, &Visuals::light()).is_dark());
    }

    #[test]
    fn test_to_visuals_matches_variant() {
        assert!(ThemeColors::dark().to_visuals().dark_mode);
        assert!(!ThemeColors::light().to_visuals().dark_mode);
        assert_eq!(
            ThemeColors::light().to_visuals().panel_fill,
            BaseColors::light().background
        );
    }

    #[test]
    fn test_keyword_mark_differs_from_background() {
        for colors in [ThemeColors::light(), ThemeColors::dark()] {
            assert_ne!(colors.serp.keyword_mark, colors.base.background);
        }
    }
}

//! Settings Panel Component for SERP Preview
//!
//! A modal window for the theme, the preview field limits and the site
//! options that shape the page title and URL.

use crate::config::{Settings, Theme};
use crate::preview::{PreviewOptions, DEFAULT_DESCRIPTION_LIMIT, DEFAULT_TITLE_LIMIT};
use eframe::egui::{self, RichText, Ui};
use std::ops::RangeInclusive;

/// Settings panel sections for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsSection {
    #[default]
    Appearance,
    Preview,
    Site,
}

impl SettingsSection {
    /// Get the display label for the section.
    pub fn label(&self) -> &'static str {
        match self {
            SettingsSection::Appearance => "Appearance",
            SettingsSection::Preview => "Preview",
            SettingsSection::Site => "Site",
        }
    }

    /// Get the icon for the section.
    pub fn icon(&self) -> &'static str {
        match self {
            SettingsSection::Appearance => "🎨",
            SettingsSection::Preview => "🔎",
            SettingsSection::Site => "🌐",
        }
    }
}

/// Result of showing the settings panel.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanelOutput {
    /// Whether settings were modified.
    pub changed: bool,
    /// Whether the panel should be closed.
    pub close_requested: bool,
    /// Whether a reset to defaults was requested.
    pub reset_requested: bool,
}

/// Settings panel state and rendering.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanel {
    /// Currently active settings section.
    active_section: SettingsSection,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the settings panel as a window. Edits `settings` in place.
    pub fn show(&mut self, ctx: &egui::Context, settings: &mut Settings) -> SettingsPanelOutput {
        let mut output = SettingsPanelOutput::default();

        egui::Window::new("⚙ Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(460.0)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    output.close_requested = true;
                }

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.set_min_width(120.0);

                        for section in [
                            SettingsSection::Appearance,
                            SettingsSection::Preview,
                            SettingsSection::Site,
                        ] {
                            let selected = self.active_section == section;
                            let text = format!("{} {}", section.icon(), section.label());
                            if ui
                                .add_sized(
                                    [110.0, 32.0],
                                    egui::SelectableLabel::new(
                                        selected,
                                        RichText::new(text).size(14.0),
                                    ),
                                )
                                .clicked()
                            {
                                self.active_section = section;
                            }
                        }

                        ui.add_space(16.0);
                        if ui
                            .add_sized([110.0, 28.0], egui::Button::new("↺ Reset All"))
                            .on_hover_text("Reset all settings to defaults")
                            .clicked()
                        {
                            output.reset_requested = true;
                        }
                    });

                    ui.separator();

                    ui.vertical(|ui| {
                        ui.set_min_width(320.0);
                        ui.set_min_height(240.0);

                        output.changed = match self.active_section {
                            SettingsSection::Appearance => show_appearance_section(ui, settings),
                            SettingsSection::Preview => show_preview_section(ui, settings),
                            SettingsSection::Site => show_site_section(ui, settings),
                        };
                    });
                });

                ui.separator();

                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            output.close_requested = true;
                        }
                        ui.label(
                            RichText::new("Settings are saved on exit")
                                .small()
                                .weak(),
                        );
                    });
                });
            });

        output
    }
}

fn show_appearance_section(ui: &mut Ui, settings: &mut Settings) -> bool {
    let mut changed = false;

    ui.heading("Appearance");
    ui.add_space(8.0);
    ui.label(RichText::new("Theme").strong());
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        for &theme in Theme::all() {
            if ui
                .selectable_value(&mut settings.theme, theme, theme.label())
                .changed()
            {
                changed = true;
            }
        }
    });

    changed
}

/// Slider range for the character limits: everything `sanitize` keeps.
fn limit_range() -> RangeInclusive<usize> {
    PreviewOptions::MIN_LIMIT..=PreviewOptions::MAX_LIMIT
}

fn show_preview_section(ui: &mut Ui, settings: &mut Settings) -> bool {
    let mut changed = false;
    let preview = &mut settings.preview;

    ui.heading("Preview");
    ui.add_space(8.0);

    let limits = [
        ("Title limit", &mut preview.title_limit, DEFAULT_TITLE_LIMIT),
        (
            "Description limit",
            &mut preview.description_limit,
            DEFAULT_DESCRIPTION_LIMIT,
        ),
    ];
    for (label, value, default) in limits {
        ui.horizontal(|ui| {
            ui.label(RichText::new(label).strong());
            if ui
                .add(egui::Slider::new(value, limit_range()))
                .changed()
            {
                changed = true;
            }
            if ui.small_button("Default").clicked() && *value != default {
                *value = default;
                changed = true;
            }
        });
        ui.add_space(4.0);
    }

    ui.add_space(8.0);
    ui.label(RichText::new("Hint").strong());
    if ui
        .add(egui::TextEdit::multiline(&mut settings.hint_message).desired_rows(2))
        .on_hover_text("Shown instead of the snippet while the form is empty")
        .changed()
    {
        changed = true;
    }

    changed
}

fn show_site_section(ui: &mut Ui, settings: &mut Settings) -> bool {
    let mut changed = false;
    let form = &mut settings.form;

    ui.heading("Site");
    ui.add_space(8.0);

    ui.label(RichText::new("Base URL").strong());
    changed |= ui
        .add(egui::TextEdit::singleline(&mut form.base_url).hint_text("https://example.com"))
        .changed();
    ui.add_space(6.0);

    ui.label(RichText::new("Page title template").strong());
    changed |= ui
        .add(
            egui::TextEdit::singleline(&mut form.page_title_template)
                .hint_text("##title## | Example"),
        )
        .on_hover_text("##title## is replaced by the typed title")
        .changed();
    ui.add_space(6.0);

    ui.label(RichText::new("Not indexed notice").strong());
    changed |= ui
        .text_edit_singleline(&mut form.not_indexed_message)
        .changed();
    ui.add_space(10.0);

    changed |= ui
        .checkbox(&mut settings.restore_draft, "Restore typed values on startup")
        .changed();

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_range_covers_sanitized_values() {
        let mut settings = Settings::default();
        settings.preview.title_limit = 0;
        settings.preview.description_limit = 900;
        settings.sanitize();

        let range = limit_range();
        assert!(range.contains(&settings.preview.title_limit));
        assert!(range.contains(&settings.preview.description_limit));
        assert_eq!(settings.preview.description_limit, 900);

        settings.preview.description_limit = usize::MAX;
        settings.sanitize();
        assert_eq!(*range.end(), settings.preview.description_limit);
    }

    #[test]
    fn test_limit_range_includes_defaults() {
        let range = limit_range();
        assert!(range.contains(&DEFAULT_TITLE_LIMIT));
        assert!(range.contains(&DEFAULT_DESCRIPTION_LIMIT));
    }
}

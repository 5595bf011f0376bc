//! Main application module for SERP Preview
//!
//! This module implements the eframe App trait: the editing form on the left,
//! the live search result preview in the centre, and a settings window.

use crate::config::{save_config_silent, Settings, WindowSize};
use crate::preview::{
    default_fragment, DataSource, FormFields, FormSource, PreviewView, PreviewWidget,
};
use crate::theme::ThemeColors;
use crate::ui::{FormPanel, SettingsPanel};
use eframe::egui;
use log::{debug, info};
use std::cell::RefCell;
use std::rc::Rc;

/// The form source and the preview widget bound to it.
///
/// Preview options are fixed for a widget's lifetime, so a settings change
/// rebuilds the whole binding.
struct PreviewBinding {
    source: Rc<FormSource>,
    widget: Rc<RefCell<PreviewWidget>>,
    view: PreviewView,
}

impl PreviewBinding {
    fn new(settings: &Settings, fields: FormFields) -> Self {
        let source = Rc::new(FormSource::with_fields(settings.form.clone(), fields));
        let widget = PreviewWidget::attach(
            default_fragment(&settings.hint_message),
            Rc::clone(&source) as Rc<dyn DataSource>,
            settings.preview.clone(),
        );
        Self {
            source,
            widget,
            view: PreviewView::new(),
        }
    }
}

/// The main application struct that holds all state and implements eframe::App.
pub struct SerpPreviewApp {
    /// User settings, persisted on exit
    settings: Settings,
    /// Settings the current preview binding was built from
    built_from: Settings,
    binding: PreviewBinding,
    form_panel: FormPanel,
    settings_panel: SettingsPanel,
    settings_open: bool,
    colors: ThemeColors,
    /// Last known window size (for detecting changes)
    last_window_size: Option<egui::Vec2>,
    /// Last known window position (for detecting changes)
    last_window_pos: Option<egui::Pos2>,
}

impl SerpPreviewApp {
    /// Create the application from loaded settings.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        info!("Initializing SERP Preview");

        let colors = ThemeColors::from_theme(settings.theme, &cc.egui_ctx.style().visuals);
        cc.egui_ctx.set_visuals(colors.to_visuals());
        info!("Applied initial theme: {:?}", settings.theme);

        let fields = settings.draft.clone();
        let binding = PreviewBinding::new(&settings, fields.clone());

        Self {
            built_from: settings.clone(),
            settings,
            binding,
            form_panel: FormPanel::new(fields),
            settings_panel: SettingsPanel::new(),
            settings_open: false,
            colors,
            last_window_size: None,
            last_window_pos: None,
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        self.colors = ThemeColors::from_theme(self.settings.theme, &ctx.style().visuals);
        ctx.set_visuals(self.colors.to_visuals());
        debug!("Theme applied: {:?}", self.settings.theme);
    }

    /// Rebuild the preview if any option it was built from changed.
    fn rebuild_preview_if_needed(&mut self) {
        let stale = self.settings.preview != self.built_from.preview
            || self.settings.form != self.built_from.form
            || self.settings.hint_message != self.built_from.hint_message;
        if !stale {
            return;
        }

        let mut settings = self.settings.clone();
        settings.sanitize();
        info!("Preview options changed, rebuilding preview");
        self.binding = PreviewBinding::new(&settings, self.form_panel.fields().clone());
        self.built_from = self.settings.clone();
    }

    /// Update window size in settings if changed.
    fn update_window_state(&mut self, ctx: &egui::Context) {
        let mut changed = false;

        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                let current_size = rect.size();
                let current_pos = rect.min;

                let size_changed = self
                    .last_window_size
                    .map(|s| (s - current_size).length() > 1.0)
                    .unwrap_or(true);
                let pos_changed = self
                    .last_window_pos
                    .map(|p| (p - current_pos).length() > 1.0)
                    .unwrap_or(true);

                if size_changed || pos_changed {
                    self.last_window_size = Some(current_size);
                    self.last_window_pos = Some(current_pos);
                    changed = true;
                }
            }
        });

        if changed {
            if let (Some(size), Some(pos)) = (self.last_window_size, self.last_window_pos) {
                let maximized = ctx.input(|i| i.viewport().maximized.unwrap_or(false));
                self.settings.window_size = WindowSize {
                    width: size.x,
                    height: size.y,
                    x: Some(pos.x),
                    y: Some(pos.y),
                    maximized,
                };
            }
        }
    }

    fn render_ui(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("SERP Preview").strong().size(15.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙ Settings").clicked() {
                        self.settings_open = !self.settings_open;
                    }
                });
            });
        });

        let counter_limit_class = self.settings.preview.counter_limit_class.clone();
        egui::SidePanel::left("form_panel")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| {
                self.form_panel.show(
                    ui,
                    &self.binding.source,
                    &counter_limit_class,
                    &self.colors,
                );
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Preview");
            ui.label(
                egui::RichText::new("Hover a word to highlight its repetitions")
                    .small()
                    .weak(),
            );
            ui.add_space(12.0);

            let binding = &mut self.binding;
            binding
                .view
                .show(ui, &mut binding.widget.borrow_mut(), &self.colors);
        });

        if self.settings_open {
            let output = self.settings_panel.show(ctx, &mut self.settings);
            if output.reset_requested {
                info!("Resetting settings to defaults");
                let window_size = self.settings.window_size;
                self.settings = Settings {
                    window_size,
                    ..Settings::default()
                };
                self.apply_theme(ctx);
            }
            if output.changed {
                self.apply_theme(ctx);
            }
            if output.close_requested {
                self.settings_open = false;
            }
        }

        self.rebuild_preview_if_needed();
    }
}

impl eframe::App for SerpPreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window size/position changes for persistence
        self.update_window_state(ctx);

        self.render_ui(ctx);
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.settings.draft = self.form_panel.fields().clone();
        self.settings.sanitize();
        save_config_silent(&self.settings);
    }
}

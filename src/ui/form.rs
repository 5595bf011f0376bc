//! Editing form panel
//!
//! Text inputs for title, URL alias and description. Edits go to the
//! [`FormSource`], which notifies the preview; the description counter
//! installed by the preview is drawn under the description input.

use crate::preview::{counter_label, FormFields, FormSource};
use crate::theme::ThemeColors;
use eframe::egui::{self, RichText, TextEdit, Ui};
use log::debug;

/// Form panel state: the text buffers bound to the inputs.
#[derive(Debug, Clone)]
pub struct FormPanel {
    buffers: FormFields,
}

impl FormPanel {
    /// Create a panel whose inputs start from `fields`.
    pub fn new(fields: FormFields) -> Self {
        Self { buffers: fields }
    }

    /// Show the form and push any edits to `source`.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        source: &FormSource,
        counter_limit_class: &str,
        colors: &ThemeColors,
    ) {
        ui.heading("Search result");
        ui.add_space(8.0);

        ui.label(RichText::new("Title").strong());
        if ui
            .add(
                TextEdit::singleline(&mut self.buffers.title)
                    .hint_text("Page title")
                    .desired_width(f32::INFINITY),
            )
            .changed()
        {
            source.set_title(&self.buffers.title);
        }
        ui.add_space(6.0);

        ui.label(RichText::new("URL").strong());
        ui.horizontal(|ui| {
            let base = source.options().base_url.trim_end_matches('/');
            if !base.is_empty() {
                ui.label(RichText::new(format!("{}/", base)).weak());
            }
            if ui
                .add(
                    TextEdit::singleline(&mut self.buffers.alias)
                        .hint_text("page-alias")
                        .desired_width(f32::INFINITY),
                )
                .changed()
            {
                source.set_alias(&self.buffers.alias);
            }
        });
        ui.add_space(6.0);

        ui.label(RichText::new("Description").strong());
        if ui
            .add(
                TextEdit::multiline(&mut self.buffers.description)
                    .hint_text("Meta description")
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            )
            .changed()
        {
            source.set_description(&self.buffers.description);
        }

        // The counter is read after the edits above, so it shows this frame's length
        if let Some(counter) = source.counter() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                counter_label(ui, &counter.borrow(), counter_limit_class, &colors.serp);
            });
        }
        ui.add_space(6.0);

        if ui
            .checkbox(&mut self.buffers.indexed, "Indexed by search engines")
            .changed()
        {
            debug!("Indexing toggled: {}", self.buffers.indexed);
            source.set_indexed(self.buffers.indexed);
        }

        if let Some(notice) = source.not_indexed_notice() {
            ui.add_space(4.0);
            ui.label(RichText::new(notice).color(colors.serp.notice));
        }
    }

    /// Current input values.
    pub fn fields(&self) -> &FormFields {
        &self.buffers
    }
}

//! egui rendering of the preview fragment
//!
//! Draws the widget's regions as a search result card and turns egui's
//! per-frame hover state into enter/leave transitions for the widget.

use super::dom::{Element, ElementId, Fragment};
use super::widget::{Field, PreviewWidget, Region};
use crate::theme::{SerpColors, ThemeColors};
use eframe::egui::{self, Color32, Label, RichText, Sense, Stroke, Ui};

/// Maximum width of the snippet card, close to a real result column.
const SNIPPET_MAX_WIDTH: f32 = 600.0;

const TITLE_SIZE: f32 = 18.0;
const URL_SIZE: f32 = 13.0;
const DESCRIPTION_SIZE: f32 = 13.0;

/// Per-view hover tracking.
#[derive(Debug, Default)]
pub struct PreviewView {
    /// Unit under the pointer in the previous frame
    hovered: Option<ElementId>,
}

impl PreviewView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `widget` and dispatch hover transitions to it.
    pub fn show(&mut self, ui: &mut Ui, widget: &mut PreviewWidget, colors: &ThemeColors) {
        let hovered_now = Self::draw(ui, widget, colors);

        if let Some(transition) = HoverTransition::between(self.hovered, hovered_now) {
            transition.dispatch(widget);
            self.hovered = hovered_now;
            // Marks changed; draw them without waiting for the next input event
            ui.ctx().request_repaint();
        }
    }

    fn draw(ui: &mut Ui, widget: &PreviewWidget, colors: &ThemeColors) -> Option<ElementId> {
        let fragment = widget.fragment();
        let mark_class = widget.options().keyword_mark_class.as_str();
        let mut hovered = None;

        egui::Frame::none()
            .fill(colors.base.background_secondary)
            .stroke(Stroke::new(1.0, colors.base.border))
            .rounding(6.0)
            .inner_margin(14.0)
            .show(ui, |ui| {
                ui.set_max_width(SNIPPET_MAX_WIDTH);

                if let Some(hint) = widget
                    .region(Region::Hint)
                    .filter(|&id| fragment.is_visible(id))
                {
                    ui.label(
                        RichText::new(fragment.text_content(hint))
                            .italics()
                            .color(colors.serp.hint),
                    );
                }

                let body_shown = widget
                    .region(Region::Body)
                    .map_or(widget.state().visible, |body| fragment.is_visible(body));
                if !body_shown {
                    return;
                }

                let fields = [
                    (Field::Title, TITLE_SIZE, colors.serp.title),
                    (Field::Url, URL_SIZE, colors.serp.url),
                    (Field::Description, DESCRIPTION_SIZE, colors.serp.description),
                ];
                for (field, size, color) in fields {
                    let Some(region) = widget
                        .region(Region::Field(field))
                        .filter(|&id| fragment.is_visible(id))
                    else {
                        continue;
                    };
                    let style = UnitStyle {
                        size,
                        color,
                        mark_class,
                        mark_color: colors.serp.keyword_mark,
                    };
                    if let Some(id) = draw_region(ui, fragment, region, &style) {
                        hovered = Some(id);
                    }
                }
            });

        let state = widget.state();
        if state.visible && state.limit_exceeded {
            let over = state
                .description_length
                .saturating_sub(widget.options().description_limit);
            ui.label(
                RichText::new(format!("Description is {} characters over the limit", over))
                    .small()
                    .color(colors.serp.counter_limit),
            );
        }

        hovered
    }
}

/// Change of the hovered unit between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HoverTransition {
    leave: Option<ElementId>,
    enter: Option<ElementId>,
}

impl HoverTransition {
    /// `None` while the pointer stays on the same unit (or on none).
    fn between(previous: Option<ElementId>, current: Option<ElementId>) -> Option<Self> {
        (previous != current).then_some(Self {
            leave: previous,
            enter: current,
        })
    }

    /// Leave first, so the blanket unmark cannot wipe the new marks.
    fn dispatch(self, widget: &mut PreviewWidget) {
        if let Some(old) = self.leave {
            widget.pointer_leave(old);
        }
        if let Some(new) = self.enter {
            widget.pointer_enter(new);
        }
    }
}

struct UnitStyle<'a> {
    size: f32,
    color: Color32,
    mark_class: &'a str,
    mark_color: Color32,
}

/// Draw the spans of one region on a wrapping line. Returns the hovered unit.
fn draw_region(
    ui: &mut Ui,
    fragment: &Fragment,
    region: ElementId,
    style: &UnitStyle<'_>,
) -> Option<ElementId> {
    let mut hovered = None;

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;

        for &id in fragment.children(region) {
            let Some(el) = fragment.get(id) else {
                continue;
            };

            let mut text = RichText::new(el.text()).size(style.size).color(style.color);
            if el.has_class(style.mark_class) {
                text = text.background_color(style.mark_color);
            }
            let label = Label::new(text).selectable(false);

            if el.is_hoverable() {
                if ui.add(label.sense(Sense::hover())).hovered() {
                    hovered = Some(id);
                }
            } else {
                ui.add(label);
            }
        }
    });

    hovered
}

/// Draw the description counter element.
pub fn counter_label(ui: &mut Ui, counter: &Element, limit_class: &str, colors: &SerpColors) {
    let color = if counter.has_class(limit_class) {
        colors.counter_limit
    } else {
        colors.counter
    };
    ui.label(RichText::new(counter.text()).small().color(color));
}

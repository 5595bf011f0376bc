//! Search result preview widget
//!
//! The widget owns a [`Fragment`] with five regions (body, hint, title, URL,
//! description) and re-renders it every time its [`DataSource`] reports a
//! change:
//!
//! 1. collect a [`PreviewData`] snapshot
//! 2. update the description counter, always
//! 3. if every field is empty, show the hint and stop
//! 4. otherwise truncate, chunk and render each field, then show the body
//!
//! Each rendered word is a hoverable unit. Hovering one marks every unit in
//! the current render whose text matches case-insensitively; leaving clears
//! all marks.

use super::chunk::{chunk_words, keywords_match, truncate};
use super::dom::{Element, ElementId, Fragment};
use super::options::PreviewOptions;
use super::source::{DataSource, SharedElement};
use crate::error::ResultExt;
use crate::string_utils::char_count;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::Rc;

// ─────────────────────────────────────────────────────────────────────────────
// Data
// ─────────────────────────────────────────────────────────────────────────────

/// The three snippet fields, read from the source at one refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewData {
    pub title: String,
    pub url: String,
    pub description: String,
}

impl PreviewData {
    /// True iff every field is empty.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.url.is_empty() && self.description.is_empty()
    }
}

/// State derived from the latest refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetState {
    /// Body shown (true) or hint shown (false)
    pub visible: bool,
    /// Description length in characters
    pub description_length: usize,
    pub limit_exceeded: bool,
}

/// A snippet field with its own region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Url,
    Description,
}

/// The widget's sub-regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Body,
    Hint,
    Field(Field),
}

#[derive(Debug, Clone, Copy, Default)]
struct Regions {
    body: Option<ElementId>,
    hint: Option<ElementId>,
    title: Option<ElementId>,
    url: Option<ElementId>,
    description: Option<ElementId>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Text units
// ─────────────────────────────────────────────────────────────────────────────

/// Hoverable word units of one render, in render order across all fields.
///
/// Every render builds a fresh list and swaps it in whole.
#[derive(Debug, Clone, Default)]
pub struct TextUnits {
    generation: u64,
    units: Vec<ElementId>,
}

impl TextUnits {
    pub fn ids(&self) -> &[ElementId] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }
}

/// What a hover handler may do: mark matching units, or clear all marks.
pub trait KeywordHighlighter {
    fn mark_keywords(&mut self, text: &str);
    fn unmark_keywords(&mut self);
}

/// Highlighter over one render's units.
struct UnitMarker<'a> {
    fragment: &'a mut Fragment,
    units: &'a TextUnits,
    class: &'a str,
}

impl KeywordHighlighter for UnitMarker<'_> {
    fn mark_keywords(&mut self, text: &str) {
        for &id in self.units.ids() {
            let matches = self
                .fragment
                .get(id)
                .is_some_and(|el| keywords_match(el.text(), text));
            if matches {
                self.fragment.add_class(id, self.class);
            }
        }
    }

    fn unmark_keywords(&mut self) {
        for &id in self.units.ids() {
            self.fragment.remove_class(id, self.class);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PreviewWidget
// ─────────────────────────────────────────────────────────────────────────────

/// Live search result preview bound to a data source.
pub struct PreviewWidget {
    fragment: Fragment,
    source: Rc<dyn DataSource>,
    options: PreviewOptions,
    regions: Regions,
    counter: Option<SharedElement>,
    units: TextUnits,
    state: WidgetState,
}

impl PreviewWidget {
    /// Build a widget over `fragment`, subscribe it to `source` and render once.
    ///
    /// The listener holds a weak reference, so dropping the returned handle
    /// turns later notifications into no-ops.
    pub fn attach(
        fragment: Fragment,
        source: Rc<dyn DataSource>,
        options: PreviewOptions,
    ) -> Rc<RefCell<Self>> {
        let widget = Rc::new(RefCell::new(Self::new(
            fragment,
            Rc::clone(&source),
            options,
        )));

        let weak = Rc::downgrade(&widget);
        source.add_change_listener(Box::new(move || {
            if let Some(widget) = weak.upgrade() {
                widget.borrow_mut().refresh();
            }
        }));

        widget.borrow_mut().refresh();
        info!("Preview widget attached");
        widget
    }

    fn new(fragment: Fragment, source: Rc<dyn DataSource>, options: PreviewOptions) -> Self {
        let regions = Self::collect_elements(&fragment, &options);
        let counter = Self::add_description_counter(source.as_ref(), &options);

        Self {
            fragment,
            source,
            options,
            regions,
            counter,
            units: TextUnits::default(),
            state: WidgetState::default(),
        }
    }

    /// Resolve each region selector. Unresolved regions stay `None` and the
    /// features that need them become no-ops.
    fn collect_elements(fragment: &Fragment, options: &PreviewOptions) -> Regions {
        let find = |name: &str, selector: &str| {
            let found = fragment
                .query_str(selector)
                .unwrap_or_warn_default(None, &format!("Preview {} selector", name));
            if found.is_none() {
                warn!("Preview {} region '{}' not found", name, selector);
            }
            found
        };

        Regions {
            body: find("body", &options.body_selector),
            hint: find("hint", &options.hint_selector),
            title: find("title", &options.title_selector),
            url: find("url", &options.url_selector),
            description: find("description", &options.description_selector),
        }
    }

    fn add_description_counter(
        source: &dyn DataSource,
        options: &PreviewOptions,
    ) -> Option<SharedElement> {
        let counter = source
            .add_description_counter(Element::new("span").with_class(&options.counter_class));
        if counter.is_none() {
            warn!("Data source has no place for the description counter");
        }
        counter
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Refresh cycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-read the source and re-render.
    pub fn refresh(&mut self) {
        let data = self.collect_data();

        self.update_description_counter(&data.description);

        if !Self::validate_data(&data) {
            debug!("Preview data empty, showing hint");
            self.hide_body();
            return;
        }

        self.render_data(&data);
        self.show_body();
    }

    pub fn collect_data(&self) -> PreviewData {
        PreviewData {
            title: self.source.title(),
            url: self.source.url(),
            description: self.source.description(),
        }
    }

    /// Show `(N/LIMIT)` and toggle the limit class.
    pub fn update_description_counter(&mut self, text: &str) {
        let length = char_count(text);
        let limit = self.options.description_limit;
        let exceeded = length > limit;

        self.state.description_length = length;
        self.state.limit_exceeded = exceeded;

        let Some(counter) = &self.counter else {
            return;
        };
        let mut counter = counter.borrow_mut();
        counter.set_text(format!("({}/{})", length, limit));
        if exceeded {
            counter.add_class(&self.options.counter_limit_class);
        } else {
            counter.remove_class(&self.options.counter_limit_class);
        }
    }

    /// Whether `data` has anything to show.
    pub fn validate_data(data: &PreviewData) -> bool {
        !data.is_empty()
    }

    /// Render all three fields into their regions, replacing the previous units.
    pub fn render_data(&mut self, data: &PreviewData) {
        let mut units = Vec::new();

        let title = truncate(&data.title, self.options.title_limit);
        let description = truncate(&data.description, self.options.description_limit);

        self.generate_text_elements(&title, self.regions.title, &mut units);
        self.generate_text_elements(&data.url, self.regions.url, &mut units);
        self.generate_text_elements(&description, self.regions.description, &mut units);

        self.units = TextUnits {
            generation: self.units.generation + 1,
            units,
        };

        debug!(
            "Rendered preview generation {} with {} units",
            self.units.generation,
            self.units.len()
        );
    }

    /// Replace `region`'s children with one hoverable span per word, separated
    /// by plain space spans.
    fn generate_text_elements(
        &mut self,
        text: &str,
        region: Option<ElementId>,
        units: &mut Vec<ElementId>,
    ) {
        let Some(region) = region else {
            return;
        };

        self.fragment.clear_children(region);

        let chunks = chunk_words(text);
        let last = chunks.len() - 1;
        for (i, chunk) in chunks.into_iter().enumerate() {
            let span = Element::new("span").with_text(chunk).hoverable();
            let Some(id) = self.fragment.append(region, span) else {
                return;
            };
            units.push(id);

            if i < last {
                self.fragment
                    .append(region, Element::new("span").with_text(" "));
            }
        }
    }

    fn hide_body(&mut self) {
        if let Some(hint) = self.regions.hint {
            self.fragment.show(hint);
        }
        if let Some(body) = self.regions.body {
            self.fragment.hide(body);
        }
        self.state.visible = false;
    }

    fn show_body(&mut self) {
        if let Some(hint) = self.regions.hint {
            self.fragment.hide(hint);
        }
        if let Some(body) = self.regions.body {
            self.fragment.show(body);
        }
        self.state.visible = true;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Hover
    // ─────────────────────────────────────────────────────────────────────────

    fn highlighter(&mut self) -> UnitMarker<'_> {
        UnitMarker {
            fragment: &mut self.fragment,
            units: &self.units,
            class: &self.options.keyword_mark_class,
        }
    }

    /// Pointer entered `id`. Ignored unless `id` is a live hoverable unit.
    pub fn pointer_enter(&mut self, id: ElementId) {
        let text = match self.fragment.get(id) {
            Some(el) if el.is_hoverable() => el.text().to_string(),
            _ => return,
        };
        self.mark_keywords(&text);
    }

    /// Pointer left a unit. Clears every mark, whichever render `id` came from.
    pub fn pointer_leave(&mut self, _id: ElementId) {
        self.unmark_keywords();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn options(&self) -> &PreviewOptions {
        &self.options
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    pub fn region(&self, region: Region) -> Option<ElementId> {
        match region {
            Region::Body => self.regions.body,
            Region::Hint => self.regions.hint,
            Region::Field(Field::Title) => self.regions.title,
            Region::Field(Field::Url) => self.regions.url,
            Region::Field(Field::Description) => self.regions.description,
        }
    }

}

#[cfg(test)]
impl TextUnits {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
impl PreviewWidget {
    pub fn text_units(&self) -> &TextUnits {
        &self.units
    }

    pub fn counter(&self) -> Option<&SharedElement> {
        self.counter.as_ref()
    }

    /// Rendered text of a field, separators included.
    pub fn rendered_text(&self, field: Field) -> Option<String> {
        self.region(Region::Field(field))
            .map(|id| self.fragment.text_content(id))
    }

    /// Texts of the hoverable units rendered for `field`, in order.
    pub fn field_words(&self, field: Field) -> Vec<&str> {
        let Some(region) = self.region(Region::Field(field)) else {
            return Vec::new();
        };
        self.fragment
            .children(region)
            .iter()
            .filter_map(|&id| self.fragment.get(id))
            .filter(|el| el.is_hoverable())
            .map(Element::text)
            .collect()
    }

    /// Units currently carrying the keyword mark.
    pub fn marked_units(&self) -> Vec<ElementId> {
        let class = &self.options.keyword_mark_class;
        self.units
            .ids()
            .iter()
            .copied()
            .filter(|&id| self.fragment.has_class(id, class))
            .collect()
    }
}

impl KeywordHighlighter for PreviewWidget {
    fn mark_keywords(&mut self, text: &str) {
        self.highlighter().mark_keywords(text);
    }

    fn unmark_keywords(&mut self) {
        self.highlighter().unmark_keywords();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Editing form data source
//!
//! `FormSource` is the data source the application edits: a title, a URL
//! alias and a description typed by the user. The page title shown in the
//! snippet comes from a template with a `##title##` placeholder, and the URL
//! is the configured base URL joined with the alias.

use super::dom::Element;
use super::source::{ChangeListener, DataSource, SharedElement};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Placeholder replaced by the typed title in [`FormOptions::page_title_template`].
pub const TITLE_PLACEHOLDER: &str = "##title##";

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// How the form turns typed values into snippet fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    /// Site root the alias is appended to, e.g. `https://example.com`
    pub base_url: String,
    /// Page title pattern, e.g. `##title## | Example Shop`
    pub page_title_template: String,
    /// Notice shown while the record is excluded from search indexing
    pub not_indexed_message: String,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            page_title_template: TITLE_PLACEHOLDER.to_string(),
            not_indexed_message: "This record is not indexed by search engines.".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fields
// ─────────────────────────────────────────────────────────────────────────────

/// Raw values typed into the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFields {
    pub title: String,
    pub alias: String,
    pub description: String,
    /// Whether search engines may index the record
    pub indexed: bool,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            alias: String::new(),
            description: String::new(),
            indexed: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FormSource
// ─────────────────────────────────────────────────────────────────────────────

/// The editing form, acting as the preview's data source.
pub struct FormSource {
    options: FormOptions,
    fields: RefCell<FormFields>,
    listeners: RefCell<Vec<Rc<dyn Fn()>>>,
    counter: RefCell<Option<SharedElement>>,
}

impl FormSource {
    /// Create a form pre-filled with `fields` (e.g. a restored draft).
    pub fn with_fields(options: FormOptions, fields: FormFields) -> Self {
        Self {
            options,
            fields: RefCell::new(fields),
            listeners: RefCell::new(Vec::new()),
            counter: RefCell::new(None),
        }
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn set_title(&self, value: &str) {
        self.update(|f| replace_if_changed(&mut f.title, value));
    }

    pub fn set_alias(&self, value: &str) {
        self.update(|f| replace_if_changed(&mut f.alias, value));
    }

    pub fn set_description(&self, value: &str) {
        self.update(|f| replace_if_changed(&mut f.description, value));
    }

    pub fn set_indexed(&self, indexed: bool) {
        self.update(|f| {
            let changed = f.indexed != indexed;
            f.indexed = indexed;
            changed
        });
    }

    /// The notice to show while the record is excluded from indexing.
    pub fn not_indexed_notice(&self) -> Option<&str> {
        if self.fields.borrow().indexed {
            None
        } else {
            Some(&self.options.not_indexed_message)
        }
    }

    /// The counter element installed by the preview, if any.
    pub fn counter(&self) -> Option<SharedElement> {
        self.counter.borrow().clone()
    }

    /// Apply `edit` and fire listeners when it reports a change.
    ///
    /// The field borrow is released before listeners run, since they read
    /// the fields back through [`DataSource`].
    fn update(&self, edit: impl FnOnce(&mut FormFields) -> bool) {
        let changed = edit(&mut self.fields.borrow_mut());
        if changed {
            self.notify();
        }
    }

    fn notify(&self) {
        let listeners: Vec<Rc<dyn Fn()>> = self.listeners.borrow().clone();
        debug!("Form changed, notifying {} listener(s)", listeners.len());
        for listener in listeners {
            listener();
        }
    }
}

#[cfg(test)]
impl FormSource {
    pub fn new(options: FormOptions) -> Self {
        Self::with_fields(options, FormFields::default())
    }

    /// Snapshot of the raw typed values.
    pub fn fields(&self) -> FormFields {
        self.fields.borrow().clone()
    }

    /// Replace every field at once, notifying once if anything changed.
    pub fn set_fields(&self, fields: FormFields) {
        self.update(|f| {
            let changed = *f != fields;
            *f = fields;
            changed
        });
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

fn replace_if_changed(slot: &mut String, value: &str) -> bool {
    if slot == value {
        return false;
    }
    slot.clear();
    slot.push_str(value);
    true
}

/// Join `base` and `path` with exactly one slash between them.
///
/// A path made only of slashes stays `/` without a base, so a typed alias
/// never renders as an empty URL.
fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let trimmed = path.trim_start_matches('/');
    if base.is_empty() {
        if trimmed.is_empty() && !path.is_empty() {
            return "/".to_string();
        }
        return trimmed.to_string();
    }
    format!("{}/{}", base, trimmed)
}

impl DataSource for FormSource {
    fn title(&self) -> String {
        let fields = self.fields.borrow();
        if fields.title.is_empty() {
            return String::new();
        }
        self.options
            .page_title_template
            .replace(TITLE_PLACEHOLDER, &fields.title)
    }

    fn url(&self) -> String {
        let fields = self.fields.borrow();
        if fields.alias.is_empty() {
            return String::new();
        }
        join_url(&self.options.base_url, &fields.alias)
    }

    fn description(&self) -> String {
        self.fields.borrow().description.clone()
    }

    fn add_change_listener(&self, listener: ChangeListener) {
        self.listeners.borrow_mut().push(Rc::from(listener));
    }

    fn add_description_counter(&self, counter: Element) -> Option<SharedElement> {
        let shared = Rc::new(RefCell::new(counter));
        *self.counter.borrow_mut() = Some(Rc::clone(&shared));
        Some(shared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_listener(source: &FormSource) -> Rc<Cell<usize>> {
        let calls = Rc::new(Cell::new(0));
        let handle = Rc::clone(&calls);
        source.add_change_listener(Box::new(move || handle.set(handle.get() + 1)));
        calls
    }

    #[test]
    fn test_title_uses_template() {
        let source = FormSource::new(FormOptions {
            page_title_template: "##title## | Example Shop".to_string(),
            ..FormOptions::default()
        });
        assert_eq!(source.title(), "");
        source.set_title("Red shoes");
        assert_eq!(source.title(), "Red shoes | Example Shop");
    }

    #[test]
    fn test_default_template_is_plain_title() {
        let source = FormSource::new(FormOptions::default());
        source.set_title("Plain");
        assert_eq!(source.title(), "Plain");
    }

    #[test]
    fn test_url_joins_base_and_alias() {
        let source = FormSource::new(FormOptions {
            base_url: "https://example.com/".to_string(),
            ..FormOptions::default()
        });
        assert_eq!(source.url(), "");
        source.set_alias("/news/red-shoes.html");
        assert_eq!(source.url(), "https://example.com/news/red-shoes.html");
    }

    #[test]
    fn test_url_without_base_is_alias() {
        let source = FormSource::new(FormOptions::default());
        source.set_alias("red-shoes");
        assert_eq!(source.url(), "red-shoes");
    }

    #[test]
    fn test_root_alias_without_base_is_slash() {
        let source = FormSource::new(FormOptions::default());
        source.set_alias("/");
        assert_eq!(source.url(), "/");
        source.set_alias("///");
        assert_eq!(source.url(), "/");
    }

    #[test]
    fn test_root_alias_with_base_keeps_trailing_slash() {
        let source = FormSource::new(FormOptions {
            base_url: "https://example.com".to_string(),
            ..FormOptions::default()
        });
        source.set_alias("/");
        assert_eq!(source.url(), "https://example.com/");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("", "/"), "/");
        assert_eq!(join_url("", "a/b"), "a/b");
        assert_eq!(join_url("https://x.org//", "//a"), "https://x.org/a");
    }

    #[test]
    fn test_listeners_fire_only_on_change() {
        let source = FormSource::new(FormOptions::default());
        let calls = counting_listener(&source);

        source.set_description("hello");
        assert_eq!(calls.get(), 1);
        source.set_description("hello");
        assert_eq!(calls.get(), 1);
        source.set_indexed(true);
        assert_eq!(calls.get(), 1);
        source.set_indexed(false);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_listeners_fire_in_registration_order() {
        let source = FormSource::new(FormOptions::default());
        let order = Rc::new(RefCell::new(Vec::new()));
        for id in 0..3 {
            let order = Rc::clone(&order);
            source.add_change_listener(Box::new(move || order.borrow_mut().push(id)));
        }
        source.set_title("x");
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        assert_eq!(source.listener_count(), 3);
    }

    #[test]
    fn test_listener_can_read_fields() {
        let source = Rc::new(FormSource::new(FormOptions::default()));
        let seen = Rc::new(RefCell::new(String::new()));
        let (reader, sink) = (Rc::downgrade(&source), Rc::clone(&seen));
        source.add_change_listener(Box::new(move || {
            if let Some(source) = reader.upgrade() {
                *sink.borrow_mut() = source.description();
            }
        }));
        source.set_description("read back");
        assert_eq!(*seen.borrow(), "read back");
    }

    #[test]
    fn test_set_fields_notifies_once() {
        let source = FormSource::new(FormOptions::default());
        let calls = counting_listener(&source);
        source.set_fields(FormFields {
            title: "t".to_string(),
            alias: "a".to_string(),
            description: "d".to_string(),
            indexed: true,
        });
        assert_eq!(calls.get(), 1);
        assert_eq!(source.fields().alias, "a");
    }

    #[test]
    fn test_not_indexed_notice() {
        let source = FormSource::new(FormOptions::default());
        assert!(source.not_indexed_notice().is_none());
        source.set_indexed(false);
        assert_eq!(
            source.not_indexed_notice(),
            Some(FormOptions::default().not_indexed_message.as_str())
        );
    }

    #[test]
    fn test_counter_is_shared_with_caller() {
        let source = FormSource::new(FormOptions::default());
        assert!(source.counter().is_none());
        let handle = source
            .add_description_counter(Element::new("span").with_class("counter"))
            .unwrap();
        handle.borrow_mut().set_text("(3/156)");
        assert_eq!(source.counter().unwrap().borrow().text(), "(3/156)");
    }
}

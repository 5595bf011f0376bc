//! DOM-like element arena for the preview container
//!
//! The preview widget writes into a small retained element tree: regions,
//! word spans, separator spans. Elements live in a generational arena so an
//! `ElementId` handed out by one render stops resolving once that render's
//! subtree is cleared. Operations on a stale id are silent no-ops.
//!
//! # Example
//!
//! ```ignore
//! let mut fragment = Fragment::new(Element::new("div"));
//! let title = fragment
//!     .append(fragment.root(), Element::new("h3").with_attribute("data-ssp-title", ""))
//!     .unwrap();
//! assert_eq!(fragment.query_str("[data-ssp-title]").unwrap(), Some(title));
//! ```

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Element
// ─────────────────────────────────────────────────────────────────────────────

/// A single element: tag, class list, attributes and own text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    hidden: bool,
    hoverable: bool,
}

impl Element {
    /// Create an empty element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Mark the element as reacting to pointer enter/leave.
    #[must_use]
    pub fn hoverable(mut self) -> Self {
        self.hoverable = true;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Add a class. Adding a class that is already present is a no-op.
    pub fn add_class(&mut self, class: &str) {
        if !self.classes.contains(class) {
            self.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn is_hoverable(&self) -> bool {
        self.hoverable
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Selector
// ─────────────────────────────────────────────────────────────────────────────

/// Pattern for the compound selectors the preview markup uses:
/// an optional tag, any number of `.class`, any number of `[attr]`/`[attr=value]`.
fn selector_regex() -> &'static Regex {
    static SELECTOR: OnceLock<Regex> = OnceLock::new();
    SELECTOR.get_or_init(|| {
        Regex::new(r"^([A-Za-z][\w-]*)?((?:\.[\w-]+)*)((?:\[[\w-]+(?:=[^\]]*)?\])*)$")
            .expect("selector pattern is valid")
    })
}

fn attribute_regex() -> &'static Regex {
    static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE.get_or_init(|| {
        Regex::new(r#"\[([\w-]+)(?:=["']?([^\]"']*)["']?)?\]"#).expect("attribute pattern is valid")
    })
}

/// A parsed compound selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Selector {
    /// Parse a selector such as `.preview-body`, `[data-ssp-title]` or `span.mark`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSelector` for empty input or combinators
    /// (descendant, child, pseudo-classes) which are not supported.
    pub fn parse(selector: &str) -> Result<Self> {
        let trimmed = selector.trim();
        let invalid = || Error::InvalidSelector {
            selector: selector.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid());
        }

        let caps = selector_regex().captures(trimmed).ok_or_else(invalid)?;

        let tag = caps.get(1).map(|m| m.as_str().to_ascii_lowercase());
        let classes = caps
            .get(2)
            .map(|m| {
                m.as_str()
                    .split('.')
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let attributes = caps
            .get(3)
            .map(|m| {
                attribute_regex()
                    .captures_iter(m.as_str())
                    .map(|a| (a[1].to_string(), a.get(2).map(|v| v.as_str().to_string())))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            tag,
            classes,
            attributes,
        })
    }

    /// Whether `element` satisfies every part of this selector.
    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }

        self.attributes
            .iter()
            .all(|(name, value)| match (element.attribute(name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fragment (generational arena)
// ─────────────────────────────────────────────────────────────────────────────

/// Handle to an element inside a [`Fragment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Node {
    element: Element,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A rooted tree of elements.
#[derive(Debug)]
pub struct Fragment {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: ElementId,
}

impl Fragment {
    /// Create a fragment whose root is `root`.
    pub fn new(root: Element) -> Self {
        let mut fragment = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: ElementId {
                index: 0,
                generation: 0,
            },
        };
        fragment.root = fragment.insert(root, None);
        fragment
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    fn insert(&mut self, element: Element, parent: Option<ElementId>) -> ElementId {
        let node = Node {
            element,
            parent,
            children: Vec::new(),
        };

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            ElementId {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            ElementId {
                index: (self.slots.len() - 1) as u32,
                generation: 0,
            }
        }
    }

    fn node(&self, id: ElementId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Whether `id` still refers to a live element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.node(id).is_some()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.node(id).map(|n| &n.element)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.node_mut(id).map(|n| &mut n.element)
    }

    /// Append `element` as the last child of `parent`.
    ///
    /// Returns `None` if `parent` is stale.
    pub fn append(&mut self, parent: ElementId, element: Element) -> Option<ElementId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.insert(element, Some(parent));
        self.node_mut(parent)?.children.push(id);
        Some(id)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Remove every descendant of `id`, invalidating their ids.
    pub fn clear_children(&mut self, id: ElementId) {
        let children = match self.node_mut(id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };

        let mut stack = children;
        while let Some(child) = stack.pop() {
            let Some(slot) = self.slots.get_mut(child.index as usize) else {
                continue;
            };
            if slot.generation != child.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
            }
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(child.index);
        }
    }

    /// First descendant of the root (depth-first, document order) matching `selector`.
    pub fn query(&self, selector: &Selector) -> Option<ElementId> {
        self.query_within(self.root, selector)
    }

    /// First descendant of `scope` matching `selector`; `scope` itself is not considered.
    pub fn query_within(&self, scope: ElementId, selector: &Selector) -> Option<ElementId> {
        let mut stack: Vec<ElementId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            if selector.matches(&node.element) {
                return Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Parse `selector` and query the fragment with it.
    pub fn query_str(&self, selector: &str) -> Result<Option<ElementId>> {
        Ok(self.query(&Selector::parse(selector)?))
    }

    /// Own text of `id` followed by the text content of its descendants.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: ElementId, out: &mut String) {
        if let Some(node) = self.node(id) {
            out.push_str(&node.element.text);
            for &child in &node.children {
                self.collect_text(child, out);
            }
        }
    }

    /// An element is visible when neither it nor any ancestor is hidden.
    pub fn is_visible(&self, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            match self.node(cur) {
                Some(node) if node.element.hidden => return false,
                Some(node) => current = node.parent,
                None => return false,
            }
        }
        true
    }

    pub fn show(&mut self, id: ElementId) {
        if let Some(el) = self.get_mut(id) {
            el.show();
        }
    }

    pub fn hide(&mut self, id: ElementId) {
        if let Some(el) = self.get_mut(id) {
            el.hide();
        }
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.get_mut(id) {
            el.add_class(class);
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.get_mut(id) {
            el.remove_class(class);
        }
    }
}

#[cfg(test)]
impl Fragment {
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).is_some_and(|el| el.has_class(class))
    }

    /// Number of live elements, root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Fragment, ElementId, ElementId) {
        let mut fragment = Fragment::new(Element::new("div").with_class("container"));
        let root = fragment.root();
        let body = fragment
            .append(root, Element::new("div").with_class("preview-body"))
            .unwrap();
        let title = fragment
            .append(body, Element::new("h3").with_attribute("data-ssp-title", ""))
            .unwrap();
        (fragment, body, title)
    }

    #[test]
    fn test_selector_parse_forms() {
        assert!(Selector::parse(".preview-body").is_ok());
        assert!(Selector::parse("[data-ssp-url]").is_ok());
        assert!(Selector::parse("span.keyword-mark").is_ok());
        assert!(Selector::parse("[data-kind=title]").is_ok());
        assert!(Selector::parse("div").is_ok());
    }

    #[test]
    fn test_selector_parse_rejects_unsupported() {
        assert!(matches!(
            Selector::parse(""),
            Err(Error::InvalidSelector { .. })
        ));
        assert!(Selector::parse("div > span").is_err());
        assert!(Selector::parse(".a .b").is_err());
        assert!(Selector::parse("a:hover").is_err());
    }

    #[test]
    fn test_selector_matches_attribute_value() {
        let sel = Selector::parse("[data-kind=title]").unwrap();
        assert!(sel.matches(&Element::new("h3").with_attribute("data-kind", "title")));
        assert!(!sel.matches(&Element::new("h3").with_attribute("data-kind", "url")));
        assert!(!sel.matches(&Element::new("h3")));

        let quoted = Selector::parse(r#"[data-kind="title"]"#).unwrap();
        assert!(quoted.matches(&Element::new("h3").with_attribute("data-kind", "title")));
    }

    #[test]
    fn test_query_finds_descendants_in_document_order() {
        let (mut fragment, body, title) = sample();
        assert_eq!(fragment.query_str(".preview-body").unwrap(), Some(body));
        assert_eq!(fragment.query_str("[data-ssp-title]").unwrap(), Some(title));
        assert_eq!(fragment.query_str(".missing").unwrap(), None);

        let second = fragment
            .append(body, Element::new("h3").with_attribute("data-ssp-title", ""))
            .unwrap();
        assert_ne!(second, title);
        assert_eq!(fragment.query_str("[data-ssp-title]").unwrap(), Some(title));
    }

    #[test]
    fn test_query_skips_root() {
        let (fragment, _, _) = sample();
        assert_eq!(fragment.query_str(".container").unwrap(), None);
    }

    #[test]
    fn test_clear_children_invalidates_ids() {
        let (mut fragment, body, title) = sample();
        let span = fragment
            .append(title, Element::new("span").with_text("word"))
            .unwrap();
        assert_eq!(fragment.len(), 4);

        fragment.clear_children(body);
        assert!(!fragment.contains(title));
        assert!(!fragment.contains(span));
        assert!(fragment.get(span).is_none());
        assert_eq!(fragment.len(), 2);

        // Reused slots get a new generation, old ids stay dead
        let fresh = fragment.append(body, Element::new("span")).unwrap();
        assert!(fragment.contains(fresh));
        assert!(!fragment.contains(span));
        assert!(!fragment.contains(title));
    }

    #[test]
    fn test_stale_id_operations_are_noops() {
        let (mut fragment, body, title) = sample();
        fragment.clear_children(body);
        fragment.add_class(title, "x");
        fragment.hide(title);
        assert!(!fragment.has_class(title, "x"));
        assert!(fragment.append(title, Element::new("span")).is_none());
        assert_eq!(fragment.text_content(title), "");
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        let (mut fragment, _, title) = sample();
        fragment.append(title, Element::new("span").with_text("hello"));
        fragment.append(title, Element::new("span").with_text(" "));
        fragment.append(title, Element::new("span").with_text("world"));
        assert_eq!(fragment.text_content(title), "hello world");
    }

    #[test]
    fn test_visibility_follows_ancestors() {
        let (mut fragment, body, title) = sample();
        assert!(fragment.is_visible(title));
        fragment.hide(body);
        assert!(!fragment.is_visible(title));
        assert!(!fragment.is_visible(body));
        fragment.show(body);
        assert!(fragment.is_visible(title));
    }

    #[test]
    fn test_class_toggle_is_idempotent() {
        let mut el = Element::new("span");
        el.add_class("keyword-mark");
        el.add_class("keyword-mark");
        assert!(el.has_class("keyword-mark"));
        assert_eq!(el, Element::new("span").with_class("keyword-mark"));
        el.remove_class("keyword-mark");
        el.remove_class("keyword-mark");
        assert!(!el.has_class("keyword-mark"));
    }
}

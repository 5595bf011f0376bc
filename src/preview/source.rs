//! Data source contract for the preview widget
//!
//! A data source supplies the three snippet fields and tells the widget
//! when any of them changed. It also hosts the live description counter in
//! its own UI, next to the description input.

use super::dom::Element;
use std::cell::RefCell;
use std::rc::Rc;

/// Callback fired after any tracked field changed.
pub type ChangeListener = Box<dyn Fn()>;

/// An element shared between the widget (writer) and the data source's UI (reader).
pub type SharedElement = Rc<RefCell<Element>>;

/// Supplier of the snippet text.
///
/// Methods take `&self`; sources are shared behind `Rc` with the widget
/// and keep their mutable state in cells.
pub trait DataSource {
    fn title(&self) -> String;

    fn url(&self) -> String;

    fn description(&self) -> String;

    /// Register a listener for the lifetime of the source.
    fn add_change_listener(&self, listener: ChangeListener);

    /// Take ownership of `counter` and place it in the source's UI.
    ///
    /// Returns the shared handle the widget writes to, or `None` when the
    /// source has nowhere to show a counter.
    fn add_description_counter(&self, counter: Element) -> Option<SharedElement>;
}

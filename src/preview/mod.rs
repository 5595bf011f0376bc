//! Search result preview module for SERP Preview
//!
//! This module renders a live search-engine result snippet from an editing
//! form: per-field truncation, a description length counter, and hover
//! highlighting of repeated words across title, URL and description.

mod chunk;
mod dom;
mod form;
mod options;
mod source;
mod template;
mod view;
mod widget;

pub use form::{FormFields, FormOptions, FormSource, TITLE_PLACEHOLDER};
pub use options::{PreviewOptions, DEFAULT_DESCRIPTION_LIMIT, DEFAULT_TITLE_LIMIT};
pub use source::DataSource;
pub use template::default_fragment;
pub use view::{counter_label, PreviewView};
pub use widget::PreviewWidget;

//! Preview widget options
//!
//! Every option the widget recognises, with its default. The struct is
//! immutable once handed to the widget; a settings change builds a new
//! widget.

use serde::{Deserialize, Serialize};

/// Default maximum number of title characters shown in the snippet.
pub const DEFAULT_TITLE_LIMIT: usize = 55;

/// Default maximum number of description characters shown in the snippet.
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 156;

/// Configuration for a [`PreviewWidget`](super::PreviewWidget).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewOptions {
    /// Region holding the rendered snippet
    pub body_selector: String,
    /// Region shown instead of the body while there is nothing to preview
    pub hint_selector: String,
    pub title_selector: String,
    pub url_selector: String,
    pub description_selector: String,
    /// Class applied to word units matching the hovered word
    pub keyword_mark_class: String,
    /// Class of the description counter element
    pub counter_class: String,
    /// Class added to the counter while the description is over its limit
    pub counter_limit_class: String,
    pub title_limit: usize,
    pub description_limit: usize,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            body_selector: ".preview-body".to_string(),
            hint_selector: ".preview-hint".to_string(),
            title_selector: "[data-ssp-title]".to_string(),
            url_selector: "[data-ssp-url]".to_string(),
            description_selector: "[data-ssp-description]".to_string(),
            keyword_mark_class: "keyword-mark".to_string(),
            counter_class: "seo-serp-preview-counter".to_string(),
            counter_limit_class: "limit-exceeded".to_string(),
            title_limit: DEFAULT_TITLE_LIMIT,
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
        }
    }
}

impl PreviewOptions {
    /// Minimum accepted character limit.
    pub const MIN_LIMIT: usize = 1;
    /// Maximum accepted character limit.
    pub const MAX_LIMIT: usize = 1000;

    /// Clamp limits into range and restore defaults for blank selectors or class names.
    pub fn sanitize(&mut self) {
        self.title_limit = self.title_limit.clamp(Self::MIN_LIMIT, Self::MAX_LIMIT);
        self.description_limit = self
            .description_limit
            .clamp(Self::MIN_LIMIT, Self::MAX_LIMIT);

        let defaults = Self::default();
        let fields = [
            (&mut self.body_selector, defaults.body_selector),
            (&mut self.hint_selector, defaults.hint_selector),
            (&mut self.title_selector, defaults.title_selector),
            (&mut self.url_selector, defaults.url_selector),
            (&mut self.description_selector, defaults.description_selector),
            (&mut self.keyword_mark_class, defaults.keyword_mark_class),
            (&mut self.counter_class, defaults.counter_class),
            (&mut self.counter_limit_class, defaults.counter_limit_class),
        ];
        for (value, default) in fields {
            if value.trim().is_empty() {
                *value = default;
            }
        }
    }
}

#[cfg(test)]
impl PreviewOptions {
    #[must_use]
    pub fn with_title_limit(mut self, limit: usize) -> Self {
        self.title_limit = limit;
        self
    }

    #[must_use]
    pub fn with_description_limit(mut self, limit: usize) -> Self {
        self.description_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = PreviewOptions::default();
        assert_eq!(opts.title_limit, 55);
        assert_eq!(opts.description_limit, 156);
        assert_eq!(opts.body_selector, ".preview-body");
        assert_eq!(opts.keyword_mark_class, "keyword-mark");
        assert_eq!(opts.counter_limit_class, "limit-exceeded");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let opts: PreviewOptions = serde_json::from_str(r#"{"title_limit": 60}"#).unwrap();
        assert_eq!(opts.title_limit, 60);
        assert_eq!(opts.description_limit, DEFAULT_DESCRIPTION_LIMIT);
        assert_eq!(opts.url_selector, "[data-ssp-url]");
    }

    #[test]
    fn test_sanitize_clamps_limits() {
        let mut opts = PreviewOptions::default()
            .with_title_limit(0)
            .with_description_limit(50_000);
        opts.sanitize();
        assert_eq!(opts.title_limit, PreviewOptions::MIN_LIMIT);
        assert_eq!(opts.description_limit, PreviewOptions::MAX_LIMIT);
    }

    #[test]
    fn test_sanitize_restores_blank_names() {
        let mut opts = PreviewOptions {
            hint_selector: "  ".to_string(),
            keyword_mark_class: String::new(),
            ..PreviewOptions::default()
        };
        opts.sanitize();
        assert_eq!(opts.hint_selector, ".preview-hint");
        assert_eq!(opts.keyword_mark_class, "keyword-mark");
    }
}

//! Default preview markup
//!
//! ```text
//! div.seo-serp-preview
//! ├── div.preview-body
//! │   ├── h3[data-ssp-title]
//! │   ├── cite[data-ssp-url]
//! │   └── p[data-ssp-description]
//! └── div.preview-hint   (hint message)
//! ```

use super::dom::{Element, Fragment};

/// Build the standard preview container with `hint` as the hint text.
pub fn default_fragment(hint: &str) -> Fragment {
    let mut fragment = Fragment::new(Element::new("div").with_class("seo-serp-preview"));
    let root = fragment.root();

    if let Some(body) = fragment.append(root, Element::new("div").with_class("preview-body")) {
        fragment.append(body, Element::new("h3").with_attribute("data-ssp-title", ""));
        fragment.append(body, Element::new("cite").with_attribute("data-ssp-url", ""));
        fragment.append(
            body,
            Element::new("p").with_attribute("data-ssp-description", ""),
        );
    }

    fragment.append(
        root,
        Element::new("div").with_class("preview-hint").with_text(hint),
    );

    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::PreviewOptions;

    #[test]
    fn test_default_selectors_resolve() {
        let fragment = default_fragment("hint");
        let opts = PreviewOptions::default();
        for selector in [
            &opts.body_selector,
            &opts.hint_selector,
            &opts.title_selector,
            &opts.url_selector,
            &opts.description_selector,
        ] {
            assert!(
                fragment.query_str(selector).unwrap().is_some(),
                "{} not found",
                selector
            );
        }
    }

    #[test]
    fn test_hint_text() {
        let fragment = default_fragment("Type something");
        let hint = fragment.query_str(".preview-hint").unwrap().unwrap();
        assert_eq!(fragment.text_content(hint), "Type something");
    }

    #[test]
    fn test_field_regions_live_inside_body() {
        let fragment = default_fragment("hint");
        let body = fragment.query_str(".preview-body").unwrap().unwrap();
        let title = fragment.query_str("[data-ssp-title]").unwrap().unwrap();
        assert_eq!(fragment.parent(title), Some(body));
    }
}

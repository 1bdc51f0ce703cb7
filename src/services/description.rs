//! Description extractor.

use scraper::{Html, Selector};

use crate::models::Field;

/// Content of the page's meta-description tag.
///
/// A missing tag, or a tag without a `content` attribute, is reported as
/// absent; the record then carries no description.
pub fn extract_description(document: &Html, meta_selector: &Selector) -> Field<String> {
    let Some(meta) = document.select(meta_selector).next() else {
        return Field::absent("no meta description tag");
    };

    match meta.value().attr("content") {
        Some(content) => Field::Present(content.trim().to_string()),
        None => Field::malformed("meta description has no content attribute"),
    }
}

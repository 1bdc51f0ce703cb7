//! Selector utilities shared by the field extractors.
//!
//! Text helpers for table cells and the named-anchor lookup that finds the
//! table belonging to a labeled page section.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::Field;

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Trimmed text of an element, with all descendant text nodes joined.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Visible text of a cell: the first hyperlink's text when the cell has one,
/// otherwise the cell's own text. Always trimmed, empty when there is none.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    let link = Selector::parse("a").ok();
    match link.as_ref().and_then(|sel| cell.select(sel).next()) {
        Some(anchor) => element_text(anchor),
        None => element_text(cell),
    }
}

/// Text of the first hyperlink in a cell that is not a pure image link.
pub fn link_text(cell: ElementRef<'_>) -> Option<String> {
    let link = Selector::parse("a:not(.image)").ok()?;
    cell.select(&link)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

fn is_heading(element: &ElementRef<'_>) -> bool {
    matches!(
        element.value().name(),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    ) || element
        .value()
        .classes()
        .any(|class| class == "mw-heading")
}

/// The block that encloses a section anchor.
///
/// Anchors are either the heading itself or a span inside it; newer wiki
/// markup additionally wraps the heading in a `div.mw-heading`.
fn enclosing_block(anchor: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let heading = if is_heading(&anchor) {
        anchor
    } else {
        anchor.parent().and_then(ElementRef::wrap)?
    };

    match heading.parent().and_then(ElementRef::wrap) {
        Some(wrapper) if wrapper.value().classes().any(|c| c == "mw-heading") => Some(wrapper),
        _ => Some(heading),
    }
}

/// Find the table belonging to the section whose anchor has the given id.
///
/// Walks the siblings after the anchor's enclosing block and takes the first
/// table, either directly or nested in a wrapper element. The walk stops at
/// the next heading so a later section's table is never picked up.
pub fn section_table<'a>(document: &'a Html, anchor_id: &str) -> Field<ElementRef<'a>> {
    let selector = match parse_selector(&format!(r#"[id="{anchor_id}"]"#)) {
        Ok(selector) => selector,
        Err(e) => return Field::malformed(e.to_string()),
    };
    let Some(anchor) = document.select(&selector).next() else {
        return Field::absent(format!("anchor #{anchor_id} not found"));
    };
    let Some(block) = enclosing_block(anchor) else {
        return Field::absent(format!("anchor #{anchor_id} has no enclosing block"));
    };

    let Ok(table_sel) = parse_selector("table") else {
        return Field::malformed("table selector");
    };
    for sibling in block.next_siblings().filter_map(ElementRef::wrap) {
        if sibling.value().name() == "table" {
            return Field::Present(sibling);
        }
        if is_heading(&sibling) {
            break;
        }
        if let Some(table) = sibling.select(&table_sel).next() {
            return Field::Present(table);
        }
    }

    Field::absent(format!("no table follows anchor #{anchor_id}"))
}

//! Infobox extractor.
//!
//! Reads the key/value summary table of a level page.

use scraper::{ElementRef, Html, Selector};

use crate::models::{Field, InfoboxRecord};
use crate::services::selectors::{cell_text, element_text};

/// Extract the infobox of a page.
///
/// Only rows matched by `row_selector` are considered. A row contributes an
/// entry when its first cell has a bold label and its second cell has text;
/// anything else is skipped. Duplicate labels keep the last value.
pub fn extract_infobox(
    document: &Html,
    row_selector: &Selector,
    cell_selector: &Selector,
    label_selector: &Selector,
) -> InfoboxRecord {
    let mut record = InfoboxRecord::new();

    for row in document.select(row_selector) {
        if let Field::Present((label, value)) = parse_row(row, cell_selector, label_selector) {
            record.insert(label, value);
        }
    }

    record
}

fn parse_row(
    row: ElementRef<'_>,
    cell_selector: &Selector,
    label_selector: &Selector,
) -> Field<(String, String)> {
    let cells: Vec<ElementRef<'_>> = row.select(cell_selector).collect();
    let [label_cell, value_cell, ..] = cells.as_slice() else {
        return Field::absent("row has fewer than two cells");
    };

    let value = cell_text(*value_cell);
    if value.is_empty() {
        return Field::absent("value cell is empty");
    }

    let Some(label) = label_cell.select(label_selector).next().map(element_text) else {
        return Field::absent("label cell has no bold label");
    };
    if label.is_empty() {
        return Field::absent("label is empty");
    }

    Field::Present((label, value))
}

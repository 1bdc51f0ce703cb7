//! Enemy list extractor.

use scraper::{ElementRef, Html, Selector};

use crate::models::{Amount, Countable, Field};
use crate::services::selectors::{element_text, link_text, section_table};

/// Extract the enemies table that follows the section anchored at `anchor_id`.
///
/// Every row with data cells yields one entry: the name from the first
/// cell's non-image hyperlink and the amount from the second cell's text.
/// Rows missing either part are skipped.
pub fn extract_enemies(
    document: &Html,
    anchor_id: &str,
    row_selector: &Selector,
    cell_selector: &Selector,
) -> Field<Vec<Countable>> {
    section_table(document, anchor_id).map(|table| {
        table
            .select(row_selector)
            .filter_map(|row| parse_row(row, cell_selector).present())
            .collect()
    })
}

fn parse_row(row: ElementRef<'_>, cell_selector: &Selector) -> Field<Countable> {
    let cells: Vec<ElementRef<'_>> = row.select(cell_selector).collect();
    let Some(name_cell) = cells.first() else {
        return Field::absent("header row");
    };
    let Some(name) = link_text(*name_cell) else {
        return Field::malformed("name cell has no hyperlink");
    };
    let Some(amount_cell) = cells.get(1) else {
        return Field::malformed(format!("no amount cell for {name}"));
    };

    Field::Present(Countable::new(
        name,
        Amount::parse(&element_text(*amount_cell)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemies(html: &str) -> Field<Vec<Countable>> {
        let document = Html::parse_document(html);
        extract_enemies(
            &document,
            "Enemies",
            &Selector::parse("tr").unwrap(),
            &Selector::parse("td").unwrap(),
        )
    }

    #[test]
    fn reads_rows_in_document_order() {
        let field = enemies(
            r#"<div>
                <h2><span class="mw-headline" id="Enemies">Enemies</span></h2>
                <table class="wikitable">
                    <tr><th>Enemy</th><th>Amount</th></tr>
                    <tr>
                        <td><a class="image" href="/File:Goomba.png"><img src="g.png"></a> <a href="/Goomba">Goomba</a></td>
                        <td>16</td>
                    </tr>
                    <tr>
                        <td><a href="/Koopa_Troopa">Koopa Troopa</a></td>
                        <td> 1 </td>
                    </tr>
                    <tr>
                        <td><a href="/Piranha_Plant">Piranha Plant</a></td>
                        <td>several</td>
                    </tr>
                </table>
            </div>"#,
        );

        assert_eq!(
            field.present().unwrap(),
            vec![
                Countable::counted("Goomba", 16),
                Countable::counted("Koopa Troopa", 1),
                Countable::new("Piranha Plant", Amount::Raw("several".into())),
            ]
        );
    }

    #[test]
    fn broken_rows_are_skipped() {
        let field = enemies(
            r#"<div>
                <h2><span id="Enemies">Enemies</span></h2>
                <table>
                    <tr><td>Plain text, no link</td><td>3</td></tr>
                    <tr><td><a href="/Goomba">Goomba</a></td></tr>
                    <tr><td><a href="/Buzzy_Beetle">Buzzy Beetle</a></td><td>2</td></tr>
                </table>
            </div>"#,
        );

        assert_eq!(
            field.present().unwrap(),
            vec![Countable::counted("Buzzy Beetle", 2)]
        );
    }

    #[test]
    fn missing_anchor_is_absent() {
        let field = enemies("<div><h2><span id=\"Trivia\">Trivia</span></h2><table></table></div>");
        assert!(matches!(field, Field::Absent(_)));
    }
}

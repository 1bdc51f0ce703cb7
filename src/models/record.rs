//! Extracted level record structures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Infobox label to display value. Keys are unique; the last write wins.
pub type InfoboxRecord = BTreeMap<String, String>;

/// Amount attached to a [`Countable`].
///
/// Numeric when the source text parses as an integer, otherwise the raw token
/// is kept so a single odd cell never sinks the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Count(i64),
    Raw(String),
}

impl Amount {
    /// Parse trimmed text into a count, falling back to the raw token.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        text.parse()
            .map(Amount::Count)
            .unwrap_or_else(|_| Amount::Raw(text.to_string()))
    }

    pub fn as_count(&self) -> Option<i64> {
        match self {
            Amount::Count(n) => Some(*n),
            Amount::Raw(_) => None,
        }
    }
}

/// A name + amount pair, used for enemies and statistics entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countable {
    pub name: String,
    pub amount: Amount,
}

impl Countable {
    pub fn new(name: impl Into<String>, amount: Amount) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }

    pub fn counted(name: impl Into<String>, amount: i64) -> Self {
        Self::new(name, Amount::Count(amount))
    }
}

/// The full extracted result for one detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Detail page the record was extracted from
    pub url: String,

    /// Infobox key/value pairs
    #[serde(rename = "table_data")]
    pub infobox: InfoboxRecord,

    /// Content of the meta-description tag
    pub description: Option<String>,

    /// Enemies in document order
    pub enemies: Vec<Countable>,

    /// Statistics rows followed by any power-up counts from the bullet list
    pub statistics: Vec<Countable>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_prefers_numbers() {
        assert_eq!(Amount::parse(" 12 "), Amount::Count(12));
        assert_eq!(Amount::parse("many"), Amount::Raw("many".to_string()));
        assert_eq!(Amount::parse("3 (total)").as_count(), None);
    }

    #[test]
    fn record_serializes_in_field_order() {
        let mut infobox = InfoboxRecord::new();
        infobox.insert("World".to_string(), "1".to_string());
        let record = ItemRecord {
            url: "https://example.com/1-1".to_string(),
            infobox,
            description: None,
            enemies: vec![Countable::new("Goomba", Amount::parse("16"))],
            statistics: vec![Countable::new("Coin", Amount::Raw("lots".into()))],
        };

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"url":"https://example.com/1-1","table_data":{"World":"1"},"#,
                r#""description":null,"enemies":[{"name":"Goomba","amount":16}],"#,
                r#""statistics":[{"name":"Coin","amount":"lots"}]}"#
            )
        );

        let back: ItemRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}

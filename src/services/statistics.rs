//! Level statistics extractor.
//!
//! Statistics pages encode their counts inconsistently: some as table rows,
//! some as free-text bullets inside the same table. Both encodings are read
//! and whatever parses is kept.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Countable, ExtractConfig, Field};
use crate::services::selectors::{element_text, link_text, parse_selector, section_table};

/// Count patterns for one configured power-up.
struct Powerup {
    name: String,
    /// Lowercased name, as it appears in normalized text
    needle: String,
    /// "3 mushrooms": the closest number before the name
    leading: Regex,
    /// "mushroom x3", "mushrooms: 3"
    trailing: Regex,
}

/// Extracts statistics rows and bullet-list power-up counts.
pub struct StatisticsExtractor {
    anchor: String,
    row_sel: Selector,
    cell_sel: Selector,
    item_sel: Selector,
    number_words: Regex,
    clause_separator: Regex,
    powerups: Vec<Powerup>,
    one_up_name: String,
}

impl StatisticsExtractor {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        let mut powerups = Vec::with_capacity(config.powerups.len());
        for name in &config.powerups {
            let needle = name.to_lowercase();
            let escaped = regex::escape(&needle);
            let pattern = |pattern: String| {
                Regex::new(&pattern)
                    .map_err(|e| AppError::config(format!("power-up pattern for {name}: {e}")))
            };
            powerups.push(Powerup {
                name: name.clone(),
                leading: pattern(format!(r"([0-9]+)([^0-9]*?){escaped}"))?,
                trailing: pattern(format!(r"{escaped}\w*\s*(?:x|×|:)\s*([0-9]+)"))?,
                needle,
            });
        }

        Ok(Self {
            anchor: config.statistics_anchor.clone(),
            row_sel: parse_selector("tr")?,
            cell_sel: parse_selector("td")?,
            item_sel: parse_selector("li")?,
            number_words: Regex::new(r"\b(one|two|three|four|five)\b")
                .map_err(|e| AppError::config(e.to_string()))?,
            clause_separator: Regex::new(r"\s*(?:[,;]|\band\b)\s*")
                .map_err(|e| AppError::config(e.to_string()))?,
            powerups,
            one_up_name: config.one_up_name.clone(),
        })
    }

    /// Extract all statistics entries of a page.
    ///
    /// Absent only when the section anchor (or its table) is missing. Rows
    /// that fail to parse are dropped one by one; bullets that fail to parse
    /// add nothing.
    pub fn extract(&self, document: &Html) -> Field<Vec<Countable>> {
        section_table(document, &self.anchor).map(|table| {
            let mut entries: Vec<Countable> = table
                .select(&self.row_sel)
                .filter(|row| row.select(&self.cell_sel).next().is_some())
                .filter_map(|row| self.parse_row(row).present())
                .collect();

            let bullets: Vec<String> = table
                .select(&self.item_sel)
                .map(|item| item.text().collect::<String>())
                .collect();

            if let Some(first) = bullets.first() {
                entries.extend(self.parse_powerups(first));
            }
            if let Some(second) = bullets.get(1) {
                match self.parse_one_up(second) {
                    Field::Present(entry) => entries.push(entry),
                    other => log::debug!(
                        "1-up bullet skipped: {}",
                        other.reason().unwrap_or_default()
                    ),
                }
            }

            entries
        })
    }

    /// Parse one table row: name from the first cell's hyperlink, amount as
    /// the integer before any `(` annotation in the second cell.
    pub fn parse_row(&self, row: ElementRef<'_>) -> Field<Countable> {
        let cells: Vec<ElementRef<'_>> = row.select(&self.cell_sel).collect();
        let Some(name) = cells.first().and_then(|cell| link_text(*cell)) else {
            return Field::malformed("name cell has no hyperlink");
        };
        let Some(amount_cell) = cells.get(1) else {
            return Field::malformed(format!("no amount cell for {name}"));
        };

        let text = element_text(*amount_cell);
        let prefix = text.split('(').next().unwrap_or_default().trim();
        match prefix.parse::<i64>() {
            Ok(amount) => Field::Present(Countable::counted(name, amount)),
            Err(_) => Field::malformed(format!("amount {text:?} for {name} is not a number")),
        }
    }

    /// Lowercase and turn the spelled-out numbers one..five into digits.
    pub fn normalize_numbers(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        self.number_words
            .replace_all(&lower, |caps: &regex::Captures<'_>| {
                match &caps[1] {
                    "one" => "1",
                    "two" => "2",
                    "three" => "3",
                    "four" => "4",
                    _ => "5",
                }
                .to_string()
            })
            .into_owned()
    }

    /// Power-up counts from a free-text bullet such as
    /// "Three Mushrooms, two Fire Flowers".
    ///
    /// The bullet is split into clauses on `,`, `;` and "and". A power-up
    /// takes the number written next to its name in its own clause, either
    /// before it ("3 mushrooms") or after a marker ("mushroom x3"). A number
    /// separated from the name by another power-up's name is not used.
    pub fn parse_powerups(&self, text: &str) -> Vec<Countable> {
        let normalized = self.normalize_numbers(text);
        let clauses: Vec<&str> = self.clause_separator.split(&normalized).collect();
        let mut found = Vec::new();

        for powerup in &self.powerups {
            let mut mentions = clauses
                .iter()
                .filter(|clause| clause.contains(&powerup.needle))
                .peekable();
            if mentions.peek().is_none() {
                continue;
            }
            match mentions.find_map(|clause| self.clause_count(clause, powerup)) {
                Some(amount) => found.push(Countable::counted(powerup.name.as_str(), amount)),
                None => log::debug!("No count given for power-up {} in {:?}", powerup.name, text),
            }
        }

        found
    }

    fn clause_count(&self, clause: &str, powerup: &Powerup) -> Option<i64> {
        let names_other = |gap: &str| {
            self.powerups
                .iter()
                .any(|other| other.needle != powerup.needle && gap.contains(&other.needle))
        };

        if let Some(caps) = powerup.leading.captures(clause) {
            if !names_other(&caps[2]) {
                return caps[1].parse().ok();
            }
        }
        powerup
            .trailing
            .captures(clause)
            .and_then(|caps| caps[1].parse().ok())
    }

    /// The 1-up count from a "label: count" bullet.
    pub fn parse_one_up(&self, text: &str) -> Field<Countable> {
        let Some((_, count)) = text.rsplit_once(':') else {
            return Field::malformed(format!("{text:?} is not a label: count pair"));
        };
        match count.trim().parse::<i64>() {
            Ok(amount) => Field::Present(Countable::counted(self.one_up_name.as_str(), amount)),
            Err(_) => Field::malformed(format!("{:?} is not a number", count.trim())),
        }
    }
}

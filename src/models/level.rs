//! Level view over an extracted record, as consumed by downstream loaders.

use crate::models::{Countable, ItemRecord};

/// Infobox labels the downstream loader reads.
pub mod labels {
    pub const WORLD_LEVEL: &str = "World-Level";
    pub const WORLD: &str = "World";
    pub const TIME_LIMIT: &str = "Time limit";
    pub const GAME: &str = "Game";
    pub const BOSS: &str = "Boss";
}

/// Typed summary of one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSummary {
    pub name: Option<String>,
    pub world: Option<String>,
    pub game: Option<String>,
    pub boss: Option<String>,
    /// Numeric prefix of the "Time limit" value
    pub time_limit: Option<u32>,
    /// Sum of enemy amounts; a non-numeric amount counts as one
    pub enemy_total: i64,
    pub powerups: Vec<Countable>,
}

impl LevelSummary {
    pub fn from_record(record: &ItemRecord) -> Self {
        let field = |label: &str| record.infobox.get(label).cloned();

        Self {
            name: field(labels::WORLD_LEVEL),
            world: field(labels::WORLD),
            game: field(labels::GAME),
            boss: field(labels::BOSS),
            time_limit: record
                .infobox
                .get(labels::TIME_LIMIT)
                .and_then(|value| parse_time_limit(value)),
            enemy_total: record
                .enemies
                .iter()
                .map(|enemy| enemy.amount.as_count().unwrap_or(1))
                .sum(),
            powerups: record.statistics.clone(),
        }
    }

    /// One-line rendering for logs.
    pub fn display_line(&self) -> String {
        let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        format!(
            "{} (world {}) | time {} | boss {} | {} enemies | {} power-up entries",
            or_dash(&self.name),
            or_dash(&self.world),
            self.time_limit
                .map_or_else(|| "-".to_string(), |t| t.to_string()),
            or_dash(&self.boss),
            self.enemy_total,
            self.powerups.len()
        )
    }
}

/// Parse "<number> <unit>" and keep the number.
pub fn parse_time_limit(value: &str) -> Option<u32> {
    value.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, InfoboxRecord};

    fn sample_record() -> ItemRecord {
        let mut infobox = InfoboxRecord::new();
        infobox.insert("World-Level".into(), "1-1".into());
        infobox.insert("World".into(), "1".into());
        infobox.insert("Time limit".into(), "400 seconds".into());
        infobox.insert("Game".into(), "Super Mario Bros.".into());

        ItemRecord {
            url: "https://example.com/World_1-1".into(),
            infobox,
            description: Some("The first level".into()),
            enemies: vec![
                Countable::counted("Goomba", 16),
                Countable::new("Koopa Troopa", Amount::Raw("a few".into())),
            ],
            statistics: vec![Countable::counted("Mushroom", 3)],
        }
    }

    #[test]
    fn test_parse_time_limit() {
        assert_eq!(parse_time_limit("400 seconds"), Some(400));
        assert_eq!(parse_time_limit("300"), Some(300));
        assert_eq!(parse_time_limit("none"), None);
        assert_eq!(parse_time_limit(""), None);
    }

    #[test]
    fn test_summary_from_record() {
        let summary = LevelSummary::from_record(&sample_record());

        assert_eq!(summary.name.as_deref(), Some("1-1"));
        assert_eq!(summary.world.as_deref(), Some("1"));
        assert_eq!(summary.game.as_deref(), Some("Super Mario Bros."));
        assert_eq!(summary.boss, None);
        assert_eq!(summary.time_limit, Some(400));
        assert_eq!(summary.enemy_total, 17);
        assert_eq!(summary.powerups.len(), 1);
    }

    #[test]
    fn test_display_line() {
        let line = LevelSummary::from_record(&sample_record()).display_line();
        assert_eq!(
            line,
            "1-1 (world 1) | time 400 | boss - | 17 enemies | 1 power-up entries"
        );
    }
}

// src/pipeline/inspect.rs

//! Summaries of a previously written result set.

use crate::error::Result;
use crate::models::{LevelSummary, labels};
use crate::storage::RecordStorage;
use crate::utils::log;

/// Load stored records and log one summary line per level.
pub async fn run_inspect(storage: &dyn RecordStorage) -> Result<Vec<LevelSummary>> {
    log::header("Stored Levels");

    let records = storage.load_records().await?;
    if records.is_empty() {
        log::warn("No records to inspect. Run 'crawl' first.");
        return Ok(Vec::new());
    }

    if let Some(game) = records[0].infobox.get(labels::GAME) {
        log::info(&format!("Game: {game}"));
    }
    log::separator();

    let summaries: Vec<LevelSummary> = records.iter().map(LevelSummary::from_record).collect();
    for (record, summary) in records.iter().zip(&summaries) {
        log::sub_item(&summary.display_line());
        if summary.name.is_none() {
            log::warn(&format!("{} has no World-Level entry", record.url));
        }
    }

    log::separator();
    log::info(&format!("{} levels loaded", summaries.len()));

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CrawlOutcome, CrawlStats, OutputConfig};
    use crate::services::LevelExtractor;
    use crate::storage::LocalStorage;
    use crate::testing::{detail_page, test_config};
    use chrono::Utc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_inspect_empty_storage() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), OutputConfig::default());
        assert!(run_inspect(&storage).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_inspect_stored_records() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), OutputConfig::default());
        let extractor = LevelExtractor::new(&test_config().extract).unwrap();
        let outcome = CrawlOutcome {
            records: vec![
                extractor.extract("https://wiki.test/World_1-1", &detail_page("1-1")),
                extractor.extract("https://wiki.test/World_1-2", &detail_page("1-2")),
            ],
            discovered: 2,
            ..CrawlOutcome::default()
        };
        let now = Utc::now();
        let stats = CrawlStats::new("u", now, now, &outcome);
        storage.write_outcome(&outcome, &stats).await.unwrap();

        let summaries = run_inspect(&storage).await.unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].name.as_deref(), Some("1-2"));
        assert_eq!(summaries[0].time_limit, Some(400));
        assert_eq!(summaries[0].enemy_total, 17);
        assert_eq!(summaries[0].boss, None);
    }
}

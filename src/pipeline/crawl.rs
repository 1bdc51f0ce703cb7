// src/pipeline/crawl.rs

//! Level crawling pipeline.

use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, CrawlOutcome, CrawlStats};
use crate::services::LevelCrawler;
use crate::storage::RecordStorage;
use crate::utils::http::PageFetcher;
use crate::utils::log;

/// Run the level crawler and hand the result set to `storage`.
///
/// Individual detail pages may fail without stopping the run; their errors
/// are stored next to the records. Only a listing or storage failure aborts.
pub async fn run_crawler(
    config: Arc<Config>,
    fetcher: Arc<dyn PageFetcher>,
    storage: &dyn RecordStorage,
) -> Result<CrawlOutcome> {
    let start_time = Utc::now();
    log::header("Level Crawler");

    log::step(1, 2, "Crawl - Fetching level pages");
    log::sub_item(&format!("Listing: {}", config.source.listing_url));

    let crawler = LevelCrawler::new(Arc::clone(&config), fetcher)?;
    let outcome = crawler.crawl_all().await?;

    log::info(&format!("Found {} results", outcome.records.len()));

    log::step(2, 2, "Store - Writing results");
    let end_time = Utc::now();
    let stats = CrawlStats::new(&config.source.listing_url, start_time, end_time, &outcome);
    let summary = storage.write_outcome(&outcome, &stats).await?;

    if let Some(first) = outcome.records.first() {
        log::info("Sample record:");
        for line in serde_json::to_string_pretty(first)?.lines() {
            log::sub_item(line);
        }
    }

    log::summary(
        "Crawl Results",
        &[
            ("Links discovered", outcome.discovered.to_string()),
            ("Links excluded", outcome.excluded.to_string()),
            ("Records", summary.record_count.to_string()),
            ("Failures", summary.failure_count.to_string()),
            ("Success rate", format!("{:.1}%", stats.success_rate() * 100.0)),
            ("Output", summary.records_location.clone()),
            (
                "Written at",
                summary.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            ),
        ],
    );

    for failure in &outcome.failures {
        log::warn(&format!(
            "Not crawled: {} <{}> ({})",
            failure.title, failure.url, failure.error
        ));
    }

    Ok(outcome)
}

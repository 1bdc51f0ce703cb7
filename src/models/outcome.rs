//! Crawl run results and statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ItemRecord;

/// A detail link discovered on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLink {
    /// Absolute detail-page URL
    pub url: String,
    /// Anchor text on the listing page
    pub title: String,
}

/// A detail page that produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlFailure {
    pub url: String,
    /// Anchor text the page was listed under
    pub title: String,
    pub error: String,
}

/// Summary of a crawl run.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    /// Records in discovery order
    pub records: Vec<ItemRecord>,
    /// Per-item errors
    pub failures: Vec<CrawlFailure>,
    /// Distinct detail links found on the listing page
    pub discovered: usize,
    /// Links dropped by the exclusion markers
    pub excluded: usize,
}

impl CrawlOutcome {
    /// Number of detail pages that were actually requested.
    pub fn attempted(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Statistics written alongside the records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub listing_url: String,
    pub discovered: usize,
    pub excluded: usize,
    pub record_count: usize,
    pub failure_count: usize,
}

impl CrawlStats {
    pub fn new(
        listing_url: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        outcome: &CrawlOutcome,
    ) -> Self {
        Self {
            start_time,
            end_time,
            listing_url: listing_url.to_string(),
            discovered: outcome.discovered,
            excluded: outcome.excluded,
            record_count: outcome.records.len(),
            failure_count: outcome.failures.len(),
        }
    }

    /// Share of attempted pages that produced a record.
    pub fn success_rate(&self) -> f64 {
        let attempted = self.record_count + self.failure_count;
        if attempted == 0 {
            return 1.0;
        }
        self.record_count as f64 / attempted as f64
    }
}

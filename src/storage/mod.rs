//! Storage abstractions for crawl results.
//!
//! ## Directory Structure
//!
//! ```text
//! output/
//! ├── smb.json        # Records, one per level page, in discovery order
//! ├── failures.json   # Pages that produced no record
//! └── stats.json      # Run statistics
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{CrawlOutcome, CrawlStats, ItemRecord};

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Number of records written
    pub record_count: usize,
    /// Number of failures written
    pub failure_count: usize,
    /// Where the records went
    pub records_location: String,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for result set sinks.
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Write the records, the per-item failures, and the run statistics.
    async fn write_outcome(
        &self,
        outcome: &CrawlOutcome,
        stats: &CrawlStats,
    ) -> Result<WriteMetadata>;

    /// Load previously written records.
    async fn load_records(&self) -> Result<Vec<ItemRecord>>;
}

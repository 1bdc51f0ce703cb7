//! Local filesystem storage implementation.
//!
//! Every file is written atomically (temp file, then rename) so a crashed
//! run never leaves a half-written record array behind.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{CrawlOutcome, CrawlStats, ItemRecord, OutputConfig};
use crate::storage::{RecordStorage, WriteMetadata};

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    output: OutputConfig,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, output: OutputConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            output,
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = if self.output.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl RecordStorage for LocalStorage {
    async fn write_outcome(
        &self,
        outcome: &CrawlOutcome,
        stats: &CrawlStats,
    ) -> Result<WriteMetadata> {
        self.write_json(&self.output.records_file, &outcome.records)
            .await?;
        log::info!(
            "{} records written to {}",
            outcome.records.len(),
            self.output.records_file
        );

        self.write_json(&self.output.failures_file, &outcome.failures)
            .await?;
        if !outcome.failures.is_empty() {
            log::warn!(
                "{} failed pages listed in {}",
                outcome.failures.len(),
                self.output.failures_file
            );
        }

        // Write stats for debugging
        self.write_json(&self.output.stats_file, stats).await?;

        Ok(WriteMetadata {
            record_count: outcome.records.len(),
            failure_count: outcome.failures.len(),
            records_location: self.path(&self.output.records_file).display().to_string(),
            timestamp: Utc::now(),
        })
    }

    async fn load_records(&self) -> Result<Vec<ItemRecord>> {
        match self.read_json(&self.output.records_file).await? {
            Some(records) => Ok(records),
            None => {
                log::warn!("No {} found", self.output.records_file);
                Ok(Vec::new())
            }
        }
    }
}

// src/models/mod.rs

//! Domain models for the level crawler.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod field;
mod level;
mod outcome;
mod record;

// Re-export all public types
pub use config::{Config, CrawlerConfig, ExtractConfig, OutputConfig, SourceConfig};
pub use field::Field;
pub use level::{LevelSummary, labels, parse_time_limit};
pub use outcome::{CrawlFailure, CrawlOutcome, CrawlStats, DetailLink};
pub use record::{Amount, Countable, InfoboxRecord, ItemRecord};

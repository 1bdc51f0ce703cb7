//! Service layer for the level crawler.
//!
//! This module contains the business logic for:
//! - Selector helpers and named-anchor lookup (`selectors`)
//! - One extractor per record field (`infobox`, `description`, `enemies`, `statistics`)
//! - Listing discovery and detail crawling (`LevelCrawler`)

pub mod description;
pub mod enemies;
pub mod infobox;
mod levels;
pub mod selectors;
pub mod statistics;

pub use levels::{Discovery, LevelCrawler, LevelExtractor};
pub use statistics::StatisticsExtractor;

// src/services/levels.rs

//! Level page crawler.
//!
//! Resolves the category listing into detail links and turns every detail
//! page into an [`ItemRecord`] using the field extractors.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};
use scraper::{Html, Selector};
use url::Url;

use crate::error::Result;
use crate::models::{Config, CrawlFailure, CrawlOutcome, DetailLink, ExtractConfig, ItemRecord};
use crate::services::description::extract_description;
use crate::services::enemies::extract_enemies;
use crate::services::infobox::extract_infobox;
use crate::services::selectors::{element_text, parse_selector};
use crate::services::statistics::StatisticsExtractor;
use crate::utils::http::PageFetcher;
use crate::utils::resolve_url;

/// Runs every field extractor against one detail page.
pub struct LevelExtractor {
    infobox_row_sel: Selector,
    cell_sel: Selector,
    label_sel: Selector,
    row_sel: Selector,
    description_sel: Selector,
    enemies_anchor: String,
    statistics: StatisticsExtractor,
}

impl LevelExtractor {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        Ok(Self {
            infobox_row_sel: parse_selector(&config.infobox_row_selector)?,
            cell_sel: parse_selector("td")?,
            label_sel: parse_selector("b")?,
            row_sel: parse_selector("tr")?,
            description_sel: parse_selector(&config.description_selector)?,
            enemies_anchor: config.enemies_anchor.clone(),
            statistics: StatisticsExtractor::new(config)?,
        })
    }

    /// Build the record for one page. Missing or unparseable fields degrade
    /// to empty values; this never fails.
    pub fn extract(&self, url: &str, html: &str) -> ItemRecord {
        let document = Html::parse_document(html);

        ItemRecord {
            url: url.to_string(),
            infobox: extract_infobox(
                &document,
                &self.infobox_row_sel,
                &self.cell_sel,
                &self.label_sel,
            ),
            description: extract_description(&document, &self.description_sel).present(),
            enemies: extract_enemies(
                &document,
                &self.enemies_anchor,
                &self.row_sel,
                &self.cell_sel,
            )
            .or_empty("enemies", url),
            statistics: self.statistics.extract(&document).or_empty("statistics", url),
        }
    }
}

/// Detail links found on the listing page.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Links to crawl, in listing order
    pub links: Vec<DetailLink>,
    /// Distinct links before exclusion
    pub discovered: usize,
    /// Links dropped by the exclusion markers
    pub excluded: usize,
}

/// Service for crawling level pages.
pub struct LevelCrawler {
    config: Arc<Config>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: LevelExtractor,
    index_sel: Selector,
}

impl LevelCrawler {
    /// Create a new level crawler with the given configuration and fetcher.
    pub fn new(config: Arc<Config>, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        let extractor = LevelExtractor::new(&config.extract)?;
        let index_sel = parse_selector(&config.source.index_selector)?;

        Ok(Self {
            config,
            fetcher,
            extractor,
            index_sel,
        })
    }

    /// Fetch the listing page and collect the detail links to crawl.
    pub async fn discover(&self) -> Result<Discovery> {
        let listing_url = &self.config.source.listing_url;
        let html = self.fetcher.fetch(listing_url).await?;
        self.parse_listing(&html)
    }

    /// Collect detail links from listing HTML.
    ///
    /// Links are resolved against the base URL, de-duplicated, and checked
    /// against the exclusion markers.
    pub fn parse_listing(&self, html: &str) -> Result<Discovery> {
        let base = Url::parse(&self.config.source.base_url)?;
        let document = Html::parse_document(html);

        let mut seen = HashSet::new();
        let mut discovery = Discovery::default();

        for anchor in document.select(&self.index_sel) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let url = resolve_url(&base, href);
            if !seen.insert(url.clone()) {
                continue;
            }
            discovery.discovered += 1;

            if self.config.source.is_excluded(&url) {
                log::debug!("Skipping excluded page {}", url);
                discovery.excluded += 1;
                continue;
            }

            discovery.links.push(DetailLink {
                url,
                title: element_text(anchor),
            });
        }

        Ok(discovery)
    }

    /// Fetch one detail page and extract its record.
    pub async fn crawl_detail(&self, link: &DetailLink) -> Result<ItemRecord> {
        log::info!("Crawling data for {}", link.url);
        let html = self.fetcher.fetch(&link.url).await?;
        Ok(self.extractor.extract(&link.url, &html))
    }

    /// Lazily crawl detail pages with bounded concurrency.
    ///
    /// Results come out in the order of `links`, whatever order the
    /// requests complete in.
    pub fn records(
        &self,
        links: Vec<DetailLink>,
    ) -> impl Stream<Item = (DetailLink, Result<ItemRecord>)> + '_ {
        let concurrency = self.config.crawler.max_concurrent.max(1);

        stream::iter(links)
            .map(move |link| async move {
                let result = self.crawl_detail(&link).await;
                (link, result)
            })
            .buffered(concurrency)
    }

    /// Discover and crawl every level page.
    ///
    /// Only a listing failure is fatal. A detail page that cannot be fetched
    /// is recorded as a failure and the crawl moves on.
    pub async fn crawl_all(&self) -> Result<CrawlOutcome> {
        let discovery = self.discover().await?;
        let delay = Duration::from_millis(self.config.crawler.request_delay_ms);

        let mut outcome = CrawlOutcome {
            discovered: discovery.discovered,
            excluded: discovery.excluded,
            ..CrawlOutcome::default()
        };

        let total = discovery.links.len();
        let mut records = Box::pin(self.records(discovery.links));
        let mut finished = 0;
        while let Some((link, result)) = records.next().await {
            finished += 1;
            match result {
                Ok(record) => outcome.records.push(record),
                Err(error) => {
                    if error.is_fetch() {
                        log::warn!("Failed to fetch {} ({}): {}", link.title, link.url, error);
                    } else {
                        log::warn!("Failed to crawl {} ({}): {}", link.title, link.url, error);
                    }
                    outcome.failures.push(CrawlFailure {
                        url: link.url,
                        title: link.title,
                        error: error.to_string(),
                    });
                }
            }

            // No pause after the last page.
            if finished < total && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        Ok(outcome)
    }
}

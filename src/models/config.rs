//! Application configuration structures.

use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Where the level pages come from
    #[serde(default)]
    pub source: SourceConfig,

    /// Structural anchors and selectors used by the field extractors
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Output file names
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.as_ref().display());
                config
            }
            Err(e) => {
                log::warn!(
                    "Config load failed from {:?}: {}. Using defaults.",
                    path.as_ref(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }

        url::Url::parse(&self.source.base_url)?;
        url::Url::parse(&self.source.listing_url)?;

        for selector in [
            &self.source.index_selector,
            &self.extract.infobox_row_selector,
            &self.extract.description_selector,
        ] {
            Selector::parse(selector)
                .map_err(|e| AppError::selector(selector, format!("{e:?}")))?;
        }

        if self.extract.enemies_anchor.trim().is_empty() {
            return Err(AppError::validation("extract.enemies_anchor is empty"));
        }
        if self.extract.statistics_anchor.trim().is_empty() {
            return Err(AppError::validation("extract.statistics_anchor is empty"));
        }
        if self.extract.powerups.iter().any(|p| p.trim().is_empty()) {
            return Err(AppError::validation(
                "extract.powerups contains an empty name",
            ));
        }
        if self.output.records_file.trim().is_empty() {
            return Err(AppError::validation("output.records_file is empty"));
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between detail pages in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum concurrent detail-page requests (1 = strictly sequential)
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Listing page and detail-link discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL that relative detail links are resolved against
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Category listing page
    #[serde(default = "defaults::listing_url")]
    pub listing_url: String,

    /// Selector for detail anchors on the listing page
    #[serde(default = "defaults::index_selector")]
    pub index_selector: String,

    /// URL substrings marking irrelevant variants
    #[serde(default = "defaults::exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            listing_url: defaults::listing_url(),
            index_selector: defaults::index_selector(),
            exclude_patterns: defaults::exclude_patterns(),
        }
    }
}

impl SourceConfig {
    /// Whether a detail URL matches one of the exclusion markers.
    pub fn is_excluded(&self, url: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| url.contains(pattern.as_str()))
    }
}

/// Anchors and selectors for the field extractors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Rows of the infobox that carry an attribute
    #[serde(default = "defaults::infobox_row_selector")]
    pub infobox_row_selector: String,

    /// The meta-description tag
    #[serde(default = "defaults::description_selector")]
    pub description_selector: String,

    /// Element id of the enemies section anchor
    #[serde(default = "defaults::enemies_anchor")]
    pub enemies_anchor: String,

    /// Element id of the level statistics section anchor
    #[serde(default = "defaults::statistics_anchor")]
    pub statistics_anchor: String,

    /// Power-up names searched for in the statistics bullet list
    #[serde(default = "defaults::powerups")]
    pub powerups: Vec<String>,

    /// Name emitted for the 1-up count parsed from the second bullet
    #[serde(default = "defaults::one_up_name")]
    pub one_up_name: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            infobox_row_selector: defaults::infobox_row_selector(),
            description_selector: defaults::description_selector(),
            enemies_anchor: defaults::enemies_anchor(),
            statistics_anchor: defaults::statistics_anchor(),
            powerups: defaults::powerups(),
            one_up_name: defaults::one_up_name(),
        }
    }
}

/// Output file names, relative to the output directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::records_file")]
    pub records_file: String,

    #[serde(default = "defaults::failures_file")]
    pub failures_file: String,

    #[serde(default = "defaults::stats_file")]
    pub stats_file: String,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            records_file: defaults::records_file(),
            failures_file: defaults::failures_file(),
            stats_file: defaults::stats_file(),
            pretty: false,
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; level-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        0
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Source defaults
    pub fn base_url() -> String {
        "https://www.mariowiki.com".into()
    }
    pub fn listing_url() -> String {
        "https://www.mariowiki.com/Category:Super_Mario_Bros._Levels".into()
    }
    pub fn index_selector() -> String {
        "#mw-pages a".into()
    }
    pub fn exclude_patterns() -> Vec<String> {
        vec!["Minus".into()]
    }

    // Extractor defaults
    pub fn infobox_row_selector() -> String {
        r#"table.infobox tr[style*="vertical-align:top"]"#.into()
    }
    pub fn description_selector() -> String {
        r#"meta[name="description"]"#.into()
    }
    pub fn enemies_anchor() -> String {
        "Enemies".into()
    }
    pub fn statistics_anchor() -> String {
        "Level_statistics".into()
    }
    pub fn powerups() -> Vec<String> {
        vec!["Mushroom".into(), "Fire Flower".into(), "Starman".into()]
    }
    pub fn one_up_name() -> String {
        "1 up Mushroom".into()
    }

    // Output defaults
    pub fn records_file() -> String {
        "smb.json".into()
    }
    pub fn failures_file() -> String {
        "failures.json".into()
    }
    pub fn stats_file() -> String {
        "stats.json".into()
    }
}

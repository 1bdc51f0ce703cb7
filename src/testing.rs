//! Shared fixtures for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::utils::http::PageFetcher;

/// In-memory fetcher keyed by URL. Unknown URLs fail like a 404.
#[derive(Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MemoryFetcher {
    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    /// Handle to the list of requested URLs, in request order.
    pub fn requests(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl PageFetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::fetch(url, "HTTP status 404 Not Found"))
    }
}

/// Default config pointed at a fake wiki, crawling one page at a time.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.source.base_url = "https://wiki.test".to_string();
    config.source.listing_url = "https://wiki.test/Category:Levels".to_string();
    config.crawler.max_concurrent = 1;
    config.crawler.request_delay_ms = 0;
    config
}

/// Category page linking to the given hrefs.
pub fn listing_page(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<li><a href="{href}">{href} title</a></li>"#))
        .collect();
    format!(
        r#"<html><body>
            <div id="mw-subcategories"><a href="/Category:Other">Other</a></div>
            <div id="mw-pages"><ul>{links}</ul></div>
        </body></html>"#
    )
}

/// A level page with every field the extractors look for.
pub fn detail_page(level: &str) -> String {
    format!(
        r#"<html>
        <head><meta name="description" content="World {level} is a level."></head>
        <body>
          <table class="infobox">
            <tr><th colspan="2">World {level}</th></tr>
            <tr style="vertical-align:top;"><td><b>Game</b></td><td><i><a href="/Super_Mario_Bros.">Super Mario Bros.</a></i></td></tr>
            <tr style="vertical-align:top;"><td><b>World</b></td><td><a href="/World_1">1</a></td></tr>
            <tr style="vertical-align:top;"><td><b>World-Level</b></td><td>{level}</td></tr>
            <tr style="vertical-align:top;"><td><b>Time limit</b></td><td>400 seconds</td></tr>
            <tr style="vertical-align:top;"><td><b>Boss</b></td><td></td></tr>
          </table>
          <h2><span class="mw-headline" id="Enemies">Enemies</span></h2>
          <table class="wikitable">
            <tr><th>Enemy</th><th>Amount</th></tr>
            <tr><td><a class="image" href="/File:Goomba.png"><img src="g.png"></a> <a href="/Goomba">Goomba</a></td><td>16</td></tr>
            <tr><td><a href="/Koopa_Troopa">Koopa Troopa</a></td><td>1</td></tr>
          </table>
          <h2><span class="mw-headline" id="Level_statistics">Level statistics</span></h2>
          <table class="wikitable">
            <tr><th>Item</th><th>Amount</th></tr>
            <tr><td><a href="/Coin">Coins</a></td><td>39 (total)</td></tr>
            <tr><td colspan="2"><ul>
              <li>Three Mushrooms, two Fire Flowers</li>
              <li>1-up Mushrooms: 4</li>
            </ul></td></tr>
          </table>
          <h2><span class="mw-headline" id="Trivia">Trivia</span></h2>
        </body></html>"#
    )
}

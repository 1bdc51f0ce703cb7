//! Pipeline entry points for crawler operations.
//!
//! - `run_crawler`: Crawl the level pages and store the result set
//! - `run_inspect`: Summarize a stored result set

pub mod crawl;
pub mod inspect;

pub use crawl::run_crawler;
pub use inspect::run_inspect;

//! Level Crawler CLI
//!
//! Local execution entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use level_crawler::{
    error::Result,
    models::Config,
    pipeline,
    storage::LocalStorage,
    utils::http::HttpFetcher,
};

/// Level Crawler - Super Mario Bros. level extractor
#[derive(Parser, Debug)]
#[command(
    name = "level-crawler",
    version,
    about = "Crawls level pages and extracts structured level records"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Directory the result files are written to and read from
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl every level page and write the result set
    Crawl {
        /// Override the category listing URL
        #[arg(long)]
        listing_url: Option<String>,

        /// Override the number of concurrent detail-page requests
        #[arg(long)]
        max_concurrent: Option<usize>,
    },

    /// Validate the configuration file
    Validate,

    /// Summarize a previously written result set
    Inspect,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Crawl {
            listing_url,
            max_concurrent,
        } => {
            if let Some(url) = listing_url {
                config.source.listing_url = url;
            }
            if let Some(n) = max_concurrent {
                config.crawler.max_concurrent = n;
            }
            config.validate()?;

            let storage = LocalStorage::new(&cli.output_dir, config.output.clone());
            let fetcher = HttpFetcher::from_config(&config.crawler)?;
            pipeline::run_crawler(Arc::new(config), Arc::new(fetcher), &storage).await?;

            log::info!("Crawl complete!");
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK (selectors, anchors, and URLs)");
        }

        Command::Inspect => {
            let storage = LocalStorage::new(&cli.output_dir, config.output.clone());
            pipeline::run_inspect(&storage).await?;
        }
    }

    log::info!("Done!");

    Ok(())
}

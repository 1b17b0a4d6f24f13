use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use wellscrape::config::Config;
use wellscrape::input;
use wellscrape::scraping::{FieldExtractor, RunMode, ScrapeCoordinator, WellFetcher};
use wellscrape::store::WellStore;

pub async fn run(
    config: Config,
    csv: PathBuf,
    parallel: bool,
    workers: Option<usize>,
    export: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let list = input::read_identifiers(&csv)?;
    info!(
        identifiers = list.identifiers.len(),
        skipped_rows = list.skipped,
        "read identifier CSV"
    );

    let store = Arc::new(
        WellStore::open(&config.storage.db_path).with_context(|| {
            format!(
                "failed to open database '{}'",
                config.storage.db_path.display()
            )
        })?,
    );

    let fetcher = WellFetcher::new(config.scraper.fetch_config())
        .context("failed to build fetcher")?;
    let coordinator = Arc::new(ScrapeCoordinator::new(
        fetcher,
        FieldExtractor::new(),
        store.clone(),
    ));

    let mode = if parallel {
        RunMode::Parallel {
            workers: workers.unwrap_or(config.scraper.workers),
        }
    } else {
        RunMode::Sequential {
            delay: Duration::from_millis(config.scraper.sequential_delay_ms),
        }
    };

    let mut summary = coordinator.run_with_retry(list.identifiers, mode).await;
    // Rows dropped while reading the CSV count as skipped too.
    summary.skipped += list.skipped;

    println!("Total identifiers in CSV: {}", summary.total());
    println!("Skipped (missing API): {}", summary.skipped);
    println!("Successfully inserted: {}", summary.inserted);
    println!("Errors: {}", summary.errored);

    if let Some(path) = export {
        let rows = store.export(&path, &format)?;
        println!("Exported {} records to {}", rows, path.display());
    }

    Ok(())
}

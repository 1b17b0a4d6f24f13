use std::path::PathBuf;

use anyhow::{Context, Result};

use wellscrape::config::Config;
use wellscrape::store::WellStore;

pub fn run(config: Config, output: PathBuf, format: String) -> Result<()> {
    let store = WellStore::open(&config.storage.db_path).with_context(|| {
        format!(
            "failed to open database '{}'",
            config.storage.db_path.display()
        )
    })?;

    let rows = store.export(&output, &format)?;
    println!("Exported {} records to {}", rows, output.display());

    Ok(())
}

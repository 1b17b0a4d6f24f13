use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast;
use tracing::info;

use wellscrape::api::HttpServer;
use wellscrape::config::Config;
use wellscrape::store::WellStore;

pub async fn run(config: Config, listen: Option<String>) -> Result<()> {
    let mut http = config.http.clone();
    if let Some(listen) = listen {
        http.listen_addr = listen;
    }

    let store = Arc::new(
        WellStore::open(&config.storage.db_path).with_context(|| {
            format!(
                "failed to open database '{}'",
                config.storage.db_path.display()
            )
        })?,
    );
    info!(records = store.count()?, "store opened");

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received ctrl-c, shutting down");
            let _ = shutdown_tx.send(());
        }
    });

    HttpServer::new(http, store).run(shutdown_rx).await
}

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use mythos_lib::progress::ProgressStore;
use mythos_lib::server::start_server;
use mythos_lib::sync::{run_sync_worker, EventBus, SyncProcessor};

use crate::app::App;

pub fn run(app: App, host: &str, port: u16, no_sync: bool, sync_interval: u64) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    runtime.block_on(async move {
        let sync_worker = if no_sync {
            None
        } else {
            let storage = app.sync_storage();
            storage.init().context("Failed to create sync directory")?;
            let processor = Arc::new(SyncProcessor::new(storage, Arc::new(EventBus::new())));
            let store = Arc::new(Mutex::new(ProgressStore::new(Arc::clone(&app.backend))));
            let (stop_tx, stop_rx) = mpsc::channel(1);
            let handle = tokio::spawn(run_sync_worker(processor, store, sync_interval, stop_rx));
            Some((stop_tx, handle))
        };

        let mut server = start_server(app.catalog, &format!("{}:{}", host, port))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

        println!("Serving on {} (Ctrl-C to stop)", server.base_url());
        println!("GraphQL endpoint: {}/api/graphql", server.base_url());

        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for shutdown signal")?;

        println!("\nShutting down");
        server.stop();
        if let Some((stop_tx, handle)) = sync_worker {
            let _ = stop_tx.send(()).await;
            let _ = handle.await;
        }

        Ok(())
    })
}

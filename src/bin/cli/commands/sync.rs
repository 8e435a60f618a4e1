use std::sync::Arc;

use anyhow::{Context, Result};

use mythos_lib::progress::UserProgress;
use mythos_lib::sync::{EventBus, ProgressDelta, SyncProcessor};

use crate::app::App;
use crate::OutputFormat;

fn build_processor(app: &App) -> Result<SyncProcessor> {
    let storage = app.sync_storage();
    storage
        .init()
        .context("Failed to create sync directory")?;
    Ok(SyncProcessor::new(storage, Arc::new(EventBus::new())))
}

pub fn run_status(app: &App, format: &OutputFormat) -> Result<()> {
    let processor = build_processor(app)?;
    let status = processor.status()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Plain => {
            println!("Pending updates:  {}", status.pending);
            println!("Stuck updates:    {}", status.stuck);
            println!("Snapshots:        {}", status.snapshots);
            if let Some(last) = status.last_snapshot {
                println!("Last snapshot:    {}", last.format("%Y-%m-%d %H:%M UTC"));
            }
        }
    }

    Ok(())
}

pub fn run_drain(app: &App) -> Result<()> {
    let processor = build_processor(app)?;
    let mut store = app.progress_store();

    let outcome = processor.process(&mut store)?;
    if outcome.processed == 0 && outcome.failed == 0 {
        println!("Queue is empty, nothing to sync.");
        return Ok(());
    }

    println!("{} delivered, {} failed", outcome.processed, outcome.failed);
    let pending = processor.storage().pending_count()?;
    if pending > 0 {
        println!("{} updates still pending", pending);
    }

    Ok(())
}

pub fn run_push(app: &App) -> Result<()> {
    let store = app.progress_store();
    let progress = store.progress();

    if *progress == UserProgress::default() {
        println!("Nothing to push. Explore the catalog first.");
        return Ok(());
    }

    let processor = build_processor(app)?;
    let id = processor
        .storage()
        .enqueue(ProgressDelta::from_progress(progress))?;
    println!("Queued progress update {}", id);

    Ok(())
}

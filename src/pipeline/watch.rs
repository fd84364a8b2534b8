// src/pipeline/watch.rs

//! One watch run: scrape, diff against the snapshot, notify, persist.

use crate::error::Result;
use crate::models::{Record, WatchConfig};
use crate::notify::{ItemStyle, Notifier, NotifyItem};
use crate::services::Source;
use crate::storage::{SnapshotStorage, merge};

use super::diff::{deduplicate, find_new};

/// Counts describing a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchSummary {
    /// Records in the snapshot before the run
    pub previous: usize,
    /// Unique records scraped this run
    pub current: usize,
    /// Records not seen before
    pub new: usize,
    /// Records written to the snapshot
    pub saved: usize,
    /// Whether the notifier reported a successful delivery
    pub notified: bool,
}

/// Run a watch end to end.
///
/// Sources are queried one after another; a failing source contributes
/// nothing. Only a failure to save the new snapshot is returned as an error.
pub async fn run_watch(
    settings: &WatchConfig,
    storage: &dyn SnapshotStorage,
    sources: &[Box<dyn Source>],
    notifier: &dyn Notifier,
    style: ItemStyle,
) -> Result<WatchSummary> {
    log::info!("Snapshot: {}", storage.location());

    let previous = storage.load().await;
    log::info!("Previous items: {}", previous.len());

    let current = deduplicate(collect(sources).await);
    log::info!("Total unique items: {}", current.len());

    let new_records = find_new(&current, &previous);
    let notified = report(settings, &new_records, notifier, style).await;

    let snapshot = merge(&current, &previous, settings.max_records);
    storage.save(&snapshot).await?;
    log::info!("Saved {} items", snapshot.len());

    Ok(WatchSummary {
        previous: previous.len(),
        current: current.len(),
        new: new_records.len(),
        saved: snapshot.len(),
        notified,
    })
}

/// Concatenate every source's records, in source order.
async fn collect(sources: &[Box<dyn Source>]) -> Vec<Record> {
    let mut all = Vec::new();
    for source in sources {
        all.extend(source.fetch_or_empty().await);
    }
    all
}

async fn report(
    settings: &WatchConfig,
    new_records: &[Record],
    notifier: &dyn Notifier,
    style: ItemStyle,
) -> bool {
    if new_records.is_empty() {
        log::info!("No new items");
        return false;
    }

    log::info!("Found {} new items", new_records.len());
    for record in new_records {
        log::info!("  - {}", style.summary_line(record));
    }

    let items: Vec<NotifyItem> = new_records.iter().map(|r| style.present(r)).collect();
    notifier
        .notify(&settings.notify_title, &items, settings.color)
        .await
}

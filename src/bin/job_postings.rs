//! Job postings watcher
//!
//! Scrapes Toss careers and wanted.co.kr keyword searches, reports postings
//! not seen in the previous run, and stores the merged snapshot.

use scout::{
    error::Result,
    models::Config,
    notify::{DiscordNotifier, ItemStyle},
    pipeline,
    services,
    storage::LocalStorage,
    utils::http,
};

/// Initialize logging with `info` as the default filter.
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    log::info!("=== Job Postings Scraper ===");

    let config = Config::from_env();
    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let client = http::create_async_client(&config.crawler)?;
    let notifier = DiscordNotifier::from_config(&config.notifier)?;
    if !notifier.is_enabled() {
        log::warn!("No webhook configured; new postings will only be logged");
    }

    let settings = config.jobs.watch();
    let storage = LocalStorage::new(config.snapshot_path(&settings));
    let sources = services::job_sources(&client, &config.jobs);

    let summary = pipeline::run_watch(
        &settings,
        &storage,
        &sources,
        &notifier,
        ItemStyle::JobPosting,
    )
    .await?;

    log::info!(
        "Done: {} new of {} scraped, {} kept",
        summary.new,
        summary.current,
        summary.saved
    );

    Ok(())
}

//! Toss tech blog watcher
//!
//! Reports articles on toss.tech that were not on the page during the
//! previous run.

use scout::{
    error::Result,
    models::Config,
    notify::{DiscordNotifier, ItemStyle},
    pipeline,
    services,
    storage::LocalStorage,
    utils::http,
};

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    log::info!("=== Toss Tech Blog Scraper ===");

    let config = Config::from_env();
    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let client = http::create_async_client(&config.crawler)?;
    let notifier = DiscordNotifier::from_config(&config.notifier)?;

    let settings = config.toss_tech.watch();
    let storage = LocalStorage::new(config.snapshot_path(&settings));
    let sources = services::article_sources(&client);

    let summary =
        pipeline::run_watch(&settings, &storage, &sources, &notifier, ItemStyle::Article).await?;

    log::info!(
        "Done: {} new of {} scraped, {} kept",
        summary.new,
        summary.current,
        summary.saved
    );

    Ok(())
}

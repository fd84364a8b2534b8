// src/models/mod.rs

//! Domain models for the watcher.

mod config;
mod record;

// Re-export all public types
pub use config::{
    CONFIG_PATH_ENV, Config, CrawlerConfig, DEFAULT_CONFIG_PATH, JobsConfig, NotifierConfig,
    StorageConfig, TossTechConfig, WEBHOOK_ENV, WatchConfig,
};
pub use record::Record;

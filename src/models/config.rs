//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable holding the chat webhook URL.
pub const WEBHOOK_ENV: &str = "DISCORD_WEBHOOK_URL";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "SCOUT_CONFIG";

/// Config file location used when `SCOUT_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "data/config.toml";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP behavior for source adapters
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Outbound notification settings
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Snapshot file locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Job postings watch
    #[serde(default)]
    pub jobs: JobsConfig,

    /// Toss tech blog watch
    #[serde(default)]
    pub toss_tech: TossTechConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Load from `SCOUT_CONFIG` (or the default path) and apply the webhook
    /// URL from `DISCORD_WEBHOOK_URL`.
    pub fn from_env() -> Self {
        let path = std::env::var(CONFIG_PATH_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_or_default(&path).with_webhook_override(std::env::var(WEBHOOK_ENV).ok())
    }

    /// Replace the webhook URL when an override is given.
    ///
    /// Blank overrides are ignored so an exported-but-empty variable does not
    /// clobber the file value.
    pub fn with_webhook_override(mut self, webhook_url: Option<String>) -> Self {
        if let Some(url) = webhook_url.filter(|u| !u.trim().is_empty()) {
            self.notifier.webhook_url = Some(url);
        }
        self
    }

    /// Full path of a watch's snapshot file.
    pub fn snapshot_path(&self, watch: &WatchConfig) -> PathBuf {
        self.storage.data_dir.join(&watch.data_file)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.notifier.timeout_secs == 0 {
            return Err(AppError::validation("notifier.timeout_secs must be > 0"));
        }
        self.jobs.watch().validate("jobs")?;
        self.toss_tech.watch().validate("toss_tech")?;
        Ok(())
    }
}

/// HTTP client settings shared by all source adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Chat webhook settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Webhook endpoint; notifications are disabled when absent
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "defaults::notify_timeout")]
    pub timeout_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: defaults::notify_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the snapshot files
    #[serde(default = "defaults::data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir(),
        }
    }
}

/// Resolved settings for one watch: where its snapshot lives and how it
/// reports.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchConfig {
    /// Snapshot file name, relative to `storage.data_dir`
    pub data_file: String,

    /// Retention limit for the snapshot
    pub max_records: usize,

    /// Heading used in the notification message
    pub notify_title: String,

    /// Embed accent color (0xRRGGBB)
    pub color: u32,
}

impl WatchConfig {
    fn validate(&self, section: &str) -> Result<()> {
        if self.data_file.trim().is_empty() {
            return Err(AppError::validation(format!(
                "{section}.data_file is empty"
            )));
        }
        if self.max_records == 0 {
            return Err(AppError::validation(format!(
                "{section}.max_records must be > 0"
            )));
        }
        Ok(())
    }
}

/// `[jobs]` section: job postings watch plus search keywords.
///
/// Every key is optional; missing keys fall back to the section defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    pub data_file: String,
    pub max_records: usize,
    pub notify_title: String,
    pub color: u32,

    /// Keywords searched on wanted.co.kr, in order
    pub keywords: Vec<String>,
}

impl JobsConfig {
    pub fn watch(&self) -> WatchConfig {
        WatchConfig {
            data_file: self.data_file.clone(),
            max_records: self.max_records,
            notify_title: self.notify_title.clone(),
            color: self.color,
        }
    }
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            data_file: "jobs.json".into(),
            max_records: 200,
            notify_title: "새 채용 공고".into(),
            color: 0x36B37E,
            keywords: vec!["백엔드".into(), "프론트엔드".into(), "신입".into()],
        }
    }
}

/// `[toss_tech]` section: Toss tech blog watch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TossTechConfig {
    pub data_file: String,
    pub max_records: usize,
    pub notify_title: String,
    pub color: u32,
}

impl TossTechConfig {
    pub fn watch(&self) -> WatchConfig {
        WatchConfig {
            data_file: self.data_file.clone(),
            max_records: self.max_records,
            notify_title: self.notify_title.clone(),
            color: self.color,
        }
    }
}

impl Default for TossTechConfig {
    fn default() -> Self {
        Self {
            data_file: "toss_articles.json".into(),
            max_records: 100,
            notify_title: "토스 테크 블로그 새 글".into(),
            color: 0x0064FF,
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Notifier defaults
    pub fn notify_timeout() -> u64 {
        10
    }

    // Storage defaults
    pub fn data_dir() -> PathBuf {
        PathBuf::from("data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.jobs.max_records, 200);
        assert_eq!(config.toss_tech.max_records, 100);
        assert_eq!(config.jobs.keywords.len(), 3);
        assert!(config.notifier.webhook_url.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_section_defaults() {
        let raw = r#"
            [crawler]
            timeout_secs = 15

            [jobs]
            keywords = ["신입"]
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.crawler.timeout_secs, 15);
        assert_eq!(config.crawler.user_agent, defaults::user_agent());
        assert_eq!(config.jobs.keywords, vec!["신입".to_string()]);
        assert_eq!(config.jobs.watch(), JobsConfig::default().watch());
        assert_eq!(config.toss_tech.data_file, "toss_articles.json");
    }

    #[test]
    fn test_single_key_watch_section_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [notifier]
            webhook_url = "https://discord.test/hook"

            [toss_tech]
            max_records = 300
            "#,
        )
        .unwrap();

        let config = Config::load_or_default(&path);
        assert_eq!(
            config.notifier.webhook_url.as_deref(),
            Some("https://discord.test/hook")
        );

        let watch = config.toss_tech.watch();
        assert_eq!(watch.max_records, 300);
        assert_eq!(watch.data_file, "toss_articles.json");
        assert_eq!(watch.notify_title, "토스 테크 블로그 새 글");
        assert_eq!(watch.color, 0x0064FF);
        assert_eq!(config.jobs.watch(), JobsConfig::default().watch());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(tmp.path().join("nope.toml"));
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_webhook_override() {
        let config = Config::default()
            .with_webhook_override(Some("https://discord.test/hook".into()));
        assert_eq!(
            config.notifier.webhook_url.as_deref(),
            Some("https://discord.test/hook")
        );

        let config = config.with_webhook_override(Some("  ".into()));
        assert_eq!(
            config.notifier.webhook_url.as_deref(),
            Some("https://discord.test/hook")
        );

        let config = Config::default().with_webhook_override(None);
        assert!(config.notifier.webhook_url.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let mut config = Config::default();
        config.toss_tech.max_records = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_snapshot_path() {
        let config = Config::default();
        assert_eq!(
            config.snapshot_path(&config.jobs.watch()),
            PathBuf::from("data/jobs.json")
        );
    }
}

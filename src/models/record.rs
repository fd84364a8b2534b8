//! Scraped record data structure.

use std::collections::BTreeMap;

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Format used for `scraped_at` timestamps (local time, microsecond precision).
const SCRAPED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A single item scraped from a site: a job posting or a blog article.
///
/// `link` is the identity key. Adapter-specific fields such as `company`,
/// `keyword`, `description` or `date` live in `extra` and are written back
/// to the snapshot file as ordinary top-level keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Display title
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    /// Absolute URL, unique within a snapshot
    pub link: String,

    /// Origin site name (e.g. "toss.tech")
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: String,

    /// ISO-8601 timestamp of the scrape that produced this record
    #[serde(default, deserialize_with = "lenient_string")]
    pub scraped_at: String,

    /// Optional adapter-specific fields, passed through opaquely
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Record {
    /// Create a record with the required fields and an empty extra bag.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        source: impl Into<String>,
        scraped_at: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            source: source.into(),
            scraped_at: scraped_at.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Attach an optional string field.
    pub fn with_field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.extra.insert(key.to_string(), Value::String(value.into()));
        self
    }

    /// Read an optional field as a string, if present and a string.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    pub fn company(&self) -> Option<&str> {
        self.field("company")
    }

    pub fn keyword(&self) -> Option<&str> {
        self.field("keyword")
    }

    pub fn description(&self) -> Option<&str> {
        self.field("description")
    }

    pub fn date(&self) -> Option<&str> {
        self.field("date")
    }

    /// Current local time in the `scraped_at` format.
    pub fn timestamp_now() -> String {
        Local::now().format(SCRAPED_AT_FORMAT).to_string()
    }
}

/// Accept any JSON value for a text field: strings as-is, `null` as empty,
/// anything else in its JSON form.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

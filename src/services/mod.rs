//! Source adapters: one per watched site.
//!
//! - Toss tech blog articles (`TossTechBlog`)
//! - Toss career postings (`TossCareers`)
//! - wanted.co.kr keyword search (`WantedSearch`)
//!
//! Each adapter fetches a page, extracts one [`Extraction`] per candidate
//! element and keeps the successful ones. A failed fetch is absorbed by
//! [`Source::fetch_or_empty`], so one broken site never stops a run.

mod toss_careers;
mod toss_tech;
mod wanted;

use async_trait::async_trait;
use reqwest::Client;
use scraper::Selector;
use thiserror::Error;

use crate::error::{AppError, Result};
use crate::models::{JobsConfig, Record};

pub use toss_careers::TossCareers;
pub use toss_tech::TossTechBlog;
pub use wanted::WantedSearch;

/// Why a candidate element did not become a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("missing title")]
    MissingTitle,
    #[error("missing link")]
    MissingLink,
}

/// Outcome of extracting a single item from a page.
pub type Extraction = std::result::Result<Record, SkipReason>;

/// A site that produces the current list of items.
#[async_trait]
pub trait Source: Send + Sync {
    /// Site name used in logs.
    fn name(&self) -> &str;

    /// Fetch and extract the current items.
    async fn fetch(&self) -> Result<Vec<Record>>;

    /// Like [`Source::fetch`], but any failure degrades to an empty list.
    async fn fetch_or_empty(&self) -> Vec<Record> {
        match self.fetch().await {
            Ok(records) => records,
            Err(e) => {
                log::warn!("{}", e.in_source(self.name()));
                Vec::new()
            }
        }
    }
}

/// Keep successful extractions, logging each skipped one.
pub fn collect_extractions(source: &str, extractions: Vec<Extraction>) -> Vec<Record> {
    let mut records = Vec::with_capacity(extractions.len());
    let mut skipped = 0usize;

    for extraction in extractions {
        match extraction {
            Ok(record) => records.push(record),
            Err(reason) => {
                skipped += 1;
                log::debug!("Skipping item from {}: {}", source, reason);
            }
        }
    }

    if skipped > 0 {
        log::info!("Scraped {} items from {} ({} skipped)", records.len(), source, skipped);
    } else {
        log::info!("Scraped {} items from {}", records.len(), source);
    }
    records
}

/// Build a record from extracted title and link, or say why it can't be.
fn require_fields(
    title: String,
    link: String,
    source: &str,
    scraped_at: &str,
) -> Extraction {
    if title.is_empty() {
        return Err(SkipReason::MissingTitle);
    }
    if link.is_empty() {
        return Err(SkipReason::MissingLink);
    }
    Ok(Record::new(title, link, source, scraped_at))
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Sources for the job postings watch: Toss careers, then one wanted.co.kr
/// search per configured keyword.
pub fn job_sources(client: &Client, jobs: &JobsConfig) -> Vec<Box<dyn Source>> {
    let mut sources: Vec<Box<dyn Source>> = vec![Box::new(TossCareers::new(client.clone()))];
    sources.extend(
        jobs.keywords
            .iter()
            .map(|kw| Box::new(WantedSearch::new(client.clone(), kw)) as Box<dyn Source>),
    );
    sources
}

/// Sources for the Toss tech blog watch.
pub fn article_sources(client: &Client) -> Vec<Box<dyn Source>> {
    vec![Box::new(TossTechBlog::new(client.clone()))]
}

// src/services/toss_careers.rs

//! Toss career postings (toss.im/career).

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use url::Url;

use super::{Extraction, Source, collect_extractions, parse_selector, require_fields};
use crate::error::Result;
use crate::models::Record;
use crate::utils::http::fetch_text;
use crate::utils::{element_text, resolve_url};

const SOURCE: &str = "toss.im";
const CAREERS_URL: &str = "https://toss.im/career/jobs";
const COMPANY: &str = "토스";

const JOB_SELECTOR: &str = r#"a[href*="/career/job-detail"]"#;

pub struct TossCareers {
    client: Client,
    url: String,
}

impl TossCareers {
    pub fn new(client: Client) -> Self {
        Self::with_url(client, CAREERS_URL)
    }

    pub fn with_url(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Source for TossCareers {
    fn name(&self) -> &str {
        SOURCE
    }

    async fn fetch(&self) -> Result<Vec<Record>> {
        let html = fetch_text(&self.client, &self.url).await?;
        let extractions = parse_jobs(&html, &self.url, &Record::timestamp_now())?;
        Ok(collect_extractions(SOURCE, extractions))
    }
}

pub(crate) fn parse_jobs(html: &str, page_url: &str, scraped_at: &str) -> Result<Vec<Extraction>> {
    let document = Html::parse_document(html);
    let job_sel = parse_selector(JOB_SELECTOR)?;
    let base = Url::parse(page_url)?;

    let extractions = document
        .select(&job_sel)
        .map(|anchor| {
            let title = element_text(&anchor);
            let link = anchor
                .value()
                .attr("href")
                .map(|href| resolve_url(&base, href))
                .unwrap_or_default();

            require_fields(title, link, SOURCE, scraped_at)
                .map(|record| record.with_field("company", COMPANY))
        })
        .collect();

    Ok(extractions)
}

// src/services/wanted.rs

//! wanted.co.kr position search for a single keyword.

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use url::Url;

use super::{Extraction, Source, collect_extractions, parse_selector, require_fields};
use crate::error::Result;
use crate::models::Record;
use crate::utils::http::fetch_text;
use crate::utils::{element_text, resolve_url};

const SOURCE: &str = "wanted.co.kr";
const SEARCH_URL: &str = "https://www.wanted.co.kr/search";

const CARD_SELECTOR: &str = r#"[class*="JobCard"], [class*="job-card"]"#;
const TITLE_SELECTOR: &str = r#"[class*="title"], h3, h4"#;
const COMPANY_SELECTOR: &str = r#"[class*="company"], [class*="name"]"#;
const LINK_SELECTOR: &str = r#"a[href*="/wd/"]"#;

pub struct WantedSearch {
    client: Client,
    search_url: String,
    keyword: String,
    /// Log name, e.g. "wanted.co.kr (백엔드)"
    name: String,
}

impl WantedSearch {
    pub fn new(client: Client, keyword: impl Into<String>) -> Self {
        Self::with_url(client, SEARCH_URL, keyword)
    }

    pub fn with_url(
        client: Client,
        search_url: impl Into<String>,
        keyword: impl Into<String>,
    ) -> Self {
        let keyword = keyword.into();
        Self {
            client,
            search_url: search_url.into(),
            name: format!("{SOURCE} ({keyword})"),
            keyword,
        }
    }

    /// Search page URL with the keyword query-encoded.
    fn query_url(&self) -> Result<Url> {
        Ok(Url::parse_with_params(
            &self.search_url,
            &[("query", self.keyword.as_str()), ("tab", "position")],
        )?)
    }
}

#[async_trait]
impl Source for WantedSearch {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<Record>> {
        let url = self.query_url()?;
        let html = fetch_text(&self.client, url.as_str()).await?;
        let extractions = parse_search(&html, &url, &self.keyword, &Record::timestamp_now())?;
        Ok(collect_extractions(&self.name, extractions))
    }
}

pub(crate) fn parse_search(
    html: &str,
    page_url: &Url,
    keyword: &str,
    scraped_at: &str,
) -> Result<Vec<Extraction>> {
    let document = Html::parse_document(html);
    let card_sel = parse_selector(CARD_SELECTOR)?;
    let title_sel = parse_selector(TITLE_SELECTOR)?;
    let company_sel = parse_selector(COMPANY_SELECTOR)?;
    let link_sel = parse_selector(LINK_SELECTOR)?;

    let extractions = document
        .select(&card_sel)
        .map(|card| {
            let title = card
                .select(&title_sel)
                .next()
                .map(|el| element_text(&el))
                .unwrap_or_default();
            let company = card
                .select(&company_sel)
                .next()
                .map(|el| element_text(&el))
                .unwrap_or_default();
            let link = card
                .select(&link_sel)
                .next()
                .and_then(|el| el.value().attr("href"))
                .map(|href| resolve_url(page_url, href))
                .unwrap_or_default();

            require_fields(title, link, SOURCE, scraped_at).map(|record| {
                record
                    .with_field("company", company)
                    .with_field("keyword", keyword)
            })
        })
        .collect();

    Ok(extractions)
}

// src/services/toss_tech.rs

//! Toss tech blog (toss.tech) article list.

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use url::Url;

use super::{Extraction, Source, collect_extractions, parse_selector, require_fields};
use crate::error::Result;
use crate::models::Record;
use crate::pipeline::deduplicate;
use crate::utils::http::fetch_text;
use crate::utils::{element_text, resolve_url, truncate_chars};

const SOURCE: &str = "toss.tech";
const BLOG_URL: &str = "https://toss.tech/";

const ARTICLE_SELECTOR: &str = r#"a[href*="/article/"]"#;
const TITLE_SELECTOR: &str = r#"h3, h2, [class*="title"]"#;

/// Fallback title length when an article card has no heading.
const FALLBACK_TITLE_CHARS: usize = 100;

pub struct TossTechBlog {
    client: Client,
    url: String,
}

impl TossTechBlog {
    pub fn new(client: Client) -> Self {
        Self::with_url(client, BLOG_URL)
    }

    /// Point the adapter at a different page (mirrors, tests).
    pub fn with_url(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Source for TossTechBlog {
    fn name(&self) -> &str {
        SOURCE
    }

    async fn fetch(&self) -> Result<Vec<Record>> {
        let html = fetch_text(&self.client, &self.url).await?;
        let extractions = parse_articles(&html, &self.url, &Record::timestamp_now())?;
        Ok(deduplicate(collect_extractions(SOURCE, extractions)))
    }
}

/// Extract article cards from the blog front page.
pub(crate) fn parse_articles(html: &str, page_url: &str, scraped_at: &str) -> Result<Vec<Extraction>> {
    let document = Html::parse_document(html);
    let article_sel = parse_selector(ARTICLE_SELECTOR)?;
    let title_sel = parse_selector(TITLE_SELECTOR)?;
    let base = Url::parse(page_url)?;

    let extractions = document
        .select(&article_sel)
        .map(|anchor| {
            let title = match anchor.select(&title_sel).next() {
                Some(heading) => element_text(&heading),
                None => truncate_chars(&element_text(&anchor), FALLBACK_TITLE_CHARS),
            };
            let link = anchor
                .value()
                .attr("href")
                .filter(|href| !href.is_empty())
                .map(|href| resolve_url(&base, href))
                .unwrap_or_default();

            require_fields(title, link, SOURCE, scraped_at)
        })
        .collect();

    Ok(extractions)
}

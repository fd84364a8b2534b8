// src/notify/discord.rs

//! Discord webhook notifier.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{Notifier, NotifyItem};
use crate::error::{AppError, Result};
use crate::models::NotifierConfig;
use crate::utils::truncate_chars;

/// Discord accepts at most this many embeds per message.
pub const MAX_EMBEDS: usize = 10;

/// Embed descriptions are cut to this many characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    webhook_url: Option<String>,
    client: Client,
    timeout: Duration,
}

impl DiscordNotifier {
    /// Create a notifier. With no webhook every call is a logged no-op.
    pub fn new(webhook_url: Option<String>, timeout_secs: u64) -> Result<Self> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            webhook_url,
            client,
            timeout,
        })
    }

    pub fn from_config(config: &NotifierConfig) -> Result<Self> {
        Self::new(config.webhook_url.clone(), config.timeout_secs)
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    async fn post(&self, url: &str, payload: &WebhookPayload) -> Result<u16> {
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::notify(format!("webhook returned HTTP {status}")));
        }
        Ok(status.as_u16())
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify(&self, title: &str, items: &[NotifyItem], color: u32) -> bool {
        let Some(url) = self.webhook_url.as_deref() else {
            log::info!("Webhook URL not set, skipping notification");
            return false;
        };
        if items.is_empty() {
            log::info!("No items to notify");
            return false;
        }

        let payload = build_payload(title, items, color);
        match self.post(url, &payload).await {
            Ok(status) => {
                log::info!("Discord notification sent: {}", status);
                true
            }
            Err(e) => {
                log::error!("Failed to send Discord notification: {}", e);
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookPayload {
    pub content: String,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub url: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Shape the webhook message: a headline counting every item, and one embed
/// for each of the first [`MAX_EMBEDS`] items.
pub fn build_payload(title: &str, items: &[NotifyItem], color: u32) -> WebhookPayload {
    let embeds = items
        .iter()
        .take(MAX_EMBEDS)
        .map(|item| Embed {
            title: item.title.clone(),
            url: item.link.clone(),
            color,
            footer: item
                .date
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|d| EmbedFooter {
                    text: d.to_string(),
                }),
            description: item
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|d| truncate_chars(d, MAX_DESCRIPTION_CHARS)),
        })
        .collect();

    WebhookPayload {
        content: format!("**{}** - 새 글 {}개!", title, items.len()),
        embeds,
    }
}

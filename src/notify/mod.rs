//! Outbound notifications for newly found items.

pub mod discord;

use async_trait::async_trait;

use crate::models::Record;

pub use discord::DiscordNotifier;

/// One line of a notification: what is shown for a single new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyItem {
    pub title: String,
    pub link: String,
    pub description: Option<String>,
    pub date: Option<String>,
}

/// Destination for "new items found" reports.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Report `items` under `title`. Returns whether the report was delivered;
    /// never fails.
    async fn notify(&self, title: &str, items: &[NotifyItem], color: u32) -> bool;
}

/// How records of a watch are presented in notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStyle {
    /// Blog posts: title, link, and the optional date/description fields.
    Article,
    /// Job postings: "[company] title" with the origin site as description.
    JobPosting,
}

impl ItemStyle {
    pub fn present(self, record: &Record) -> NotifyItem {
        match self {
            ItemStyle::Article => NotifyItem {
                title: record.title.clone(),
                link: record.link.clone(),
                description: record.description().map(str::to_string),
                date: record.date().map(str::to_string),
            },
            ItemStyle::JobPosting => NotifyItem {
                title: format!("[{}] {}", record.company().unwrap_or("?"), record.title),
                link: record.link.clone(),
                description: Some(format!("Source: {}", record.source)),
                date: None,
            },
        }
    }

    /// Log line for a new record.
    pub fn summary_line(self, record: &Record) -> String {
        match self {
            ItemStyle::Article => format!("{} ({})", record.title, record.link),
            ItemStyle::JobPosting => format!(
                "[{}] {}",
                record.company().unwrap_or_default(),
                record.title
            ),
        }
    }
}

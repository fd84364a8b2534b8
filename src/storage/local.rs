//! Local filesystem snapshot storage.
//!
//! The snapshot is a pretty-printed UTF-8 JSON array. Writes go to a
//! sibling `.tmp` file first and are renamed into place, so a crash mid-write
//! leaves the previous snapshot intact.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::Record;
use crate::storage::SnapshotStorage;

/// Snapshot stored as a single JSON file.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Create a storage backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read the raw snapshot, returning None if the file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read and parse the snapshot.
    ///
    /// The file must be a JSON array; elements that are not usable records
    /// (no string `link`) are dropped one by one so the rest of the history
    /// survives.
    async fn try_load(&self) -> Result<Option<Vec<Record>>> {
        let Some(bytes) = self.read_bytes().await? else {
            return Ok(None);
        };
        let elements: Vec<Value> = serde_json::from_slice(&bytes)?;
        let total = elements.len();

        let records: Vec<Record> = elements
            .into_iter()
            .filter_map(|element| serde_json::from_value(element).ok())
            .collect();

        if records.len() < total {
            log::warn!(
                "Dropped {} malformed entries from {}",
                total - records.len(),
                self.path.display()
            );
        }
        Ok(Some(records))
    }
}

#[async_trait]
impl SnapshotStorage for LocalStorage {
    async fn load(&self) -> Vec<Record> {
        match self.try_load().await {
            Ok(Some(records)) => records,
            Ok(None) => {
                log::info!("No snapshot at {}, starting fresh", self.path.display());
                Vec::new()
            }
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable snapshot {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    async fn save(&self, records: &[Record]) -> Result<()> {
        let mut bytes = serde_json::to_vec_pretty(records)?;
        bytes.push(b'\n');
        self.write_bytes(&bytes).await
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

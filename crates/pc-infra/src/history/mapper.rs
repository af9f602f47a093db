//! On-disk row format and its migration into [`HistoryEntry`].
//!
//! Older history files used `timestamp`, `type`, `hash` and `saved` for what
//! is now `createdAt`, `classification`, `contentHash` and `exported`, stored
//! an emoji label as the type and an MD5 digest as the hash, and may lack
//! `pasted` entirely.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use pc_core::{Classification, ContentHash, HistoryEntry};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PersistedEntryRow {
    pub content: String,
    #[serde(default, alias = "timestamp")]
    pub created_at: Option<String>,
    #[serde(default, alias = "type")]
    pub classification: Option<String>,
    #[serde(default, alias = "hash")]
    pub content_hash: Option<String>,
    #[serde(default)]
    pub pasted: Option<bool>,
    #[serde(default, alias = "saved")]
    pub exported: Option<bool>,
}

impl PersistedEntryRow {
    pub(crate) fn into_entry(self, loaded_at: DateTime<Utc>) -> HistoryEntry {
        let content_hash = ContentHash::of(&self.content);
        if let Some(stored) = self.content_hash.as_deref() {
            if stored != content_hash.as_str() {
                debug!(stored, "Recomputed stale content hash");
            }
        }

        let classification = self
            .classification
            .as_deref()
            .and_then(parse_classification)
            .unwrap_or_else(|| Classification::detect(&self.content));

        let created_at = self
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(loaded_at);

        HistoryEntry {
            content_hash,
            classification,
            created_at,
            pasted: self.pasted.unwrap_or(false),
            exported: self.exported.unwrap_or(false),
            content: self.content,
        }
    }
}

fn parse_classification(raw: &str) -> Option<Classification> {
    match raw {
        "url" => Some(Classification::Url),
        "number" => Some(Classification::Number),
        "multiline_text" => Some(Classification::MultilineText),
        "text" => Some(Classification::Text),
        _ => None,
    }
}

/// RFC 3339, or a naive ISO timestamp taken as local time.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|ts| ts.with_timezone(&Utc))
}

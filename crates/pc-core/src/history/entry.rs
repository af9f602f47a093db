use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hash::ContentHash;

/// Length of the single-line preview carried by UI events.
pub const PREVIEW_CHARS: usize = 30;

/// Cosmetic kind of a history entry, derived once when the entry is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Url,
    Number,
    MultilineText,
    Text,
}

impl Classification {
    /// Classify clipboard text.
    ///
    /// Rules are checked in order: `http://`/`https://` prefix, all-numeric,
    /// contains a line break, plain text.
    pub fn detect(content: &str) -> Self {
        if content.starts_with("http://") || content.starts_with("https://") {
            Classification::Url
        } else if !content.is_empty() && content.chars().all(char::is_numeric) {
            Classification::Number
        } else if content.contains('\n') || content.contains('\r') {
            Classification::MultilineText
        } else {
            Classification::Text
        }
    }
}

/// One recorded clipboard text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub content: String,
    pub content_hash: ContentHash,
    pub created_at: DateTime<Utc>,
    pub classification: Classification,
    /// Matched as the content of a completed external paste at least once.
    pub pasted: bool,
    /// Written to an export file after being consumed.
    pub exported: bool,
}

impl HistoryEntry {
    pub fn new(content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let content = content.into();
        Self {
            content_hash: ContentHash::of(&content),
            classification: Classification::detect(&content),
            content,
            created_at,
            pasted: false,
            exported: false,
        }
    }

    /// Single-line, trimmed, char-bounded preview of the content.
    pub fn preview(&self) -> String {
        preview_of(&self.content)
    }
}

pub fn preview_of(content: &str) -> String {
    content
        .trim()
        .replace(['\r', '\n'], " ")
        .chars()
        .take(PREVIEW_CHARS)
        .collect()
}

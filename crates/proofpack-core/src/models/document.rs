use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::DocumentCategory;

/// An uploaded proof item. Belongs to exactly one pack and is immutable once
/// uploaded; replacing a document means removing it and uploading another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Document {
    pub id: String,
    pub pack_id: String,
    #[ts(type = "string")]
    pub category: DocumentCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    /// Size of the uploaded file in bytes.
    #[serde(default)]
    #[ts(type = "number")]
    pub file_size: u64,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    pub uploaded_at: DateTime<Utc>,
}

/// Free-form descriptive fields captured at upload time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct DocumentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    #[ts(type = "Record<string, unknown>")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Where a document stands relative to its expiration date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryState {
    /// No expiration date, or expires after the warning window.
    Current,
    /// Expires today or within the warning window.
    Expiring,
    /// Expiration date is in the past.
    Expired,
}

impl Document {
    /// A new document with a fresh id, uploaded now.
    pub fn new(pack_id: impl Into<String>, category: DocumentCategory) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pack_id: pack_id.into(),
            category,
            expiration_date: None,
            file_size: 0,
            metadata: DocumentMetadata::default(),
            uploaded_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_expiration(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    pub fn with_file_size(mut self, bytes: u64) -> Self {
        self.file_size = bytes;
        self
    }

    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Classify against `today` and a warning window in days.
    pub fn expiry_state(&self, today: NaiveDate, warning_days: i64) -> ExpiryState {
        let Some(expires) = self.expiration_date else {
            return ExpiryState::Current;
        };
        if expires < today {
            return ExpiryState::Expired;
        }
        // A window past the end of the calendar covers every future date.
        let within_window = today
            .checked_add_days(Days::new(warning_days.max(0).unsigned_abs()))
            .map_or(true, |window_end| expires <= window_end);
        if within_window {
            ExpiryState::Expiring
        } else {
            ExpiryState::Current
        }
    }
}

impl DocumentMetadata {
    pub fn has_title(&self) -> bool {
        non_blank(self.title.as_deref())
    }

    pub fn has_notes(&self) -> bool {
        non_blank(self.notes.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

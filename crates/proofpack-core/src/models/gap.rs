use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::DocumentCategory;

/// Why a required category counts as a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    /// No document uploaded for the category.
    Missing,
    /// Every document in the category has expired.
    Expired,
    /// No current document; the remaining ones expire inside the warning window.
    Expiring,
}

/// A required category the pack does not currently satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Gap {
    #[ts(type = "string")]
    pub category: DocumentCategory,
    pub kind: GapKind,
    /// Latest expiration date among the category's documents, if any apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
    pub recommendation: String,
}

impl Gap {
    pub fn new(category: DocumentCategory, kind: GapKind, expires_on: Option<NaiveDate>) -> Self {
        let recommendation = kind.recommendation(&category, expires_on);
        Self {
            category,
            kind,
            expires_on,
            recommendation,
        }
    }

    pub fn missing(category: DocumentCategory) -> Self {
        Self::new(category, GapKind::Missing, None)
    }
}

impl GapKind {
    /// Remediation advice shown to the SME.
    pub fn recommendation(self, category: &DocumentCategory, expires_on: Option<NaiveDate>) -> String {
        let label = category.label();
        match (self, expires_on) {
            (Self::Missing, _) => format!("Upload a {label} document."),
            (Self::Expired, Some(date)) => {
                format!("{label} expired on {date}. Upload a renewed document.")
            }
            (Self::Expired, None) => format!("{label} has expired. Upload a renewed document."),
            (Self::Expiring, Some(date)) => {
                format!("{label} expires on {date}. Renew it before it lapses.")
            }
            (Self::Expiring, None) => format!("{label} expires soon. Renew it before it lapses."),
        }
    }
}

pub mod completeness;
pub mod expiration;
pub mod quality;

use chrono::{DateTime, NaiveDate, Utc};
use proofpack_core::models::{Document, DocumentCategory, ExpiryState};

/// Evaluation-time inputs shared by every factor.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext {
    /// Calendar day the pack is evaluated on (UTC).
    pub today: NaiveDate,
    /// Expiration warning window in days.
    pub warning_days: i64,
}

impl ScoringContext {
    pub fn new(now: DateTime<Utc>, warning_days: i64) -> Self {
        Self {
            today: now.date_naive(),
            warning_days: warning_days.max(0),
        }
    }

    pub fn expiry_state(&self, document: &Document) -> ExpiryState {
        document.expiry_state(self.today, self.warning_days)
    }
}

/// The documents filed under one required category.
#[derive(Debug, Clone)]
pub struct CategoryCoverage<'a> {
    pub category: DocumentCategory,
    pub documents: Vec<&'a Document>,
}

impl CategoryCoverage<'_> {
    pub fn is_covered(&self) -> bool {
        !self.documents.is_empty()
    }
}

/// Bucket documents by required category, one entry per required category in
/// config order. Documents in non-required categories are ignored.
pub fn coverage<'a>(
    required: &[DocumentCategory],
    documents: &'a [Document],
) -> Vec<CategoryCoverage<'a>> {
    required
        .iter()
        .map(|category| CategoryCoverage {
            category: category.clone(),
            documents: documents
                .iter()
                .filter(|d| &d.category == category)
                .collect(),
        })
        .collect()
}

/// Mean of per-category credits in [0, 1], scaled to 0–100.
pub(crate) fn mean_percent(credits: impl Iterator<Item = f64>, categories: usize) -> f64 {
    if categories == 0 {
        return 0.0;
    }
    let total: f64 = credits.sum();
    (100.0 * total / categories as f64).clamp(0.0, 100.0)
}

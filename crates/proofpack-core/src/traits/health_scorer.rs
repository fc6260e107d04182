use chrono::{DateTime, Utc};

use crate::models::{Document, Gap, PackAssessment, PackHealth};

/// Pack Health scoring. Implementations are pure and never fail; bad
/// configuration degrades to a zero score.
pub trait IHealthScorer: Send + Sync {
    /// Score a document set as of `now`.
    fn compute_health(&self, documents: &[Document], now: DateTime<Utc>) -> PackHealth;

    /// Required categories the document set does not satisfy as of `now`.
    fn identify_gaps(&self, documents: &[Document], now: DateTime<Utc>) -> Vec<Gap>;

    /// Health and gaps in one pass.
    fn assess(&self, documents: &[Document], now: DateTime<Utc>) -> PackAssessment {
        PackAssessment {
            health: self.compute_health(documents, now),
            gaps: self.identify_gaps(documents, now),
        }
    }
}

use proofpack_core::models::ExpiryState;

use super::{mean_percent, CategoryCoverage, ScoringContext};

/// Expiration: per required category, the fraction of its documents that are
/// current, averaged over all required categories.
///
/// Range: 0.0 – 100.0. Each expired or expiring document lowers its
/// category's credit proportionally; an uncovered category earns nothing.
pub fn calculate(coverage: &[CategoryCoverage<'_>], ctx: &ScoringContext) -> f64 {
    mean_percent(
        coverage.iter().map(|c| category_credit(c, ctx)),
        coverage.len(),
    )
}

fn category_credit(coverage: &CategoryCoverage<'_>, ctx: &ScoringContext) -> f64 {
    if coverage.documents.is_empty() {
        return 0.0;
    }
    let current = coverage
        .documents
        .iter()
        .filter(|d| ctx.expiry_state(d) == ExpiryState::Current)
        .count();
    current as f64 / coverage.documents.len() as f64
}

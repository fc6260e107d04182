use super::{mean_percent, CategoryCoverage};

/// Completeness: share of required categories with at least one document.
///
/// Range: 0.0 – 100.0. Expired documents still count as present here; the
/// expiration factor is what penalizes them.
pub fn calculate(coverage: &[CategoryCoverage<'_>]) -> f64 {
    mean_percent(
        coverage
            .iter()
            .map(|c| if c.is_covered() { 1.0 } else { 0.0 }),
        coverage.len(),
    )
}

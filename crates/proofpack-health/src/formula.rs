use chrono::{DateTime, Utc};
use proofpack_core::config::HealthConfig;
use proofpack_core::models::{is_eligible_score, PackHealth};

use crate::factors::{self, CategoryCoverage, ScoringContext};

/// Weighted average of the three sub-scores.
///
/// ```text
/// overall = (wc × completeness + we × expiration + wq × quality)
///         / (wc + we + wq)
/// ```
///
/// Result is clamped to [0.0, 100.0]. Remediation is reported alongside but
/// never feeds the overall score.
pub fn compute(
    coverage: &[CategoryCoverage<'_>],
    gap_count: usize,
    config: &HealthConfig,
    ctx: &ScoringContext,
    now: DateTime<Utc>,
) -> PackHealth {
    compute_breakdown(coverage, gap_count, config, ctx).into_health(now)
}

/// Every sub-score and the weights that produced the overall score.
#[derive(Debug, Clone)]
pub struct HealthBreakdown {
    pub completeness: f64,
    pub expiration: f64,
    pub quality: f64,
    pub remediation: f64,
    pub completeness_weight: f64,
    pub expiration_weight: f64,
    pub quality_weight: f64,
    pub overall: f64,
}

impl HealthBreakdown {
    pub fn into_health(self, now: DateTime<Utc>) -> PackHealth {
        PackHealth {
            overall_score: self.overall,
            completeness_score: self.completeness,
            expiration_score: self.expiration,
            quality_score: self.quality,
            remediation_score: self.remediation,
            is_eligible_for_introductions: is_eligible_score(self.overall),
            computed_at: Some(now),
        }
    }
}

/// Compute each sub-score individually for debugging/observability.
///
/// Callers must have checked that the weights are usable.
pub fn compute_breakdown(
    coverage: &[CategoryCoverage<'_>],
    gap_count: usize,
    config: &HealthConfig,
    ctx: &ScoringContext,
) -> HealthBreakdown {
    let completeness = factors::completeness::calculate(coverage);
    let expiration = factors::expiration::calculate(coverage, ctx);
    let quality = factors::quality::calculate(coverage, &config.quality);
    let remediation = remediation_score(coverage.len(), gap_count);

    let weights = config.weights;
    let total = weights.total();
    let overall = if total > 0.0 {
        (weights.completeness * completeness
            + weights.expiration * expiration
            + weights.quality * quality)
            / total
    } else {
        0.0
    };

    HealthBreakdown {
        completeness,
        expiration,
        quality,
        remediation,
        completeness_weight: weights.completeness,
        expiration_weight: weights.expiration,
        quality_weight: weights.quality,
        overall: overall.clamp(0.0, 100.0),
    }
}

/// Share of required categories that are not gaps, 0–100.
pub fn remediation_score(required: usize, gap_count: usize) -> f64 {
    if required == 0 {
        return 0.0;
    }
    let open = gap_count.min(required);
    100.0 * (required - open) as f64 / required as f64
}

use chrono::{DateTime, Utc};
use proofpack_core::config::HealthConfig;
use proofpack_core::models::{Document, DocumentCategory, Gap, PackAssessment, PackHealth};
use proofpack_core::traits::IHealthScorer;
use proofpack_observability::events;

use crate::factors::{self, ScoringContext};
use crate::formula::{self, HealthBreakdown};
use crate::gaps;

/// Pack Health engine: scores a document set against a [`HealthConfig`].
#[derive(Debug, Clone, Default)]
pub struct HealthEngine {
    config: HealthConfig,
}

impl HealthEngine {
    pub fn new(config: HealthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Sub-scores and weights, or `None` when the config cannot be scored.
    pub fn breakdown(&self, documents: &[Document], now: DateTime<Utc>) -> Option<HealthBreakdown> {
        let required = usable_required(&self.config)?;
        let ctx = ScoringContext::new(now, self.config.expiration_warning_days);
        let coverage = factors::coverage(&required, documents);
        let gap_count = gaps::identify(&coverage, &ctx).len();
        Some(formula::compute_breakdown(
            &coverage,
            gap_count,
            &self.config,
            &ctx,
        ))
    }
}

impl IHealthScorer for HealthEngine {
    fn compute_health(&self, documents: &[Document], now: DateTime<Utc>) -> PackHealth {
        assess(&self.config, documents, now).health
    }

    fn identify_gaps(&self, documents: &[Document], now: DateTime<Utc>) -> Vec<Gap> {
        assess(&self.config, documents, now).gaps
    }

    fn assess(&self, documents: &[Document], now: DateTime<Utc>) -> PackAssessment {
        assess(&self.config, documents, now)
    }
}

/// Score a document set. Never fails; see [`assess`].
pub fn compute_pack_health(
    documents: &[Document],
    config: &HealthConfig,
    now: DateTime<Utc>,
) -> PackHealth {
    assess(config, documents, now).health
}

/// Required categories the document set does not satisfy.
pub fn identify_gaps(documents: &[Document], config: &HealthConfig, now: DateTime<Utc>) -> Vec<Gap> {
    let Some(required) = usable_required(config) else {
        return degraded_gaps(config);
    };
    let ctx = ScoringContext::new(now, config.expiration_warning_days);
    gaps::identify(&factors::coverage(&required, documents), &ctx)
}

/// Health and gaps in a single pass over the documents.
///
/// An unusable config (no required categories, or weights that are negative,
/// non-finite, or sum to zero) yields a zero, ineligible score and every
/// configured category as a missing gap.
pub fn assess(config: &HealthConfig, documents: &[Document], now: DateTime<Utc>) -> PackAssessment {
    let Some(required) = usable_required(config) else {
        let mut health = PackHealth::zero();
        health.computed_at = Some(now);
        return PackAssessment {
            health,
            gaps: degraded_gaps(config),
        };
    };

    let ctx = ScoringContext::new(now, config.expiration_warning_days);
    let coverage = factors::coverage(&required, documents);
    let gaps = gaps::identify(&coverage, &ctx);
    let health = formula::compute(&coverage, gaps.len(), config, &ctx, now);

    events::pack_health_computed(
        documents.len(),
        health.overall_score,
        gaps.len(),
        health.is_eligible_for_introductions,
    );
    PackAssessment { health, gaps }
}

fn usable_required(config: &HealthConfig) -> Option<Vec<DocumentCategory>> {
    let required = config.unique_required();
    if required.is_empty() {
        events::scoring_degraded("no required categories configured", 0);
        return None;
    }
    if !config.weights.is_usable() {
        events::scoring_degraded("score weights are unusable", required.len());
        return None;
    }
    Some(required)
}

fn degraded_gaps(config: &HealthConfig) -> Vec<Gap> {
    config
        .unique_required()
        .into_iter()
        .map(Gap::missing)
        .collect()
}

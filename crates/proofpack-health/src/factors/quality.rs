use proofpack_core::config::QualityConfig;
use proofpack_core::models::Document;

use super::{mean_percent, CategoryCoverage};

/// Quality: per required category, the best document's signal ratio,
/// averaged over all required categories.
///
/// Range: 0.0 – 100.0. A placeholder heuristic whose signals are all
/// configuration; no business weighting is implied beyond "more is better".
pub fn calculate(coverage: &[CategoryCoverage<'_>], config: &QualityConfig) -> f64 {
    mean_percent(
        coverage.iter().map(|c| {
            c.documents
                .iter()
                .map(|d| document_quality(d, config))
                .fold(0.0, f64::max)
        }),
        coverage.len(),
    )
}

/// Fraction of enabled signals a single document satisfies.
/// With every signal disabled, any document earns full credit.
pub fn document_quality(document: &Document, config: &QualityConfig) -> f64 {
    let enabled = config.enabled_signals();
    if enabled == 0 {
        return 1.0;
    }

    let mut satisfied = 0usize;
    if config.require_notes && document.metadata.has_notes() {
        satisfied += 1;
    }
    if config.require_title && document.metadata.has_title() {
        satisfied += 1;
    }
    if config.min_file_size_bytes > 0 && document.file_size >= config.min_file_size_bytes {
        satisfied += 1;
    }
    satisfied as f64 / enabled as f64
}

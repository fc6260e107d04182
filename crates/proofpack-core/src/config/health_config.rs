use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::defaults;
use crate::models::DocumentCategory;

/// Pack Health scoring configuration.
///
/// Weights and the required category set are data, so the scoring policy can
/// change without a code change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct HealthConfig {
    /// Categories a pack must cover to be complete.
    #[ts(type = "Array<string>")]
    pub required_categories: Vec<DocumentCategory>,
    /// Documents expiring within this many days count as expiring.
    pub expiration_warning_days: i64,
    pub weights: ScoreWeights,
    pub quality: QualityConfig,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            required_categories: defaults::DEFAULT_REQUIRED_CATEGORIES
                .iter()
                .map(|name| DocumentCategory::from_name(name))
                .collect(),
            expiration_warning_days: defaults::DEFAULT_EXPIRATION_WARNING_DAYS,
            weights: ScoreWeights::default(),
            quality: QualityConfig::default(),
        }
    }
}

impl HealthConfig {
    /// Config with the given required categories and default everything else.
    pub fn with_required(categories: impl IntoIterator<Item = DocumentCategory>) -> Self {
        Self {
            required_categories: categories.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Required categories with duplicates removed, first occurrence wins.
    pub fn unique_required(&self) -> Vec<DocumentCategory> {
        let mut seen = Vec::with_capacity(self.required_categories.len());
        for category in &self.required_categories {
            if !seen.contains(category) {
                seen.push(category.clone());
            }
        }
        seen
    }
}

/// Relative weights of the three sub-scores in the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct ScoreWeights {
    pub completeness: f64,
    pub expiration: f64,
    pub quality: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            completeness: defaults::DEFAULT_COMPLETENESS_WEIGHT,
            expiration: defaults::DEFAULT_EXPIRATION_WEIGHT,
            quality: defaults::DEFAULT_QUALITY_WEIGHT,
        }
    }
}

impl ScoreWeights {
    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.completeness + self.expiration + self.quality
    }

    /// Weights are usable when each is finite and non-negative and the sum is
    /// positive and finite.
    pub fn is_usable(&self) -> bool {
        let all = [self.completeness, self.expiration, self.quality];
        let total = self.total();
        all.iter().all(|w| w.is_finite() && *w >= 0.0) && total.is_finite() && total > 0.0
    }
}

/// Signals that make up the placeholder quality heuristic. Each enabled signal
/// counts equally toward a document's quality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct QualityConfig {
    /// Document carries notes or a description.
    pub require_notes: bool,
    /// Document carries a non-empty title.
    pub require_title: bool,
    /// Minimum upload size in bytes. Zero disables the signal.
    #[ts(type = "number")]
    pub min_file_size_bytes: u64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            require_notes: defaults::DEFAULT_QUALITY_REQUIRE_NOTES,
            require_title: defaults::DEFAULT_QUALITY_REQUIRE_TITLE,
            min_file_size_bytes: defaults::DEFAULT_QUALITY_MIN_FILE_SIZE_BYTES,
        }
    }
}

impl QualityConfig {
    /// Number of enabled signals.
    pub fn enabled_signals(&self) -> usize {
        [
            self.require_notes,
            self.require_title,
            self.min_file_size_bytes > 0,
        ]
        .iter()
        .filter(|enabled| **enabled)
        .count()
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::Gap;
use crate::constants::ELIGIBILITY_THRESHOLD;

/// Composite 0–100 readiness score derived from a pack's documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PackHealth {
    pub overall_score: f64,
    pub completeness_score: f64,
    pub expiration_score: f64,
    pub quality_score: f64,
    pub remediation_score: f64,
    pub is_eligible_for_introductions: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_at: Option<DateTime<Utc>>,
}

impl PackHealth {
    /// All scores zero, not eligible.
    pub fn zero() -> Self {
        Self {
            overall_score: 0.0,
            completeness_score: 0.0,
            expiration_score: 0.0,
            quality_score: 0.0,
            remediation_score: 0.0,
            is_eligible_for_introductions: false,
            computed_at: None,
        }
    }
}

impl Default for PackHealth {
    fn default() -> Self {
        Self::zero()
    }
}

/// The one eligibility rule, shared by introductions, sharing, and submission.
pub fn is_eligible_score(score: f64) -> bool {
    score >= ELIGIBILITY_THRESHOLD
}

/// Health plus the gaps found in the same pass over the documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PackAssessment {
    pub health: PackHealth,
    pub gaps: Vec<Gap>,
}

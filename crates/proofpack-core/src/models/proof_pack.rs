use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{Document, Gap, PackAssessment, PackHealth};
use crate::errors::PackError;

/// Proof Pack review lifecycle: `draft → submitted → approved | draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Default)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PackStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
}

impl PackStatus {
    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: PackStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Submitted)
                | (Self::Submitted, Self::Approved)
                | (Self::Submitted, Self::Draft)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for PackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            other => Err(format!("unknown pack status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

/// Outcome of the most recent QA review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PackReview {
    pub reviewer_id: String,
    pub decision: ReviewDecision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub reviewed_at: DateTime<Utc>,
}

/// A bundle of compliance and capability documents an SME presents to buyers.
///
/// `health` and `gaps` are derived from `documents` and are only ever replaced
/// wholesale through [`ProofPack::apply_assessment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProofPack {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub status: PackStatus,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub health: PackHealth,
    #[serde(default)]
    pub gaps: Vec<Gap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<PackReview>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl ProofPack {
    /// A new, empty draft pack.
    pub fn new(owner_id: impl Into<String>, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            title: title.into(),
            status: PackStatus::Draft,
            documents: Vec::new(),
            health: PackHealth::zero(),
            gaps: Vec::new(),
            review: None,
            created_at: now,
            updated_at: now,
            submitted_at: None,
        }
    }

    pub fn document(&self, document_id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == document_id)
    }

    /// Submitted packs are under review and their documents cannot change.
    pub fn is_locked(&self) -> bool {
        self.status == PackStatus::Submitted
    }

    /// Replace the derived health and gaps.
    pub fn apply_assessment(&mut self, assessment: PackAssessment, now: DateTime<Utc>) {
        self.health = assessment.health;
        self.gaps = assessment.gaps;
        self.updated_at = now;
    }

    /// Move to `next`, rejecting transitions the lifecycle does not allow.
    pub fn transition(&mut self, next: PackStatus, now: DateTime<Utc>) -> Result<(), PackError> {
        if !self.status.can_transition_to(next) {
            return Err(PackError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        if next == PackStatus::Submitted {
            self.submitted_at = Some(now);
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}

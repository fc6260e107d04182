//! # proofpack-health
//!
//! Pack Health scoring for Proof Packs.
//! Three weighted sub-scores (completeness, expiration, quality) over the
//! required document categories, a remediation score derived from the gap
//! list, and the fixed eligibility gate used for introductions, sharing,
//! and submission.
//!
//! The scorer is pure and never fails. An unusable configuration degrades
//! to a zero score with every required category reported as a gap.

pub mod engine;
pub mod factors;
pub mod formula;
pub mod gaps;
pub mod workflow;

pub use engine::{compute_pack_health, identify_gaps, HealthEngine};
pub use factors::ScoringContext;
pub use formula::HealthBreakdown;
pub use workflow::PackWorkflow;

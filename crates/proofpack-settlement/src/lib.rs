//! # proofpack-settlement
//!
//! Groups pending attribution events into one settlement per partner, applies
//! the platform fee, and commits the result through an
//! [`IAttributionStore`](proofpack_core::traits::IAttributionStore) as a single
//! all-or-nothing batch.
//!
//! Money is exact decimal arithmetic throughout; nothing is rounded here.

pub mod aggregator;
pub mod engine;
pub mod summary;

pub use aggregator::{aggregate_settlements, AggregationOutcome, SkipReason, SkippedEvent};
pub use engine::{audit_entries, SettlementEngine};
pub use summary::{summarize_partner, PartnerSummary};

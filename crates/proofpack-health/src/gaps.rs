//! Gap identification: required categories the pack does not satisfy.

use proofpack_core::models::{ExpiryState, Gap, GapKind};

use crate::factors::{CategoryCoverage, ScoringContext};

/// One gap per unsatisfied required category, in config order.
///
/// - no documents → `missing`
/// - every document expired → `expired`
/// - no current document, some still valid → `expiring`
pub fn identify(coverage: &[CategoryCoverage<'_>], ctx: &ScoringContext) -> Vec<Gap> {
    coverage.iter().filter_map(|c| category_gap(c, ctx)).collect()
}

fn category_gap(coverage: &CategoryCoverage<'_>, ctx: &ScoringContext) -> Option<Gap> {
    if coverage.documents.is_empty() {
        return Some(Gap::missing(coverage.category.clone()));
    }

    let mut any_current = false;
    let mut latest_expired = None;
    let mut latest_expiring = None;
    for doc in &coverage.documents {
        match ctx.expiry_state(doc) {
            ExpiryState::Current => any_current = true,
            ExpiryState::Expired => latest_expired = latest_expired.max(doc.expiration_date),
            ExpiryState::Expiring => latest_expiring = latest_expiring.max(doc.expiration_date),
        }
    }

    if any_current {
        None
    } else if latest_expiring.is_some() {
        Some(Gap::new(
            coverage.category.clone(),
            GapKind::Expiring,
            latest_expiring,
        ))
    } else {
        Some(Gap::new(
            coverage.category.clone(),
            GapKind::Expired,
            latest_expired,
        ))
    }
}

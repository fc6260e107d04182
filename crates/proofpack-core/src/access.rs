//! Role-based access policy for every mutating or sensitive operation.
//!
//! One function replaces the per-route checks: callers pass the verified
//! actor, the action, and the owning user id of the resource (pack owner or
//! partner id) when there is one.

use crate::errors::{ProofpackError, ProofpackResult};
use crate::models::{Actor, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewPack,
    EditPack,
    SubmitPack,
    ReviewPack,
    RecordAttribution,
    RunSettlement,
    ViewEarnings,
}

/// Allow or deny `action` for `actor` on a resource owned by `owner_id`.
pub fn authorize(actor: &Actor, action: Action, owner_id: Option<&str>) -> ProofpackResult<()> {
    if actor.is_admin() {
        return Ok(());
    }

    let is_owner = owner_id.map(|owner| owner == actor.user_id).unwrap_or(false);
    let allowed = match action {
        Action::ViewPack => {
            is_owner
                || matches!(
                    actor.role,
                    Role::QaReviewer | Role::Buyer | Role::Instructor
                )
        }
        Action::EditPack | Action::SubmitPack => is_owner && actor.role == Role::SmeUser,
        Action::ReviewPack => actor.role == Role::QaReviewer,
        Action::RecordAttribution | Action::RunSettlement => false,
        Action::ViewEarnings => is_owner && actor.role == Role::Partner,
    };

    if allowed {
        Ok(())
    } else {
        Err(ProofpackError::forbidden(format!(
            "{} {} may not {:?}",
            actor.role, actor.user_id, action
        )))
    }
}

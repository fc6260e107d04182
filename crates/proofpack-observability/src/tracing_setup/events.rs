//! Structured log events for key operations.
//!
//! Each function emits a `tracing` event with an `event` field naming it, so
//! log pipelines can filter on a stable key.

/// Log a completed health computation.
pub fn pack_health_computed(document_count: usize, overall_score: f64, gap_count: usize, eligible: bool) {
    tracing::debug!(
        event = "pack_health_computed",
        document_count = document_count,
        overall_score = overall_score,
        gap_count = gap_count,
        eligible = eligible,
        "pack health computed"
    );
}

/// Log scoring falling back to a zero score because the config is unusable.
pub fn scoring_degraded(reason: &str, required_categories: usize) {
    tracing::warn!(
        event = "scoring_degraded",
        reason = %reason,
        required_categories = required_categories,
        "pack health scoring degraded to zero score"
    );
}

/// Log a document added to or removed from a pack.
pub fn document_changed(pack_id: &str, document_id: &str, change: &str, overall_score: f64) {
    tracing::info!(
        event = "document_changed",
        pack_id = %pack_id,
        document_id = %document_id,
        change = %change,
        overall_score = overall_score,
        "pack document changed"
    );
}

/// Log a pack lifecycle transition.
pub fn pack_status_changed(pack_id: &str, from: &str, to: &str, actor_id: &str) {
    tracing::info!(
        event = "pack_status_changed",
        pack_id = %pack_id,
        from = %from,
        to = %to,
        actor_id = %actor_id,
        "pack status changed"
    );
}

/// Log a submission or share refused by the eligibility gate.
pub fn eligibility_denied(pack_id: &str, overall_score: f64, threshold: f64) {
    tracing::info!(
        event = "eligibility_denied",
        pack_id = %pack_id,
        overall_score = overall_score,
        threshold = threshold,
        "pack below eligibility threshold"
    );
}

/// Log an attribution event skipped during aggregation.
pub fn event_skipped(event_id: &str, reason: &str) {
    tracing::warn!(
        event = "event_skipped",
        event_id = %event_id,
        reason = %reason,
        "attribution event skipped"
    );
}

/// Log a settlement computed for one partner.
pub fn settlement_created(settlement_id: &str, partner_id: &str, event_count: u64, net_revenue: &str) {
    tracing::info!(
        event = "settlement_created",
        settlement_id = %settlement_id,
        partner_id = %partner_id,
        event_count = event_count,
        net_revenue = %net_revenue,
        "settlement created"
    );
}

/// Log a settlement batch written to the store.
pub fn settlement_batch_committed(settlement_count: usize, event_count: usize) {
    tracing::info!(
        event = "settlement_batch_committed",
        settlement_count = settlement_count,
        event_count = event_count,
        "settlement batch committed"
    );
}

/// Log a settlement batch the store refused.
pub fn settlement_batch_rejected(settlement_count: usize, error: &str) {
    tracing::error!(
        event = "settlement_batch_rejected",
        settlement_count = settlement_count,
        error = %error,
        "settlement batch rejected"
    );
}

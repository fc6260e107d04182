//! Span definitions per operation: health scoring, pack workflow, settlement runs.

/// Create a health scoring span.
#[macro_export]
macro_rules! health_span {
    ($document_count:expr) => {
        tracing::info_span!("proofpack.health", document_count = $document_count)
    };
}

/// Create a pack workflow span.
#[macro_export]
macro_rules! workflow_span {
    ($pack_id:expr, $operation:expr) => {
        tracing::info_span!("proofpack.workflow", pack_id = %$pack_id, operation = %$operation)
    };
}

/// Create a settlement run span.
#[macro_export]
macro_rules! settlement_span {
    ($event_count:expr) => {
        tracing::info_span!("proofpack.settlement", event_count = $event_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const HEALTH: &str = "proofpack.health";
    pub const WORKFLOW: &str = "proofpack.workflow";
    pub const SETTLEMENT: &str = "proofpack.settlement";
}

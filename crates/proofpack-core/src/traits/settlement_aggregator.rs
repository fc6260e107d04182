use crate::models::{AttributionEvent, Settlement};

/// Groups attribution events into per-partner settlements.
pub trait ISettlementAggregator: Send + Sync {
    /// One settlement per distinct partner among the pending events.
    fn aggregate(&self, events: &[AttributionEvent]) -> Vec<Settlement>;
}

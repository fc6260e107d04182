use chrono::{DateTime, Utc};
use proofpack_core::config::SettlementConfig;
use proofpack_core::errors::ProofpackResult;
use proofpack_core::models::{
    AttributionEvent, AuditActor, AuditEntity, AuditEntry, AuditOperation, Settlement,
    SettlementBatch, SettlementPeriod,
};
use proofpack_core::traits::{IAttributionStore, ISettlementAggregator};
use proofpack_observability::events;
use serde_json::json;

use crate::aggregator::{self, AggregationOutcome};

/// Settlement engine: aggregates pending events with the configured fee and
/// currency, and commits the result through a store.
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    config: SettlementConfig,
}

impl SettlementEngine {
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Aggregate an in-memory event list, optionally restricted to `period`.
    pub fn aggregate_events(
        &self,
        events: &[AttributionEvent],
        period: Option<&SettlementPeriod>,
        now: DateTime<Utc>,
    ) -> AggregationOutcome {
        aggregator::aggregate(
            events,
            self.config.platform_fee_percentage,
            &self.config.currency,
            period,
            now,
        )
    }

    /// What a run over `period` would settle, without writing anything.
    pub fn preview<S: IAttributionStore + ?Sized>(
        &self,
        store: &S,
        period: &SettlementPeriod,
        now: DateTime<Utc>,
    ) -> ProofpackResult<AggregationOutcome> {
        let pending = store.pending_events(period)?;
        Ok(self.aggregate_events(&pending, Some(period), now))
    }

    /// Settle every pending event in `period`.
    ///
    /// The settlements and the event transitions are written as one batch;
    /// if the store rejects it, nothing is written and every event stays
    /// pending.
    pub fn run<S: IAttributionStore + ?Sized>(
        &self,
        store: &S,
        period: &SettlementPeriod,
        now: DateTime<Utc>,
    ) -> ProofpackResult<AggregationOutcome> {
        let pending = store.pending_events(period)?;
        let _span = proofpack_observability::settlement_span!(pending.len()).entered();

        let outcome = self.aggregate_events(&pending, Some(period), now);
        let batch = SettlementBatch::new(outcome.settlements.clone())?;
        if batch.is_empty() {
            return Ok(outcome);
        }

        if let Err(e) = store.commit_settlements(&batch) {
            events::settlement_batch_rejected(batch.settlements().len(), &e.to_string());
            return Err(e);
        }

        for settlement in batch.settlements() {
            events::settlement_created(
                &settlement.id.to_string(),
                &settlement.partner_id,
                settlement.event_count,
                &settlement.net_revenue.to_string(),
            );
        }
        events::settlement_batch_committed(batch.settlements().len(), batch.event_count());
        Ok(outcome)
    }
}

impl ISettlementAggregator for SettlementEngine {
    fn aggregate(&self, events: &[AttributionEvent]) -> Vec<Settlement> {
        self.aggregate_events(events, None, Utc::now()).settlements
    }
}

/// One `settlement_created` audit entry per settlement.
pub fn audit_entries(
    settlements: &[Settlement],
    actor: AuditActor,
    now: DateTime<Utc>,
) -> Vec<AuditEntry> {
    settlements
        .iter()
        .map(|s| {
            AuditEntry::new(
                AuditEntity::Settlement,
                s.id.to_string(),
                AuditOperation::SettlementCreated,
                actor.clone(),
                json!({
                    "partner_id": s.partner_id,
                    "event_count": s.event_count,
                    "gross_revenue": s.gross_revenue.to_string(),
                    "net_revenue": s.net_revenue.to_string(),
                    "currency": s.currency,
                }),
                now,
            )
        })
        .collect()
}

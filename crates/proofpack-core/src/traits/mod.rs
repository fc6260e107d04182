mod health_scorer;
mod settlement_aggregator;
mod storage;

pub use health_scorer::IHealthScorer;
pub use settlement_aggregator::ISettlementAggregator;
pub use storage::{IAttributionStore, IAuditLog, IPackStore};

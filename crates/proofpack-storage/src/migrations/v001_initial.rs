//! V001: packs, attribution_events, settlements.
//!
//! Money columns are TEXT holding exact decimal strings. Timestamps are
//! fixed-width RFC 3339 UTC strings, so string order is time order.

pub const MIGRATION_SQL: &str = r#"
-- Proof packs: the full pack (documents, health, gaps, review) is kept as
-- JSON in `body`; the filter and sort columns are copied out of it.
CREATE TABLE IF NOT EXISTS packs (
    id TEXT PRIMARY KEY,
    owner_id TEXT NOT NULL,
    title TEXT NOT NULL,
    status TEXT NOT NULL CHECK (status IN ('draft', 'submitted', 'approved')),
    overall_score REAL NOT NULL DEFAULT 0,
    eligible INTEGER NOT NULL DEFAULT 0,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_packs_owner ON packs(owner_id, updated_at);
CREATE INDEX IF NOT EXISTS idx_packs_status ON packs(status, updated_at);

CREATE TABLE IF NOT EXISTS settlements (
    id TEXT PRIMARY KEY,
    partner_id TEXT NOT NULL,
    period_start TEXT NOT NULL,
    period_end TEXT NOT NULL,
    currency TEXT NOT NULL,
    gross_revenue TEXT NOT NULL,
    platform_fee_percentage TEXT NOT NULL,
    platform_fee_amount TEXT NOT NULL,
    net_revenue TEXT NOT NULL,
    event_count INTEGER NOT NULL,
    event_type_totals TEXT NOT NULL DEFAULT '[]',
    event_ids TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_settlements_partner ON settlements(partner_id, created_at);

-- An event is settled exactly once: settlement_id is set together with the
-- status and never changes afterwards.
CREATE TABLE IF NOT EXISTS attribution_events (
    id TEXT PRIMARY KEY,
    partner_id TEXT NOT NULL,
    sme_id TEXT NOT NULL,
    event_type TEXT NOT NULL,
    revenue_amount TEXT NOT NULL,
    attribution_percentage TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    settlement_status TEXT NOT NULL DEFAULT 'pending'
        CHECK (settlement_status IN ('pending', 'settled')),
    settlement_id TEXT REFERENCES settlements(id),
    CHECK ((settlement_status = 'pending') = (settlement_id IS NULL))
) STRICT;

CREATE INDEX IF NOT EXISTS idx_events_pending
    ON attribution_events(timestamp) WHERE settlement_status = 'pending';
CREATE INDEX IF NOT EXISTS idx_events_partner ON attribution_events(partner_id, timestamp);
CREATE INDEX IF NOT EXISTS idx_events_settlement ON attribution_events(settlement_id);
"#;

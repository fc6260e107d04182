use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::errors::SettlementError;

/// Revenue-generating action a partner is credited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AttributionEventType {
    Introduction,
    Subscription,
    CohortEnrollment,
    Purchase,
    Renewal,
    Referral,
}

impl AttributionEventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::Subscription => "subscription",
            Self::CohortEnrollment => "cohort_enrollment",
            Self::Purchase => "purchase",
            Self::Renewal => "renewal",
            Self::Referral => "referral",
        }
    }
}

impl fmt::Display for AttributionEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an event has been rolled into a settlement yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Default)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    #[default]
    Pending,
    Settled,
}

impl SettlementStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Settled => "settled",
        }
    }
}

/// Immutable record crediting a partner with part of an SME's revenue.
///
/// The only mutation after creation is [`AttributionEvent::mark_settled`],
/// which happens exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AttributionEvent {
    pub id: String,
    pub partner_id: String,
    pub sme_id: String,
    pub event_type: AttributionEventType,
    #[ts(type = "string")]
    pub revenue_amount: Decimal,
    /// Share of `revenue_amount` credited to the partner, 0–100.
    #[ts(type = "string")]
    pub attribution_percentage: Decimal,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub settlement_status: SettlementStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_id: Option<Uuid>,
}

impl AttributionEvent {
    /// Create a pending event, validating amount and percentage.
    pub fn new(
        partner_id: impl Into<String>,
        sme_id: impl Into<String>,
        event_type: AttributionEventType,
        revenue_amount: Decimal,
        attribution_percentage: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, SettlementError> {
        let event = Self {
            id: Uuid::new_v4().to_string(),
            partner_id: partner_id.into(),
            sme_id: sme_id.into(),
            event_type,
            revenue_amount,
            attribution_percentage,
            timestamp,
            settlement_status: SettlementStatus::Pending,
            settlement_id: None,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn validate(&self) -> Result<(), SettlementError> {
        let invalid = |reason: &str| SettlementError::InvalidEvent {
            event_id: self.id.clone(),
            reason: reason.to_string(),
        };
        if self.partner_id.trim().is_empty() {
            return Err(invalid("partner_id is empty"));
        }
        if self.revenue_amount < Decimal::ZERO {
            return Err(invalid("revenue_amount is negative"));
        }
        if self.attribution_percentage <= Decimal::ZERO
            || self.attribution_percentage > Decimal::ONE_HUNDRED
        {
            return Err(invalid("attribution_percentage must be in (0, 100]"));
        }
        if self.checked_attributed_amount().is_none() {
            return Err(invalid("revenue_amount is too large"));
        }
        if self.settlement_status == SettlementStatus::Settled && self.settlement_id.is_none() {
            return Err(invalid("settled event has no settlement_id"));
        }
        Ok(())
    }

    /// `revenue_amount × attribution_percentage / 100`, or `None` when the
    /// product does not fit in a `Decimal`.
    pub fn checked_attributed_amount(&self) -> Option<Decimal> {
        self.revenue_amount
            .checked_mul(self.attribution_percentage)?
            .checked_div(Decimal::ONE_HUNDRED)
    }

    /// `revenue_amount × attribution_percentage / 100`.
    ///
    /// Exact for every event that passes [`AttributionEvent::validate`]. For
    /// others the percentage is clamped to [0, 100] and applied after the
    /// division, which cannot overflow.
    pub fn attributed_amount(&self) -> Decimal {
        self.checked_attributed_amount().unwrap_or_else(|| {
            let pct = self
                .attribution_percentage
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
            self.revenue_amount / Decimal::ONE_HUNDRED * pct
        })
    }

    pub fn is_pending(&self) -> bool {
        self.settlement_status == SettlementStatus::Pending
    }

    /// Stamp the settlement this event was grouped into. Fails if already settled.
    pub fn mark_settled(&mut self, settlement_id: Uuid) -> Result<(), SettlementError> {
        if let Some(existing) = self.settlement_id {
            return Err(SettlementError::AlreadySettled {
                event_id: self.id.clone(),
                settlement_id: existing,
            });
        }
        self.settlement_status = SettlementStatus::Settled;
        self.settlement_id = Some(settlement_id);
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{Actor, Role};

/// An entry in the append-only audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuditEntry {
    pub entity_id: String,
    pub entity: AuditEntity,
    pub operation: AuditOperation,
    pub actor: AuditActor,
    /// JSON details about the operation.
    #[ts(type = "unknown")]
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AuditEntity {
    Pack,
    AttributionEvent,
    Settlement,
}

impl AuditEntity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pack => "pack",
            Self::AttributionEvent => "attribution_event",
            Self::Settlement => "settlement",
        }
    }
}

/// Operations tracked in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AuditOperation {
    DocumentAdded,
    DocumentRemoved,
    PackSubmitted,
    PackApproved,
    PackRejected,
    AttributionRecorded,
    SettlementCreated,
}

impl AuditOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DocumentAdded => "document_added",
            Self::DocumentRemoved => "document_removed",
            Self::PackSubmitted => "pack_submitted",
            Self::PackApproved => "pack_approved",
            Self::PackRejected => "pack_rejected",
            Self::AttributionRecorded => "attribution_recorded",
            Self::SettlementCreated => "settlement_created",
        }
    }
}

/// Who performed the operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditActor {
    System,
    User { user_id: String, role: Role },
}

impl From<&Actor> for AuditActor {
    fn from(actor: &Actor) -> Self {
        Self::User {
            user_id: actor.user_id.clone(),
            role: actor.role,
        }
    }
}

impl AuditEntry {
    pub fn new(
        entity: AuditEntity,
        entity_id: impl Into<String>,
        operation: AuditOperation,
        actor: AuditActor,
        details: serde_json::Value,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            entity,
            operation,
            actor,
            details,
            timestamp,
        }
    }
}

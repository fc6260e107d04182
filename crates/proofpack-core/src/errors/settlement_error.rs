use uuid::Uuid;

/// Attribution and settlement errors.
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    #[error("event {event_id} already settled in {settlement_id}")]
    AlreadySettled { event_id: String, settlement_id: Uuid },

    #[error("event {event_id} appears in more than one settlement")]
    DuplicateEvent { event_id: String },

    #[error("invalid attribution event {event_id}: {reason}")]
    InvalidEvent { event_id: String, reason: String },

    #[error("invalid settlement period: {start} is not before {end}")]
    InvalidPeriod { start: String, end: String },

    #[error("settlement batch rejected: {reason}")]
    BatchRejected { reason: String },
}

impl SettlementError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::AlreadySettled { .. } | Self::DuplicateEvent { .. } => 409,
            Self::BatchRejected { .. } => 409,
            Self::InvalidEvent { .. } | Self::InvalidPeriod { .. } => 400,
        }
    }
}

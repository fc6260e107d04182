use super::{ConfigError, PackError, SettlementError, StorageError};

/// Top-level error for every Proofpack operation.
///
/// Each variant maps onto one HTTP status via [`ProofpackError::status_code`],
/// so route handlers in the host application can return early with a JSON
/// error body.
#[derive(Debug, thiserror::Error)]
pub enum ProofpackError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("pack error: {0}")]
    PackError(#[from] PackError),

    #[error("settlement error: {0}")]
    SettlementError(#[from] SettlementError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ProofpackError {
    pub fn not_found(entity: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// HTTP status a route handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Forbidden { .. } => 403,
            Self::InvalidRequest { .. } => 400,
            Self::PackError(e) => e.status_code(),
            Self::SettlementError(e) => e.status_code(),
            Self::SerializationError(_) => 400,
            Self::StorageError(_) | Self::ConfigError(_) => 500,
        }
    }
}

pub type ProofpackResult<T> = Result<T, ProofpackError>;

use crate::models::PackStatus;

/// Proof Pack lifecycle and document-set errors.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: PackStatus, to: PackStatus },

    #[error("pack is not eligible: score {score:.1} below threshold {threshold:.1}")]
    NotEligible { score: f64, threshold: f64 },

    #[error("pack is locked while {status}")]
    Locked { status: PackStatus },

    #[error("document {document_id} already exists in pack {pack_id}")]
    DuplicateDocument { pack_id: String, document_id: String },

    #[error("document {document_id} does not belong to pack {pack_id}")]
    ForeignDocument { pack_id: String, document_id: String },
}

impl PackError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } | Self::Locked { .. } => 409,
            Self::DuplicateDocument { .. } => 409,
            Self::NotEligible { .. } | Self::ForeignDocument { .. } => 400,
        }
    }
}

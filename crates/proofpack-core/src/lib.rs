//! # proofpack-core
//!
//! Foundation crate for Proof Pack health scoring and partner revenue settlement.
//! Defines all types, traits, errors, config, constants, and the access policy.
//! Every other crate in the workspace depends on this.

pub mod access;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use access::{authorize, Action};
pub use config::ProofpackConfig;
pub use errors::{ProofpackError, ProofpackResult};
pub use models::{
    Actor, AttributionEvent, Document, DocumentCategory, Gap, PackHealth, PackStatus, ProofPack,
    Role, Settlement,
};

mod config_error;
mod pack_error;
mod proofpack_error;
mod settlement_error;
mod storage_error;

pub use config_error::ConfigError;
pub use pack_error::PackError;
pub use proofpack_error::{ProofpackError, ProofpackResult};
pub use settlement_error::SettlementError;
pub use storage_error::StorageError;

//! ProofpackRuntime: owns storage, the pack workflow, and the settlement engine.
//!
//! The runtime is a singleton stored behind `OnceLock`. It's initialized once
//! via `initialize()` and accessed via `get()` for the lifetime of the process.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use proofpack_core::config::ProofpackConfig;
use proofpack_core::errors::ProofpackResult;
use proofpack_health::{HealthEngine, PackWorkflow};
use proofpack_settlement::SettlementEngine;
use proofpack_storage::StorageEngine;

use crate::conversions::error_types;

/// Global singleton.
static RUNTIME: OnceLock<Arc<ProofpackRuntime>> = OnceLock::new();

/// The central runtime. Every engine is `Sync`; storage serializes its own
/// access behind a connection mutex.
pub struct ProofpackRuntime {
    pub storage: StorageEngine,
    pub workflow: PackWorkflow,
    pub settlement: SettlementEngine,
    pub config: ProofpackConfig,
}

/// Options for initializing the runtime.
#[derive(Default)]
pub struct RuntimeOptions {
    /// Path to the SQLite database. If None, uses in-memory.
    pub db_path: Option<PathBuf>,
    /// TOML configuration string. If None, uses defaults.
    pub config_toml: Option<String>,
}

impl ProofpackRuntime {
    fn new(opts: RuntimeOptions) -> ProofpackResult<Self> {
        let config = match &opts.config_toml {
            Some(toml_str) => ProofpackConfig::from_toml(toml_str)?,
            None => ProofpackConfig::default(),
        };
        config.validate()?;

        // The host may already own a subscriber; that one wins.
        if !proofpack_observability::init_tracing(&config.observability) {
            tracing::debug!("tracing subscriber already installed");
        }

        let storage = match &opts.db_path {
            Some(path) => StorageEngine::open_with_timeout(path, config.storage.busy_timeout_ms)?,
            None => StorageEngine::open_in_memory()?,
        };
        let workflow = PackWorkflow::new(HealthEngine::new(config.health.clone()));
        let settlement = SettlementEngine::new(config.settlement.clone());

        tracing::info!(
            persistent = opts.db_path.is_some(),
            fee_percentage = %config.settlement.platform_fee_percentage,
            "proofpack runtime initialized"
        );
        Ok(Self {
            storage,
            workflow,
            settlement,
            config,
        })
    }
}

/// Initialize the global ProofpackRuntime singleton.
///
/// Returns an error if already initialized or if initialization fails.
pub fn initialize(opts: RuntimeOptions) -> napi::Result<()> {
    if is_initialized() {
        return Err(error_types::already_initialized());
    }
    let runtime = ProofpackRuntime::new(opts).map_err(error_types::to_napi_error)?;
    RUNTIME
        .set(Arc::new(runtime))
        .map_err(|_| error_types::already_initialized())
}

/// Get a reference to the global ProofpackRuntime.
///
/// Returns an error if not yet initialized.
pub fn get() -> napi::Result<Arc<ProofpackRuntime>> {
    RUNTIME
        .get()
        .cloned()
        .ok_or_else(error_types::runtime_not_initialized)
}

/// Check if the runtime has been initialized.
pub fn is_initialized() -> bool {
    RUNTIME.get().is_some()
}

/// The runtime's config when initialized, defaults otherwise. Lets the pure
/// scoring bindings run without a runtime.
pub fn config_or_default() -> ProofpackConfig {
    RUNTIME
        .get()
        .map(|rt| rt.config.clone())
        .unwrap_or_default()
}

pub mod defaults;
mod health_config;
mod observability_config;
mod settlement_config;
mod storage_config;

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use health_config::{HealthConfig, QualityConfig, ScoreWeights};
pub use observability_config::ObservabilityConfig;
pub use settlement_config::SettlementConfig;
pub use storage_config::StorageConfig;

use crate::errors::ConfigError;

/// Root configuration. Every section falls back to its defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofpackConfig {
    pub health: HealthConfig,
    pub settlement: SettlementConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl ProofpackConfig {
    /// Parse from a TOML string. Missing keys take their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    /// Reject values the engines cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let health = &self.health;
        if health.required_categories.is_empty() {
            return Err(invalid(
                "health.required_categories",
                "at least one category is required",
            ));
        }
        if !(0..=defaults::MAX_EXPIRATION_WARNING_DAYS).contains(&health.expiration_warning_days) {
            return Err(invalid(
                "health.expiration_warning_days",
                "must be between 0 and 3650",
            ));
        }
        if !health.weights.is_usable() {
            return Err(invalid(
                "health.weights",
                "weights must be finite, non-negative, and sum to more than zero",
            ));
        }

        let fee = self.settlement.platform_fee_percentage;
        if fee < Decimal::ZERO || fee > Decimal::ONE_HUNDRED {
            return Err(invalid(
                "settlement.platform_fee_percentage",
                "must be between 0 and 100",
            ));
        }
        if self.settlement.currency.trim().is_empty() {
            return Err(invalid("settlement.currency", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::defaults;

/// Partner settlement configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Platform fee as a percentage (0–100) of gross attributed revenue.
    pub platform_fee_percentage: Decimal,
    /// ISO currency code stamped on settlements.
    pub currency: String,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            platform_fee_percentage: Decimal::from(defaults::DEFAULT_PLATFORM_FEE_PERCENTAGE),
            currency: defaults::DEFAULT_CURRENCY.to_string(),
        }
    }
}

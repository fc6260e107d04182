// Single source of truth for all default values.

// --- Health ---
pub const DEFAULT_REQUIRED_CATEGORIES: &[&str] = &[
    "insurance",
    "license",
    "certification",
    "tax_compliance",
    "past_performance",
];
pub const DEFAULT_EXPIRATION_WARNING_DAYS: i64 = 30;
pub const MAX_EXPIRATION_WARNING_DAYS: i64 = 3_650; // 10 years
pub const DEFAULT_COMPLETENESS_WEIGHT: f64 = 0.5;
pub const DEFAULT_EXPIRATION_WEIGHT: f64 = 0.3;
pub const DEFAULT_QUALITY_WEIGHT: f64 = 0.2;
pub const DEFAULT_QUALITY_REQUIRE_NOTES: bool = true;
pub const DEFAULT_QUALITY_REQUIRE_TITLE: bool = true;
pub const DEFAULT_QUALITY_MIN_FILE_SIZE_BYTES: u64 = 1_024; // 1 KB

// --- Settlement ---
pub const DEFAULT_PLATFORM_FEE_PERCENTAGE: i64 = 20;
pub const DEFAULT_CURRENCY: &str = "USD";

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "proofpack.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;

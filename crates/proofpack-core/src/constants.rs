/// Proofpack library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum overall Pack Health score for introductions, sharing, and submission.
/// Fixed platform rule, not part of the scoring config.
pub const ELIGIBILITY_THRESHOLD: f64 = 70.0;

/// Upper bound of every health score.
pub const MAX_SCORE: f64 = 100.0;

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Largest page a store will return.
pub const MAX_PAGE_LIMIT: usize = 500;

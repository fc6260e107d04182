//! ProofpackError → napi::Error conversion with structured `[ERROR_CODE] message` strings.
//!
//! The TS client parses the code from the message and maps it back onto the
//! HTTP status it answers with.

use napi::Status;
use proofpack_core::errors::ProofpackError;

// Lifecycle
pub const ALREADY_INITIALIZED: &str = "ALREADY_INITIALIZED";
pub const RUNTIME_NOT_INITIALIZED: &str = "RUNTIME_NOT_INITIALIZED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

// Request
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const FORBIDDEN: &str = "FORBIDDEN";
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
pub const CONFLICT: &str = "CONFLICT";

// Internal
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Stable code for a `ProofpackError`, one per HTTP status class.
pub fn error_code(err: &ProofpackError) -> &'static str {
    match err {
        ProofpackError::NotFound { .. } => NOT_FOUND,
        ProofpackError::Forbidden { .. } => FORBIDDEN,
        ProofpackError::StorageError(_) => STORAGE_ERROR,
        ProofpackError::ConfigError(_) => CONFIG_ERROR,
        other => match other.status_code() {
            409 => CONFLICT,
            _ => INVALID_REQUEST,
        },
    }
}

/// Convert a `ProofpackError` to a structured NAPI error.
///
/// Output format: `[ERROR_CODE] Human-readable message`
pub fn to_napi_error(err: ProofpackError) -> napi::Error {
    let code = error_code(&err);
    let status = if code == INVALID_REQUEST {
        Status::InvalidArg
    } else {
        Status::GenericFailure
    };
    napi::Error::new(status, format!("[{code}] {err}"))
}

pub fn runtime_not_initialized() -> napi::Error {
    napi::Error::new(
        Status::GenericFailure,
        format!(
            "[{RUNTIME_NOT_INITIALIZED}] ProofpackRuntime not initialized. Call proofpackInitialize() first."
        ),
    )
}

pub fn already_initialized() -> napi::Error {
    napi::Error::new(
        Status::GenericFailure,
        format!("[{ALREADY_INITIALIZED}] ProofpackRuntime already initialized"),
    )
}

/// A malformed argument coming from JS.
pub fn invalid_argument(msg: impl std::fmt::Display) -> napi::Error {
    napi::Error::new(Status::InvalidArg, format!("[{INVALID_REQUEST}] {msg}"))
}

pub fn internal_error(msg: impl std::fmt::Display) -> napi::Error {
    napi::Error::new(Status::GenericFailure, format!("[{INTERNAL_ERROR}] {msg}"))
}

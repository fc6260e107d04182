//! # proofpack-observability
//!
//! Structured tracing for the Proofpack engines: subscriber setup driven by
//! `ObservabilityConfig`, span macros per operation, and named log events
//! with stable field names.

pub mod tracing_setup;

pub use tracing_setup::{events, init_tracing, init_tracing_with_filter};

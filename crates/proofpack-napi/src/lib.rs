//! # proofpack-napi
//!
//! NAPI bindings for TypeScript interop.
//! Owns the `ProofpackRuntime` singleton (storage, pack workflow, settlement
//! engine, and the loaded config).
//!
//! ## Architecture
//!
//! - `runtime.rs`: Global `ProofpackRuntime` singleton
//! - `bindings/`: NAPI functions grouped by domain
//! - `conversions/`: Rust ↔ JS type conversions via serde_json

pub mod bindings;
pub mod conversions;
pub mod runtime;

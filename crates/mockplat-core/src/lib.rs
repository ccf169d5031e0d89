#![forbid(unsafe_code)]
//! mockplat-core: the vocabulary shared by every mockplat crate.
//!
//! - strongly-typed ids and the shared [`IdGenerator`](id::IdGenerator)
//! - channel descriptors (nodes of the conversion graph)
//! - the logical-operator surface the optimizer hands us (`plan`)
//! - cost-model value types and linear converters (`cost`)
//! - configuration, errors, stable hashing, and the harness manifest
//!
//! No platforms, operators, or randomness live here.

pub mod channel;
pub mod config;
pub mod cost;
pub mod error;
pub mod hash;
pub mod id;
pub mod manifest;
pub mod plan;
pub mod prelude;

/// Version string recorded in harness manifests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

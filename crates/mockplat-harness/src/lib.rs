#![forbid(unsafe_code)]
//! mockplat-harness: builds the whole synthetic environment in one call.
//!
//! `Harness` creates the platforms from a shared id counter, maps every
//! catalog operator onto every platform, and densifies the conversion graph.
//! The result is registered with the optimizer through `Plugin`.

pub mod dsl;
pub mod fingerprint;
pub mod harness;
pub mod metrics;

pub use dsl::{parse_yaml_harness, CatalogDoc, HarnessDoc, OperatorSpec};
pub use harness::Harness;

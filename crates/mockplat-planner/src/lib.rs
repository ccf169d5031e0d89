#![forbid(unsafe_code)]
//! mockplat-planner: everything the optimizer consumes besides platforms.
//!
//! Design:
//! - `mapping`: singleton rewrite rules that replace one template operator by
//!   a synthetic operator on a target platform.
//! - `conversion`: lazily-instantiated conversion edges, plus the five
//!   deterministic edges every platform contributes.
//! - `graph`: densification of the conversion graph with random
//!   cross-platform edges up to a requested density.
//! - `plugin`: the contract through which all of it is registered.

pub mod conversion;
pub mod graph;
pub mod mapping;
pub mod plugin;

pub use conversion::{default_conversions, ChannelConversion, ConversionOrigin};
pub use graph::{build_conversion_graph, plan_density, ConversionGraph, DensityPlan};
pub use mapping::{build_mapping, build_mappings_for_platform, Mapping, OperatorPattern};
pub use plugin::Plugin;

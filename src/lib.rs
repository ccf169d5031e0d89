#![forbid(unsafe_code)]
//! mockplat: synthetic platforms, operator substitutes, and density-controlled
//! conversion graphs for exercising a cross-platform optimizer.
//!
//! The member crates do the work; this crate re-exports them under one name.

pub use mockplat_core as core;
pub use mockplat_harness as harness;
pub use mockplat_operators as operators;
pub use mockplat_planner as planner;
pub use mockplat_platform as platform;

pub use mockplat_harness::Harness;

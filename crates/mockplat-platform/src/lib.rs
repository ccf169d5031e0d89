#![forbid(unsafe_code)]
//! mockplat-platform: platforms that advertise channel kinds and cost models
//! but cannot execute anything.
//!
//! Each [`SyntheticPlatform`] owns three channel kinds (non-reusable,
//! reusable, broadcast) whose ids come from a caller-supplied
//! [`IdGenerator`](mockplat_core::id::IdGenerator), plus converter factories
//! that read namespaced properties with documented defaults.

pub mod converters;
pub mod platform;
pub mod traits;

pub use converters::CostSettings;
pub use platform::SyntheticPlatform;
pub use traits::{Executor, ExecutorFactory, Platform};

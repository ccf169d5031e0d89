#![forbid(unsafe_code)]
//! mockplat-operators: platform-bound stand-ins for logical operators.
//!
//! Design intent:
//! - A [`SyntheticOperator`] mirrors the slot topology of a logical operator
//!   (or is built from raw slot counts to represent a channel conversion).
//! - Plain and loop-head operators are one type with a tagged shape, chosen
//!   once at construction.
//! - Nothing here can run: `create_instance` always fails.

pub mod catalog;
pub mod substitution;
pub mod synthetic;
pub mod traits;

pub use catalog::default_catalog;
pub use substitution::wrap;
pub use synthetic::{LoopHeadSlots, SyntheticOperator, SyntheticShape};
pub use traits::{ExecutionOperator, RunnableOperator};

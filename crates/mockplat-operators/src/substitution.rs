//! Operator substitution: replace any logical operator by a synthetic one.

use std::sync::Arc;

use mockplat_core::prelude::{LogicalOperator, Result};
use mockplat_platform::SyntheticPlatform;

use crate::synthetic::SyntheticOperator;

/// Build the synthetic stand-in for `source` on `platform`, keeping its slot
/// topology (and loop roles, for loop heads).
pub fn wrap(source: &LogicalOperator, platform: Arc<SyntheticPlatform>) -> Result<SyntheticOperator> {
    if source.is_loop_head() {
        SyntheticOperator::imitate_loop_head(source, platform)
    } else {
        Ok(SyntheticOperator::imitate(source, platform))
    }
}

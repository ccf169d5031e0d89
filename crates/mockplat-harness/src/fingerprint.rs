//! Fingerprints of the deterministic parts of a harness.
//!
//! Random conversions are left out, so equal inputs give equal fingerprints
//! regardless of the densification seed.

use std::sync::Arc;

use mockplat_core::hash::{hash_serde, Hash256};
use mockplat_core::prelude::{ChannelDescriptor, Result};
use mockplat_planner::{ChannelConversion, ConversionOrigin, Mapping};
use mockplat_platform::{Platform, SyntheticPlatform};
use serde::Serialize;

#[derive(Serialize)]
struct PlatformRecord<'a> {
    number: usize,
    name: &'a str,
    config_name: &'a str,
    inputs: &'a [ChannelDescriptor],
    broadcasts: &'a [ChannelDescriptor],
    outputs: &'a [ChannelDescriptor],
}

#[derive(Serialize)]
struct MappingRecord<'a> {
    template: u64,
    kind: &'a str,
    platform: usize,
}

pub fn hash_platforms(platforms: &[Arc<SyntheticPlatform>]) -> Result<Hash256> {
    let records: Vec<_> = platforms
        .iter()
        .map(|p| PlatformRecord {
            number: p.number(),
            name: p.name(),
            config_name: p.configuration_name(),
            inputs: p.input_channels(),
            broadcasts: p.broadcast_channels(),
            outputs: p.output_channels(),
        })
        .collect();
    hash_serde(&records)
}

pub fn hash_mappings(mappings: &[Mapping]) -> Result<Hash256> {
    let records: Vec<_> = mappings
        .iter()
        .map(|m| MappingRecord {
            template: m.pattern().template_id().get(),
            kind: m.template_kind(),
            platform: m.target_platform().number(),
        })
        .collect();
    hash_serde(&records)
}

/// Hash the default conversions among `conversions`; random ones are skipped.
pub fn hash_default_conversions(conversions: &[ChannelConversion]) -> Result<Hash256> {
    let pairs: Vec<_> = conversions
        .iter()
        .filter(|c| c.origin() == ConversionOrigin::Default)
        .map(ChannelConversion::pair)
        .collect();
    hash_serde(&pairs)
}

pub fn fingerprint(
    platforms: &[Arc<SyntheticPlatform>],
    mappings: &[Mapping],
    conversions: &[ChannelConversion],
) -> Result<Hash256> {
    let p = hash_platforms(platforms)?;
    let m = hash_mappings(mappings)?;
    let c = hash_default_conversions(conversions)?;
    Ok(p.xor(m).xor(c))
}

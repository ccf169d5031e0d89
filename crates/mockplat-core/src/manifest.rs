//! Summary of one built harness, for logs, CLIs, and comparisons.
//!
//! `fingerprint` only covers the deterministic parts of a harness (platform
//! channels, mappings, default conversions). Two harnesses built from the
//! same inputs share a fingerprint even when their random conversions differ.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::hash::Hash256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestId(pub Uuid);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessManifest {
    pub id: ManifestId,

    /// Digest of platforms, mappings, and default conversions.
    pub fingerprint: Hash256,

    /// Engine version string for provenance.
    pub engine_version: String,

    pub num_platforms: usize,
    pub num_mappings: usize,
    pub num_channels: usize,
    pub num_default_conversions: usize,
    pub num_random_conversions: usize,

    pub requested_density: f64,
    pub achieved_density: f64,

    /// Seed used for densification, when one was configured.
    pub seed: Option<u64>,
}

impl HarnessManifest {
    pub fn new(fingerprint: Hash256, num_platforms: usize) -> Self {
        Self {
            id: ManifestId(Uuid::new_v4()),
            fingerprint,
            engine_version: crate::VERSION.to_string(),
            num_platforms,
            num_mappings: 0,
            num_channels: 0,
            num_default_conversions: 0,
            num_random_conversions: 0,
            requested_density: 0.0,
            achieved_density: 0.0,
            seed: None,
        }
    }

    pub fn num_conversions(&self) -> usize {
        self.num_default_conversions + self.num_random_conversions
    }
}

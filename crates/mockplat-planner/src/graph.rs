//! Conversion graph densification.
//!
//! The deterministic edges give every platform the same local topology. To
//! reach a requested density, random cross-platform edges are sampled on top:
//! density is the share of all ordered pairs among the channel kinds of every
//! platform plus the external kind, self-pairs excluded.

use std::collections::HashSet;
use std::sync::Arc;

use mockplat_core::prelude::{ChannelDescriptor, Error, Result};
use mockplat_platform::SyntheticPlatform;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::conversion::{
    default_conversions, pinned_factory, ChannelConversion, ConversionOrigin,
    DEFAULT_CONVERSIONS_PER_PLATFORM,
};

/// Channel kinds per platform.
const KINDS_PER_PLATFORM: usize = 3;

/// Counts derived from `(num_platforms, density)` before anything is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityPlan {
    pub total_channels: usize,
    pub target_count: usize,
    pub deterministic_count: usize,
    pub random_count: usize,
    /// Distinct directed pairs whose ends live on different platforms.
    pub pair_space: usize,
}

impl DensityPlan {
    pub fn ordered_pairs(&self) -> usize {
        self.total_channels * self.total_channels.saturating_sub(1)
    }
}

fn check_density(density: f64) -> Result<()> {
    if !density.is_finite() || !(0.0..=1.0).contains(&density) {
        return Err(Error::Config(format!(
            "density must be within [0, 1], got {density}"
        )));
    }
    Ok(())
}

/// Work out how many random conversions `density` needs over `num_platforms`
/// platforms, failing when the cross-platform pairs cannot supply them.
pub fn plan_density(num_platforms: usize, density: f64) -> Result<DensityPlan> {
    if num_platforms == 0 {
        return Err(Error::Config("at least one platform is required".into()));
    }
    check_density(density)?;

    let total_channels = 1 + KINDS_PER_PLATFORM * num_platforms;
    let ordered = (total_channels * (total_channels - 1)) as f64;
    let target_count = (ordered * density).round() as usize;
    let deterministic_count = DEFAULT_CONVERSIONS_PER_PLATFORM * num_platforms;
    let random_count = target_count.saturating_sub(deterministic_count);
    let pair_space = KINDS_PER_PLATFORM * KINDS_PER_PLATFORM * num_platforms * (num_platforms - 1);

    if random_count > pair_space {
        return Err(Error::DensityUnsatisfiable {
            requested: random_count,
            available: pair_space,
        });
    }

    Ok(DensityPlan {
        total_channels,
        target_count,
        deterministic_count,
        random_count,
        pair_space,
    })
}

fn owner(platforms: &[Arc<SyntheticPlatform>], channel: &ChannelDescriptor) -> Option<usize> {
    platforms.iter().position(|p| p.owns(channel))
}

/// Sample `count` new directed pairs between channels of distinct platforms.
///
/// `seen` holds every pair produced so far and is extended with each accepted
/// pair. Rejected duplicates are resampled, so the call refuses up front when
/// fewer than `count` unseen cross-platform pairs remain.
pub fn sample_random_conversions<R: Rng + ?Sized>(
    platforms: &[Arc<SyntheticPlatform>],
    seen: &mut HashSet<(ChannelDescriptor, ChannelDescriptor)>,
    count: usize,
    rng: &mut R,
) -> Result<Vec<ChannelConversion>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let n = platforms.len();
    let pair_space = KINDS_PER_PLATFORM * KINDS_PER_PLATFORM * n * n.saturating_sub(1);
    let taken = seen
        .iter()
        .filter(|(a, b)| match (owner(platforms, a), owner(platforms, b)) {
            (Some(pa), Some(pb)) => pa != pb,
            _ => false,
        })
        .count();
    let available = pair_space.saturating_sub(taken);
    if count > available {
        return Err(Error::DensityUnsatisfiable {
            requested: count,
            available,
        });
    }

    let mut sampled = Vec::with_capacity(count);
    while sampled.len() < count {
        let p1 = rng.gen_range(0..n);
        let mut p2 = rng.gen_range(0..n);
        while p2 == p1 {
            p2 = rng.gen_range(0..n);
        }
        let from = platforms[p1].channels();
        let to = platforms[p2].channels();
        let channel_a = from[rng.gen_range(0..from.len())];
        let channel_b = to[rng.gen_range(0..to.len())];
        if !seen.insert((channel_a, channel_b)) {
            continue;
        }

        let host = &platforms[rng.gen_range(0..n)];
        trace!(
            source = %channel_a,
            target = %channel_b,
            host = host.number(),
            "sampled random conversion"
        );
        sampled.push(ChannelConversion::new(
            channel_a,
            channel_b,
            ConversionOrigin::Random,
            pinned_factory(host, channel_b, "Random conversion"),
        ));
    }
    Ok(sampled)
}

/// The assembled conversion graph: deterministic edges first (platform by
/// platform), then random edges in sampling order.
#[derive(Debug, Clone)]
pub struct ConversionGraph {
    conversions: Vec<ChannelConversion>,
    plan: DensityPlan,
    num_default: usize,
}

impl ConversionGraph {
    pub fn conversions(&self) -> &[ChannelConversion] {
        &self.conversions
    }

    pub fn plan(&self) -> &DensityPlan {
        &self.plan
    }

    pub fn num_channels(&self) -> usize {
        self.plan.total_channels
    }

    pub fn num_default(&self) -> usize {
        self.num_default
    }

    pub fn num_random(&self) -> usize {
        self.conversions.len() - self.num_default
    }

    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }

    /// Achieved density over all ordered pairs of channel kinds.
    pub fn density(&self) -> f64 {
        match self.plan.ordered_pairs() {
            0 => 0.0,
            pairs => self.conversions.len() as f64 / pairs as f64,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChannelConversion> {
        self.conversions.iter()
    }
}

/// Build the full graph for `platforms` at `density`.
///
/// Deterministic edges are never dropped, so a density below `5N` edges still
/// yields all of them.
pub fn build_conversion_graph<R: Rng + ?Sized>(
    platforms: &[Arc<SyntheticPlatform>],
    external: ChannelDescriptor,
    density: f64,
    rng: &mut R,
) -> Result<ConversionGraph> {
    let plan = plan_density(platforms.len(), density)?;

    let mut conversions: Vec<ChannelConversion> = platforms
        .iter()
        .flat_map(|p| default_conversions(p, external))
        .collect();
    let num_default = conversions.len();
    let mut seen: HashSet<_> = conversions.iter().map(ChannelConversion::pair).collect();

    info!(
        channels = plan.total_channels,
        conversions = num_default,
        density = num_default as f64 / plan.ordered_pairs().max(1) as f64,
        "{} channels and {} default conversions",
        plan.total_channels,
        num_default
    );

    if plan.random_count > 0 {
        info!("adding {} random conversions", plan.random_count);
        let random = sample_random_conversions(platforms, &mut seen, plan.random_count, rng)?;
        conversions.extend(random);
    }

    Ok(ConversionGraph {
        conversions,
        plan,
        num_default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockplat_core::prelude::IdGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn platforms(n: usize) -> Vec<Arc<SyntheticPlatform>> {
        let ids = IdGenerator::new();
        (0..n)
            .map(|i| Arc::new(SyntheticPlatform::new(i, Some(&ids))))
            .collect()
    }

    #[test]
    fn plan_counts() {
        let plan = plan_density(5, 0.1).unwrap();
        assert_eq!(plan.total_channels, 16);
        assert_eq!(plan.target_count, 24);
        assert_eq!(plan.deterministic_count, 25);
        assert_eq!(plan.random_count, 0);
        assert_eq!(plan.pair_space, 180);

        let plan = plan_density(2, 28.0 / 42.0).unwrap();
        assert_eq!(plan.target_count, 28);
        assert_eq!(plan.random_count, 18);
    }

    #[test]
    fn plan_rejects_bad_inputs() {
        assert!(matches!(plan_density(0, 0.1), Err(Error::Config(_))));
        assert!(matches!(plan_density(3, -0.1), Err(Error::Config(_))));
        assert!(matches!(plan_density(3, f64::NAN), Err(Error::Config(_))));
        assert!(matches!(
            plan_density(2, 1.0),
            Err(Error::DensityUnsatisfiable {
                requested: 32,
                available: 18
            })
        ));
        assert!(matches!(
            plan_density(1, 0.5),
            Err(Error::DensityUnsatisfiable { available: 0, .. })
        ));
    }

    #[test]
    fn same_seed_same_graph() {
        let ps = platforms(4);
        let ext = ChannelDescriptor::OBJECT_FILE;
        let a = build_conversion_graph(&ps, ext, 0.3, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = build_conversion_graph(&ps, ext, 0.3, &mut StdRng::seed_from_u64(9)).unwrap();
        let pairs = |g: &ConversionGraph| g.iter().map(ChannelConversion::pair).collect::<Vec<_>>();
        assert_eq!(pairs(&a), pairs(&b));
        assert!(a.num_random() > 0);
    }

    #[test]
    fn sampler_refuses_exhausted_space() {
        let ps = platforms(2);
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::new();
        let all = sample_random_conversions(&ps, &mut seen, 18, &mut rng).unwrap();
        assert_eq!(all.len(), 18);
        assert!(matches!(
            sample_random_conversions(&ps, &mut seen, 1, &mut rng),
            Err(Error::DensityUnsatisfiable {
                requested: 1,
                available: 0
            })
        ));
    }
}

//! One-call assembly of the synthetic environment.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use mockplat_core::prelude::{
    CatalogChoice, ChannelDescriptor, Configuration, HarnessConfig, HarnessManifest, IdGenerator,
    LogicalOperator, Result,
};
use mockplat_operators::default_catalog;
use mockplat_planner::{
    build_conversion_graph, build_mappings_for_platform, ChannelConversion, ConversionGraph,
    Mapping, Plugin,
};
use mockplat_platform::{Platform, SyntheticPlatform};

use crate::fingerprint::fingerprint;
use crate::metrics::emit_span;

/// Synthetic platforms plus everything the optimizer needs to plan on them.
///
/// Immutable once built.
#[derive(Debug)]
pub struct Harness {
    config: HarnessConfig,
    platforms: Vec<Arc<SyntheticPlatform>>,
    catalog: Vec<Arc<LogicalOperator>>,
    mappings: Vec<Mapping>,
    graph: ConversionGraph,
    properties: Configuration,
    manifest: HarnessManifest,
}

/// `catalog` wins; otherwise `choice` picks the built-in catalog or nothing.
fn resolve_catalog(
    choice: CatalogChoice,
    catalog: Option<Vec<LogicalOperator>>,
) -> Vec<Arc<LogicalOperator>> {
    let ops = match (catalog, choice) {
        (Some(ops), _) => ops,
        (None, CatalogChoice::Default) => default_catalog(&IdGenerator::new()),
        (None, CatalogChoice::Omitted) => Vec::new(),
    };
    ops.into_iter().map(Arc::new).collect()
}

impl Harness {
    /// Build a harness, seeding densification from `cfg.seed` when present.
    pub fn new(cfg: &HarnessConfig, catalog: Option<Vec<LogicalOperator>>) -> Result<Self> {
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(cfg, catalog, &mut rng)
    }

    /// Build a harness around a caller-supplied random source.
    ///
    /// Mappings match the harness's own template objects (see
    /// [`Harness::catalog`]), never operators that merely share an id.
    pub fn with_rng<R: Rng + ?Sized>(
        cfg: &HarnessConfig,
        catalog: Option<Vec<LogicalOperator>>,
        rng: &mut R,
    ) -> Result<Self> {
        cfg.validate()?;

        let ids = IdGenerator::new();
        let platforms: Vec<Arc<SyntheticPlatform>> = (0..cfg.num_platforms)
            .map(|number| Arc::new(SyntheticPlatform::new(number, Some(&ids))))
            .collect();
        info!("added {} synthetic platforms", platforms.len());

        let catalog = resolve_catalog(cfg.catalog, catalog);
        let mut mappings = Vec::with_capacity(catalog.len() * platforms.len());
        for platform in &platforms {
            mappings.extend(build_mappings_for_platform(&catalog, platform));
        }
        info!(
            "added {} mappings per synthetic platform ({} in total)",
            catalog.len(),
            mappings.len()
        );

        let graph = build_conversion_graph(&platforms, ChannelDescriptor::OBJECT_FILE, cfg.density, rng)?;
        info!(
            channels = graph.num_channels(),
            conversions = graph.len(),
            random = graph.num_random(),
            "conversion graph density is {:.3}",
            graph.density()
        );

        let mut manifest = HarnessManifest::new(
            fingerprint(&platforms, &mappings, graph.conversions())?,
            platforms.len(),
        );
        manifest.num_mappings = mappings.len();
        manifest.num_channels = graph.num_channels();
        manifest.num_default_conversions = graph.num_default();
        manifest.num_random_conversions = graph.num_random();
        manifest.requested_density = cfg.density;
        manifest.achieved_density = graph.density();
        manifest.seed = cfg.seed;

        emit_span(
            "harness.built",
            &[
                ("platforms", manifest.num_platforms.to_string()),
                ("mappings", manifest.num_mappings.to_string()),
                ("conversions", manifest.num_conversions().to_string()),
                ("density", format!("{:.4}", manifest.achieved_density)),
            ],
        );

        Ok(Self {
            config: cfg.clone(),
            platforms,
            catalog,
            mappings,
            graph,
            properties: Configuration::new(),
            manifest,
        })
    }

    /// Extra properties handed to the optimizer by `set_properties`.
    pub fn with_properties(mut self, properties: Configuration) -> Self {
        self.properties = properties;
        self
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn platforms(&self) -> &[Arc<SyntheticPlatform>] {
        &self.platforms
    }

    /// Template operators the mappings were built from, in catalog order.
    pub fn catalog(&self) -> &[Arc<LogicalOperator>] {
        &self.catalog
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    pub fn conversions(&self) -> &[ChannelConversion] {
        self.graph.conversions()
    }

    pub fn graph(&self) -> &ConversionGraph {
        &self.graph
    }

    pub fn properties(&self) -> &Configuration {
        &self.properties
    }

    pub fn manifest(&self) -> &HarnessManifest {
        &self.manifest
    }
}

impl Plugin for Harness {
    fn required_platforms(&self) -> Vec<Arc<dyn Platform>> {
        self.platforms
            .iter()
            .map(|p| Arc::clone(p) as Arc<dyn Platform>)
            .collect()
    }

    fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    fn channel_conversions(&self) -> &[ChannelConversion] {
        self.graph.conversions()
    }

    fn set_properties(&self, configuration: &mut Configuration) {
        for platform in &self.platforms {
            platform.configure_defaults(configuration);
        }
        for (key, value) in self.properties.iter() {
            configuration.set_property(key, value);
        }
    }
}

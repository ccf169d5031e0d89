//! Harness configuration and the optimizer's property store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Prefix for every property key a synthetic platform reads.
pub const PROPERTY_PREFIX: &str = "mockplat";

/// Which logical operators to build mappings for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogChoice {
    /// The built-in representative operator catalog.
    #[default]
    Default,
    /// No mappings; only platforms and conversions.
    #[serde(rename = "none")]
    Omitted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Number of synthetic platforms to create (>= 1).
    pub num_platforms: usize,

    /// Requested conversion-graph density in [0, 1].
    pub density: f64,

    /// Optional seed for deterministic densification.
    pub seed: Option<u64>,

    /// Operator catalog used to generate mappings.
    pub catalog: CatalogChoice,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            num_platforms: 5,
            density: 0.1,
            seed: None,
            catalog: CatalogChoice::Default,
        }
    }
}

impl HarnessConfig {
    pub fn new(num_platforms: usize, density: f64) -> Self {
        Self {
            num_platforms,
            density,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `MOCKPLAT_NUM_PLATFORMS`: number of platforms
    /// - `MOCKPLAT_DENSITY`: conversion-graph density
    /// - `MOCKPLAT_SEED`: random seed
    /// - `MOCKPLAT_CATALOG`: `default` or `none`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("MOCKPLAT_NUM_PLATFORMS") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.num_platforms = v;
            }
        }

        if let Ok(s) = std::env::var("MOCKPLAT_DENSITY") {
            if let Ok(v) = s.parse::<f64>() {
                cfg.density = v;
            }
        }

        if let Ok(s) = std::env::var("MOCKPLAT_SEED") {
            if let Ok(v) = s.parse::<u64>() {
                cfg.seed = Some(v);
            }
        }

        if let Ok(s) = std::env::var("MOCKPLAT_CATALOG") {
            match s.trim() {
                "default" => cfg.catalog = CatalogChoice::Default,
                "none" => cfg.catalog = CatalogChoice::Omitted,
                _ => {}
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_platforms == 0 {
            return Err(Error::Config("num_platforms must be at least 1".into()));
        }
        if !self.density.is_finite() || !(0.0..=1.0).contains(&self.density) {
            return Err(Error::Config(format!(
                "density must be within [0, 1], got {}",
                self.density
            )));
        }
        Ok(())
    }
}

/// Build the property key `mockplat.<config_name>.<suffix>`.
///
/// Namespacing by configuration name keeps platform instances from reading
/// each other's settings.
pub fn property_key(config_name: &str, suffix: &str) -> String {
    format!("{}.{}.{}", PROPERTY_PREFIX, config_name, suffix)
}

/// String-keyed property store handed to platforms by the optimizer.
///
/// Missing numeric properties fall back to the caller's default. Malformed
/// ones do too, with a warning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    properties: BTreeMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn get_long_property(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            None => default,
            Some(raw) => raw.trim().parse::<i64>().unwrap_or_else(|_| {
                tracing::warn!(key, value = raw, default, "malformed integer property");
                default
            }),
        }
    }

    pub fn get_double_property(&self, key: &str, default: f64) -> f64 {
        match self.get(key) {
            None => default,
            Some(raw) => raw.trim().parse::<f64>().unwrap_or_else(|_| {
                tracing::warn!(key, value = raw, default, "malformed float property");
                default
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

//! Cost settings read from the optimizer's configuration.
//!
//! Every key lives under `mockplat.<config_name>.`; a missing key falls back
//! to the default listed next to it.

use mockplat_core::config::{property_key, Configuration};
use mockplat_core::cost::{LoadProfileToTimeConverter, LoadToTimeConverter, TimeToCostConverter};
use serde::{Deserialize, Serialize};

pub const CPU_MHZ: &str = "cpu.mhz";
pub const CPU_CORES: &str = "cpu.cores";
pub const HDFS_MS_PER_MB: &str = "hdfs.ms-per-mb";
pub const STRETCH: &str = "stretch";
pub const COSTS_FIX: &str = "costs.fix";
pub const COSTS_PER_MS: &str = "costs.per-ms";

pub const DEFAULT_CPU_MHZ: i64 = 3000;
pub const DEFAULT_CPU_CORES: i64 = 1;
pub const DEFAULT_HDFS_MS_PER_MB: f64 = 100.0;
pub const DEFAULT_STRETCH: f64 = 1.0;
pub const DEFAULT_COSTS_FIX: f64 = 0.0;
pub const DEFAULT_COSTS_PER_MS: f64 = 1.0;

/// Resolved cost parameters of one platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostSettings {
    pub cpu_mhz: i64,
    pub cpu_cores: i64,
    pub hdfs_ms_per_mb: f64,
    pub stretch: f64,
    pub costs_fix: f64,
    pub costs_per_ms: f64,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            cpu_mhz: DEFAULT_CPU_MHZ,
            cpu_cores: DEFAULT_CPU_CORES,
            hdfs_ms_per_mb: DEFAULT_HDFS_MS_PER_MB,
            stretch: DEFAULT_STRETCH,
            costs_fix: DEFAULT_COSTS_FIX,
            costs_per_ms: DEFAULT_COSTS_PER_MS,
        }
    }
}

/// Like `get_long_property`, but zero and negative values also fall back.
fn positive_long(configuration: &Configuration, key: &str, default: i64) -> i64 {
    match configuration.get_long_property(key, default) {
        v if v > 0 => v,
        v => {
            tracing::warn!(key, value = v, default, "non-positive integer property");
            default
        }
    }
}

impl CostSettings {
    pub fn resolve(config_name: &str, configuration: &Configuration) -> Self {
        let key = |suffix| property_key(config_name, suffix);
        Self {
            cpu_mhz: positive_long(configuration, &key(CPU_MHZ), DEFAULT_CPU_MHZ),
            cpu_cores: positive_long(configuration, &key(CPU_CORES), DEFAULT_CPU_CORES),
            hdfs_ms_per_mb: configuration
                .get_double_property(&key(HDFS_MS_PER_MB), DEFAULT_HDFS_MS_PER_MB),
            stretch: configuration.get_double_property(&key(STRETCH), DEFAULT_STRETCH),
            costs_fix: configuration.get_double_property(&key(COSTS_FIX), DEFAULT_COSTS_FIX),
            costs_per_ms: configuration
                .get_double_property(&key(COSTS_PER_MS), DEFAULT_COSTS_PER_MS),
        }
    }

    /// CPU cycles -> ms at `cores * mhz`; bytes -> ms at `ms_per_mb`; the
    /// network is free.
    pub fn load_profile_to_time(&self) -> LoadProfileToTimeConverter {
        let cycles_per_ms = self.cpu_cores as f64 * self.cpu_mhz as f64 * 1000.0;
        LoadProfileToTimeConverter::stretching(
            LoadToTimeConverter::linear(1.0 / cycles_per_ms),
            LoadToTimeConverter::linear(self.hdfs_ms_per_mb / 1_000_000.0),
            LoadToTimeConverter::linear(0.0),
            self.stretch,
        )
    }

    pub fn time_to_cost(&self) -> TimeToCostConverter {
        TimeToCostConverter::new(self.costs_fix, self.costs_per_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_reads_only_own_namespace() {
        let cfg = Configuration::new()
            .with_property("mockplat.synthetic-3.cpu.cores", "8")
            .with_property("mockplat.synthetic-4.costs.per-ms", "0.5");
        let s = CostSettings::resolve("synthetic-3", &cfg);
        assert_eq!(s.cpu_cores, 8);
        assert_eq!(s.costs_per_ms, DEFAULT_COSTS_PER_MS);
        assert_eq!(CostSettings::resolve("synthetic-5", &cfg), CostSettings::default());
    }

    #[test]
    fn non_positive_cpu_settings_use_defaults() {
        let cfg = Configuration::new()
            .with_property("mockplat.synthetic-0.cpu.cores", "0")
            .with_property("mockplat.synthetic-0.cpu.mhz", "-2000");
        let s = CostSettings::resolve("synthetic-0", &cfg);
        assert_eq!(s.cpu_cores, DEFAULT_CPU_CORES);
        assert_eq!(s.cpu_mhz, DEFAULT_CPU_MHZ);
        assert!(s.load_profile_to_time().cpu.ms_per_unit.is_finite());
    }

    #[test]
    fn huge_cpu_settings_do_not_overflow() {
        let cfg = Configuration::new()
            .with_property("mockplat.synthetic-0.cpu.mhz", "5000000000000")
            .with_property("mockplat.synthetic-0.cpu.cores", "4000000");
        let s = CostSettings::resolve("synthetic-0", &cfg);
        assert_eq!(s.cpu_mhz, 5_000_000_000_000);
        let per_cycle = s.load_profile_to_time().cpu.ms_per_unit;
        assert!(per_cycle > 0.0 && per_cycle.is_finite());
        assert!((per_cycle * 2.0e22 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn settings_serialize_with_field_names() {
        let json = serde_json::to_value(CostSettings::default()).unwrap();
        assert_eq!(json["cpu_mhz"], 3000);
        assert_eq!(json["hdfs_ms_per_mb"], 100.0);
    }
}

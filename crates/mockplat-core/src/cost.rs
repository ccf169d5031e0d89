//! Cost-model vocabulary shared with the optimizer.
//!
//! Loads (CPU cycles, bytes) become times via linear converters, and times
//! become monetary cost via a fixed + per-ms converter. Every estimate is an
//! interval with a correctness probability.
//!
//! All converters are plain values: pure, deterministic, no side effects.

use serde::{Deserialize, Serialize};

/// Interval estimate of some load (cycles, bytes, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadEstimate {
    pub lower: f64,
    pub upper: f64,
    pub correctness_prob: f64,
}

impl LoadEstimate {
    pub fn exact(value: f64) -> Self {
        Self::new(value, value, 1.0)
    }

    pub fn new(lower: f64, upper: f64, correctness_prob: f64) -> Self {
        Self {
            lower,
            upper,
            correctness_prob,
        }
    }
}

/// CPU, disk, and network loads of one operator execution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadProfile {
    pub cpu: LoadEstimate,
    pub disk: LoadEstimate,
    pub network: LoadEstimate,
}

impl LoadProfile {
    pub fn new(cpu: LoadEstimate, disk: LoadEstimate, network: LoadEstimate) -> Self {
        Self { cpu, disk, network }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeEstimate {
    pub lower_ms: f64,
    pub upper_ms: f64,
    pub correctness_prob: f64,
}

impl TimeEstimate {
    pub const ZERO: TimeEstimate = TimeEstimate {
        lower_ms: 0.0,
        upper_ms: 0.0,
        correctness_prob: 1.0,
    };

    pub fn new(lower_ms: f64, upper_ms: f64, correctness_prob: f64) -> Self {
        Self {
            lower_ms,
            upper_ms,
            correctness_prob,
        }
    }

    /// Bounds add, probabilities multiply.
    pub fn plus(self, other: TimeEstimate) -> TimeEstimate {
        TimeEstimate {
            lower_ms: self.lower_ms + other.lower_ms,
            upper_ms: self.upper_ms + other.upper_ms,
            correctness_prob: self.correctness_prob * other.correctness_prob,
        }
    }

    pub fn times(self, factor: f64) -> TimeEstimate {
        TimeEstimate {
            lower_ms: self.lower_ms * factor,
            upper_ms: self.upper_ms * factor,
            correctness_prob: self.correctness_prob,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub lower: f64,
    pub upper: f64,
    pub correctness_prob: f64,
}

/// Load -> time, linear in the load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadToTimeConverter {
    pub ms_per_unit: f64,
}

impl LoadToTimeConverter {
    pub fn linear(ms_per_unit: f64) -> Self {
        Self { ms_per_unit }
    }

    pub fn convert(&self, load: &LoadEstimate) -> TimeEstimate {
        TimeEstimate {
            lower_ms: load.lower * self.ms_per_unit,
            upper_ms: load.upper * self.ms_per_unit,
            correctness_prob: load.correctness_prob,
        }
    }
}

/// Whole load profile -> time: the three partial times are summed, then
/// stretched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadProfileToTimeConverter {
    pub cpu: LoadToTimeConverter,
    pub disk: LoadToTimeConverter,
    pub network: LoadToTimeConverter,
    pub stretch: f64,
}

impl LoadProfileToTimeConverter {
    pub fn stretching(
        cpu: LoadToTimeConverter,
        disk: LoadToTimeConverter,
        network: LoadToTimeConverter,
        stretch: f64,
    ) -> Self {
        Self {
            cpu,
            disk,
            network,
            stretch,
        }
    }

    pub fn convert(&self, profile: &LoadProfile) -> TimeEstimate {
        let cpu = self.cpu.convert(&profile.cpu);
        let disk = self.disk.convert(&profile.disk);
        let network = self.network.convert(&profile.network);
        cpu.plus(disk).plus(network).times(self.stretch)
    }
}

/// Time -> cost: `fix_costs + costs_per_ms * time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeToCostConverter {
    pub fix_costs: f64,
    pub costs_per_ms: f64,
}

impl TimeToCostConverter {
    pub fn new(fix_costs: f64, costs_per_ms: f64) -> Self {
        Self {
            fix_costs,
            costs_per_ms,
        }
    }

    pub fn convert(&self, time: &TimeEstimate) -> CostEstimate {
        CostEstimate {
            lower: self.fix_costs + self.costs_per_ms * time.lower_ms,
            upper: self.fix_costs + self.costs_per_ms * time.upper_ms,
            correctness_prob: time.correctness_prob,
        }
    }
}

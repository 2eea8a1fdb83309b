//! Hardware profiles describing the power envelope and capacity of a machine.

use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;
use crate::sample::UtilizationSample;

/// Power envelope and capacity of a physical or virtual machine.
///
/// Always valid once constructed: `cores > 0`, `mem_gb > 0`, `p_max > p_idle >= 0`
/// and `mem_power_coeff >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHardwareProfile")]
pub struct HardwareProfile {
    cores: f64,
    mem_gb: f64,
    p_idle: f64,
    p_max: f64,
    mem_power_coeff: f64,
}

/// Unchecked profile fields as they appear in a config file.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHardwareProfile {
    cores: f64,
    mem_gb: f64,
    p_idle: f64,
    p_max: f64,
    mem_power_coeff: f64,
}

impl TryFrom<RawHardwareProfile> for HardwareProfile {
    type Error = CalibrationError;

    fn try_from(raw: RawHardwareProfile) -> Result<Self, Self::Error> {
        Self::new(raw.cores, raw.mem_gb, raw.p_idle, raw.p_max, raw.mem_power_coeff)
    }
}

impl HardwareProfile {
    /// Creates a hardware profile.
    ///
    /// * `cores` - total CPU capacity in logical cores.
    /// * `mem_gb` - total memory capacity in GB.
    /// * `p_idle` - power consumption in W at zero CPU utilization.
    /// * `p_max` - power consumption in W at full CPU utilization.
    /// * `mem_power_coeff` - power consumption in W per GB of used memory.
    pub fn new(
        cores: f64,
        mem_gb: f64,
        p_idle: f64,
        p_max: f64,
        mem_power_coeff: f64,
    ) -> Result<Self, CalibrationError> {
        // negated comparisons also reject NaN
        if !(cores > 0.) || !cores.is_finite() {
            return Err(CalibrationError::InvalidProfile(format!("cores must be positive, got {}", cores)));
        }
        if !(mem_gb > 0.) || !mem_gb.is_finite() {
            return Err(CalibrationError::InvalidProfile(format!("mem_gb must be positive, got {}", mem_gb)));
        }
        if !(p_idle >= 0.) {
            return Err(CalibrationError::InvalidProfile(format!("p_idle must be non-negative, got {}", p_idle)));
        }
        if !(p_max > p_idle) || !p_max.is_finite() {
            return Err(CalibrationError::InvalidProfile(format!(
                "p_max must be greater than p_idle, got p_idle = {}, p_max = {}",
                p_idle, p_max
            )));
        }
        if !(mem_power_coeff >= 0.) || !mem_power_coeff.is_finite() {
            return Err(CalibrationError::InvalidProfile(format!(
                "mem_power_coeff must be non-negative, got {}",
                mem_power_coeff
            )));
        }
        Ok(Self {
            cores,
            mem_gb,
            p_idle,
            p_max,
            mem_power_coeff,
        })
    }

    /// Total CPU capacity in logical cores.
    pub fn cores(&self) -> f64 {
        self.cores
    }

    /// Total memory capacity in GB.
    pub fn mem_gb(&self) -> f64 {
        self.mem_gb
    }

    /// Idle power in W.
    pub fn p_idle(&self) -> f64 {
        self.p_idle
    }

    /// Power at full CPU utilization in W.
    pub fn p_max(&self) -> f64 {
        self.p_max
    }

    /// Memory power in W per used GB.
    pub fn mem_power_coeff(&self) -> f64 {
        self.mem_power_coeff
    }

    /// Dynamic power range `p_max - p_idle`.
    pub fn dynamic_range(&self) -> f64 {
        self.p_max - self.p_idle
    }

    /// Number of cores used at the given sample.
    pub fn used_cores(&self, sample: &UtilizationSample) -> f64 {
        sample.cpu_util * self.cores
    }

    /// Amount of memory in GB used at the given sample.
    pub fn used_mem_gb(&self, sample: &UtilizationSample) -> f64 {
        sample.mem_util * self.mem_gb
    }

    /// Memory power in W at the given sample.
    pub fn memory_power(&self, sample: &UtilizationSample) -> f64 {
        self.used_mem_gb(sample) * self.mem_power_coeff
    }
}

/// Named hardware profile to calibrate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    /// Human-readable scenario name.
    pub name: String,
    /// Hardware profile of the scenario.
    pub profile: HardwareProfile,
}

impl Scenario {
    /// Creates a named scenario.
    pub fn new(name: &str, profile: HardwareProfile) -> Self {
        Self {
            name: name.to_string(),
            profile,
        }
    }

    /// Returns the three reference scenarios: a high-performance server, a standard cloud VM
    /// and an edge device cluster.
    pub fn builtin() -> Vec<Scenario> {
        vec![
            Scenario {
                name: "High-Perf Server (Intel Xeon)".to_string(),
                profile: HardwareProfile {
                    cores: 64.,
                    mem_gb: 256.,
                    p_idle: 100.,
                    p_max: 500.,
                    mem_power_coeff: 0.392,
                },
            },
            Scenario {
                name: "Standard VM (AWS m5.2xlarge)".to_string(),
                profile: HardwareProfile {
                    cores: 8.,
                    mem_gb: 32.,
                    p_idle: 20.,
                    p_max: 120.,
                    mem_power_coeff: 0.392,
                },
            },
            Scenario {
                // LPDDR memory has a lower per-GB power draw
                name: "Edge Device (Raspberry Pi Cluster)".to_string(),
                profile: HardwareProfile {
                    cores: 4.,
                    mem_gb: 8.,
                    p_idle: 2.5,
                    p_max: 15.,
                    mem_power_coeff: 0.2,
                },
            },
        ]
    }
}

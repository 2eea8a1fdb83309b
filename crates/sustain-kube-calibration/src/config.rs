//! Experiment configuration.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::profile::{HardwareProfile, Scenario};
use crate::workload::{UtilizationWave, WorkloadConfig};

/// Holds raw utilization wave parsed from YAML file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawUtilizationWave {
    pub base: Option<f64>,
    pub amplitude: Option<f64>,
    pub noise: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RawUtilizationWave {
    fn with_defaults(self, default: UtilizationWave) -> UtilizationWave {
        UtilizationWave {
            base: self.base.unwrap_or(default.base),
            amplitude: self.amplitude.unwrap_or(default.amplitude),
            noise: self.noise.unwrap_or(default.noise),
            min: self.min.unwrap_or(default.min),
            max: self.max.unwrap_or(default.max),
        }
    }
}

/// Holds raw workload config parsed from YAML file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWorkloadConfig {
    pub points: Option<usize>,
    pub cycles: Option<f64>,
    pub seed: Option<u64>,
    pub cpu: Option<RawUtilizationWave>,
    pub memory: Option<RawUtilizationWave>,
}

/// Holds raw scenario parsed from YAML file, all profile fields are required.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScenario {
    pub name: String,
    pub cores: f64,
    pub mem_gb: f64,
    pub p_idle: f64,
    pub p_max: f64,
    pub mem_power_coeff: f64,
}

/// Holds raw experiment config parsed from YAML file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawExperimentConfig {
    pub workload: Option<RawWorkloadConfig>,
    pub scenarios: Option<Vec<RawScenario>>,
}

/// Represents experiment configuration: the workload and the hardware scenarios to calibrate on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    /// Synthetic workload shared by all scenarios.
    pub workload: WorkloadConfig,
    /// Hardware scenarios.
    pub scenarios: Vec<Scenario>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            workload: WorkloadConfig::default(),
            scenarios: Scenario::builtin(),
        }
    }
}

impl ExperimentConfig {
    /// Creates experiment config by reading parameter values from YAML file
    /// (uses default values if workload parameters or scenarios are absent).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Creates experiment config from YAML string.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawExperimentConfig = serde_yaml::from_str(content)?;

        let raw_workload = raw.workload.unwrap_or_default();
        let default_workload = WorkloadConfig::default();
        let workload = WorkloadConfig {
            points: raw_workload.points.unwrap_or(default_workload.points),
            cycles: raw_workload.cycles.unwrap_or(default_workload.cycles),
            seed: raw_workload.seed.unwrap_or(default_workload.seed),
            cpu: raw_workload.cpu.unwrap_or_default().with_defaults(default_workload.cpu),
            memory: raw_workload
                .memory
                .unwrap_or_default()
                .with_defaults(default_workload.memory),
        };

        let scenarios = match raw.scenarios {
            Some(raw_scenarios) => raw_scenarios
                .into_iter()
                .map(|s| {
                    HardwareProfile::new(s.cores, s.mem_gb, s.p_idle, s.p_max, s.mem_power_coeff)
                        .map(|profile| Scenario { name: s.name, profile })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Scenario::builtin(),
        };

        Ok(Self { workload, scenarios })
    }
}

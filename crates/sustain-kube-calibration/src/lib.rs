#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod calibration;
pub mod config;
pub mod error;
pub mod fit;
pub mod power;
pub mod profile;
pub mod run;
pub mod sample;
pub mod trace;
pub mod workload;

pub use calibration::{Calibration, LinearCalibrator};
pub use config::ExperimentConfig;
pub use error::{CalibrationError, ConfigError};
pub use fit::{evaluate_fit, FitScore};
pub use power::host::HostPowerModel;
pub use power::shadow::ShadowPowerModel;
pub use power::sustain::SustainKubePowerModel;
pub use profile::{HardwareProfile, Scenario};
pub use run::{calibrate_profile, CalibrationOutcome, CalibrationResult, CalibrationRun, ScenarioReport};
pub use sample::UtilizationSample;
pub use trace::PowerTrace;
pub use workload::{UtilizationWave, WorkloadConfig, WorkloadGenerator};

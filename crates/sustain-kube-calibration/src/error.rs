//! Calibration and configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the calibration pipeline.
///
/// All of them are local to the failing call: nothing is clamped or corrected silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// Hardware profile violates `p_max > p_idle >= 0` or has a non-positive capacity.
    #[error("invalid hardware profile: {0}")]
    InvalidProfile(String),

    /// Utilization sample has a value outside of 0.0-1.0 range.
    #[error("invalid utilization sample #{index}: cpu_util = {cpu_util}, mem_util = {mem_util}")]
    InvalidSample {
        /// Position of the sample in the workload.
        index: usize,
        /// CPU utilization of the sample.
        cpu_util: f64,
        /// Memory utilization of the sample.
        mem_util: f64,
    },

    /// The workload never uses any CPU, so the CPU coefficient is undefined.
    #[error("degenerate workload: total used cores is zero")]
    DegenerateWorkload,

    /// The reference trace is constant while the reconstruction is not, so R² is undefined.
    #[error("degenerate reference: reference trace has zero variance")]
    DegenerateReference,

    /// Two traces (or a trace and a workload) have different lengths.
    #[error("shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch {
        /// Length of the reference sequence.
        expected: usize,
        /// Length of the compared sequence.
        actual: usize,
    },

    /// Power trace has a negative or non-finite value.
    #[error("invalid power value #{index}: {value} W")]
    InvalidPower {
        /// Position of the value in the trace.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Fit metrics were requested for empty traces.
    #[error("cannot score empty traces")]
    EmptyTrace,

    /// Workload generator parameters are out of range.
    #[error("invalid workload parameters: {0}")]
    InvalidWorkload(String),
}

/// Errors raised while loading an experiment config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file can't be read.
    #[error("can't read config file {}: {}", .path.display(), .source)]
    Io {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Config is not valid YAML or has unknown/missing fields.
    #[error("can't parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Config describes an invalid profile or workload.
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

//! Synthetic utilization workloads.

use std::f64::consts::PI;

use rand::prelude::*;
use rand_distr::Normal;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;
use crate::sample::UtilizationSample;

/// Noisy sine wave describing utilization of one resource.
///
/// `u(x) = clamp(base + amplitude * sin(x) + N(0, noise), min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilizationWave {
    /// Mean utilization.
    pub base: f64,
    /// Amplitude of the day/night cycle.
    pub amplitude: f64,
    /// Standard deviation of the Gaussian noise.
    pub noise: f64,
    /// Lower clipping bound.
    pub min: f64,
    /// Upper clipping bound.
    pub max: f64,
}

impl UtilizationWave {
    /// CPU wave oscillating between 10% and 90%.
    pub fn cpu() -> Self {
        Self {
            base: 0.5,
            amplitude: 0.4,
            noise: 0.02,
            min: 0.1,
            max: 0.9,
        }
    }

    /// Memory wave following the CPU but smoother, within 20% and 80%.
    pub fn memory() -> Self {
        Self {
            base: 0.5,
            amplitude: 0.3,
            noise: 0.01,
            min: 0.2,
            max: 0.8,
        }
    }

    fn noise_distribution(&self, resource: &str) -> Result<Normal<f64>, CalibrationError> {
        if !(0. ..=1.).contains(&self.min) || !(0. ..=1.).contains(&self.max) || self.min > self.max {
            return Err(CalibrationError::InvalidWorkload(format!(
                "{} clipping range [{}, {}] must lie within [0, 1]",
                resource, self.min, self.max
            )));
        }
        if !self.base.is_finite() || !self.amplitude.is_finite() {
            return Err(CalibrationError::InvalidWorkload(format!("{} base and amplitude must be finite", resource)));
        }
        // Normal::new accepts a negative std dev
        if !(self.noise >= 0.) || !self.noise.is_finite() {
            return Err(CalibrationError::InvalidWorkload(format!(
                "{} noise must be non-negative, got {}",
                resource, self.noise
            )));
        }
        Normal::new(0., self.noise)
            .map_err(|e| CalibrationError::InvalidWorkload(format!("{} noise {}: {}", resource, self.noise, e)))
    }

    fn value(&self, x: f64, noise: &Normal<f64>, rng: &mut Pcg64) -> f64 {
        let value = self.base + self.amplitude * x.sin() + noise.sample(rng);
        value.clamp(self.min, self.max)
    }
}

/// Parameters of a synthetic workload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Number of samples.
    pub points: usize,
    /// Number of full day/night cycles over the workload.
    pub cycles: f64,
    /// Seed of the random number generator.
    pub seed: u64,
    /// CPU utilization wave.
    pub cpu: UtilizationWave,
    /// Memory utilization wave.
    pub memory: UtilizationWave,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            points: 1000,
            cycles: 3.,
            seed: 123,
            cpu: UtilizationWave::cpu(),
            memory: UtilizationWave::memory(),
        }
    }
}

/// Generates utilization workloads with day/night cycles and random fluctuations.
///
/// Output depends only on the config, the same seed always yields the same workload.
pub struct WorkloadGenerator {
    config: WorkloadConfig,
    cpu_noise: Normal<f64>,
    memory_noise: Normal<f64>,
}

impl WorkloadGenerator {
    /// Creates generator, checking the config.
    pub fn new(config: WorkloadConfig) -> Result<Self, CalibrationError> {
        if config.points == 0 {
            return Err(CalibrationError::InvalidWorkload("points must be positive".to_string()));
        }
        if !(config.cycles >= 0.) || !config.cycles.is_finite() {
            return Err(CalibrationError::InvalidWorkload(format!(
                "cycles must be non-negative, got {}",
                config.cycles
            )));
        }
        let cpu_noise = config.cpu.noise_distribution("cpu")?;
        let memory_noise = config.memory.noise_distribution("memory")?;
        Ok(Self {
            config,
            cpu_noise,
            memory_noise,
        })
    }

    /// Returns the generator config.
    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    /// Generates the workload.
    pub fn generate(&self) -> Vec<UtilizationSample> {
        let mut rng = Pcg64::seed_from_u64(self.config.seed);
        let points = self.config.points;
        let end = 2. * PI * self.config.cycles;
        let step = if points > 1 { end / (points - 1) as f64 } else { 0. };

        // noise is drawn for the whole CPU series first, then for memory
        let cpu = (0..points)
            .map(|i| self.config.cpu.value(i as f64 * step, &self.cpu_noise, &mut rng))
            .collect::<Vec<_>>();
        let memory = (0..points)
            .map(|i| self.config.memory.value(i as f64 * step, &self.memory_noise, &mut rng))
            .collect::<Vec<_>>();

        cpu.into_iter()
            .zip(memory)
            .map(|(cpu_util, mem_util)| UtilizationSample::new(cpu_util, mem_util))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_workload() {
        let config = WorkloadConfig {
            points: 200,
            ..Default::default()
        };
        let first = WorkloadGenerator::new(config).unwrap().generate();
        let second = WorkloadGenerator::new(config).unwrap().generate();
        assert_eq!(first, second);

        let other = WorkloadGenerator::new(WorkloadConfig { seed: 7, ..config })
            .unwrap()
            .generate();
        assert_ne!(first, other);
    }

    #[test]
    fn test_values_are_clipped() {
        let workload = WorkloadGenerator::new(WorkloadConfig::default()).unwrap().generate();
        assert_eq!(workload.len(), 1000);
        for sample in &workload {
            assert!((0.1..=0.9).contains(&sample.cpu_util));
            assert!((0.2..=0.8).contains(&sample.mem_util));
        }
        // peaks of the sine wave hit the clipping bounds
        assert!(workload.iter().any(|s| s.cpu_util == 0.9));
        assert!(workload.iter().any(|s| s.cpu_util == 0.1));
    }

    #[test]
    fn test_noiseless_wave() {
        let wave = UtilizationWave {
            noise: 0.,
            ..UtilizationWave::cpu()
        };
        let config = WorkloadConfig {
            points: 5,
            cycles: 1.,
            seed: 1,
            cpu: wave,
            memory: wave,
        };
        let workload = WorkloadGenerator::new(config).unwrap().generate();
        let expected = [0.5, 0.9, 0.5, 0.1, 0.5];
        for (sample, expected) in workload.iter().zip(expected) {
            assert!((sample.cpu_util - expected).abs() < 1e-12);
            assert!((sample.mem_util - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_point() {
        let config = WorkloadConfig {
            points: 1,
            ..Default::default()
        };
        assert_eq!(WorkloadGenerator::new(config).unwrap().generate().len(), 1);
    }

    #[test]
    fn test_invalid_config() {
        let zero_points = WorkloadConfig {
            points: 0,
            ..Default::default()
        };
        assert!(WorkloadGenerator::new(zero_points).is_err());

        let negative_noise = WorkloadConfig {
            cpu: UtilizationWave {
                noise: -0.1,
                ..UtilizationWave::cpu()
            },
            ..Default::default()
        };
        assert!(matches!(
            WorkloadGenerator::new(negative_noise),
            Err(CalibrationError::InvalidWorkload(_))
        ));

        let nan_noise = WorkloadConfig {
            memory: UtilizationWave {
                noise: f64::NAN,
                ..UtilizationWave::memory()
            },
            ..Default::default()
        };
        assert!(WorkloadGenerator::new(nan_noise).is_err());

        let inverted_range = WorkloadConfig {
            memory: UtilizationWave {
                min: 0.8,
                max: 0.2,
                ..UtilizationWave::memory()
            },
            ..Default::default()
        };
        assert!(matches!(
            WorkloadGenerator::new(inverted_range),
            Err(CalibrationError::InvalidWorkload(_))
        ));
    }
}

//! Utilization samples.

use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;

/// Resource utilization at one point of a workload.
///
/// Both values are fractions of the machine capacity in 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilizationSample {
    /// CPU utilization from 0 to 1.
    pub cpu_util: f64,
    /// Memory utilization from 0 to 1.
    pub mem_util: f64,
}

impl UtilizationSample {
    /// Creates a sample without checking the values, see [`UtilizationSample::validate`].
    pub fn new(cpu_util: f64, mem_util: f64) -> Self {
        Self { cpu_util, mem_util }
    }

    /// Checks that both utilization values lie in 0.0-1.0 range.
    ///
    /// `index` is the sample position reported in the error.
    pub fn validate(&self, index: usize) -> Result<(), CalibrationError> {
        if (0. ..=1.).contains(&self.cpu_util) && (0. ..=1.).contains(&self.mem_util) {
            Ok(())
        } else {
            Err(CalibrationError::InvalidSample {
                index,
                cpu_util: self.cpu_util,
                mem_util: self.mem_util,
            })
        }
    }
}

/// Checks every sample of the workload, returning the first invalid one.
pub fn validate_samples(samples: &[UtilizationSample]) -> Result<(), CalibrationError> {
    samples
        .iter()
        .enumerate()
        .try_for_each(|(index, sample)| sample.validate(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(UtilizationSample::new(0., 1.).validate(0).is_ok());
        assert!(UtilizationSample::new(1., 0.).validate(0).is_ok());
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let samples = vec![
            UtilizationSample::new(0.5, 0.5),
            UtilizationSample::new(0.5, 1.01),
            UtilizationSample::new(-0.1, 0.5),
        ];
        assert_eq!(
            validate_samples(&samples),
            Err(CalibrationError::InvalidSample {
                index: 1,
                cpu_util: 0.5,
                mem_util: 1.01
            })
        );
        assert!(UtilizationSample::new(f64::NAN, 0.5).validate(0).is_err());
    }
}

//! Host power model trait.

use crate::error::CalibrationError;
use crate::sample::UtilizationSample;
use crate::trace::PowerTrace;

/// A model for estimating the power consumption of a host based on its CPU and memory utilization.
pub trait HostPowerModel: Send + Sync {
    /// Returns host power consumption in W.
    ///
    /// Utilization values should lie in 0.0-1.0 range, they are not checked here.
    fn get_power(&self, sample: &UtilizationSample) -> f64;

    /// Returns the power trace of a workload, one value per sample in workload order.
    ///
    /// Fails on the first sample with utilization outside of 0.0-1.0 range.
    fn power_trace(&self, samples: &[UtilizationSample]) -> Result<PowerTrace, CalibrationError> {
        samples
            .iter()
            .enumerate()
            .map(|(index, sample)| {
                sample.validate(index)?;
                Ok(self.get_power(sample))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(PowerTrace::from)
    }
}

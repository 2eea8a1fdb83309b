//! Goodness-of-fit metrics for power traces.

use serde::Serialize;

use crate::error::CalibrationError;
use crate::trace::PowerTrace;

/// Rounding error bound of a summed trace value, in units of `n * f64::EPSILON`.
const ROUNDING_ERROR_FACTOR: f64 = 4.;

/// Fit of a reconstructed trace to the reference one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitScore {
    /// Coefficient of determination, at most 1.
    pub r2: f64,
    /// Mean absolute error in W.
    pub mae: f64,
}

/// Computes R² and mean absolute error of `reconstructed` against `reference`.
///
/// Both traces must be non-empty, have equal length and hold finite non-negative values.
///
/// If the reference trace is constant up to rounding error of its mean, R² is 1 when
/// the reconstruction matches it within the same error and
/// [`CalibrationError::DegenerateReference`] otherwise.
pub fn evaluate_fit(reference: &PowerTrace, reconstructed: &PowerTrace) -> Result<FitScore, CalibrationError> {
    if reference.len() != reconstructed.len() {
        return Err(CalibrationError::ShapeMismatch {
            expected: reference.len(),
            actual: reconstructed.len(),
        });
    }
    check_power_values(reference)?;
    check_power_values(reconstructed)?;
    let mean = reference.mean().ok_or(CalibrationError::EmptyTrace)?;
    let n = reference.len() as f64;

    let mut abs_error_sum = 0.;
    let mut ss_res = 0.;
    let mut ss_tot = 0.;
    for (actual, predicted) in reference.iter().zip(reconstructed.iter()) {
        let residual = actual - predicted;
        abs_error_sum += residual.abs();
        ss_res += residual * residual;
        ss_tot += (actual - mean) * (actual - mean);
    }
    let mae = abs_error_sum / n;

    let tolerance = n * (ROUNDING_ERROR_FACTOR * n * f64::EPSILON * mean.abs()).powi(2);
    let r2 = if ss_tot <= tolerance {
        if ss_res > tolerance {
            return Err(CalibrationError::DegenerateReference);
        }
        1.
    } else {
        1. - ss_res / ss_tot
    };

    Ok(FitScore { r2, mae })
}

fn check_power_values(trace: &PowerTrace) -> Result<(), CalibrationError> {
    match trace.iter().enumerate().find(|(_, value)| !(*value >= 0.) || !value.is_finite()) {
        Some((index, value)) => Err(CalibrationError::InvalidPower { index, value }),
        None => Ok(()),
    }
}

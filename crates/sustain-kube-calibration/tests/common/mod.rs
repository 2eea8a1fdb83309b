#![allow(dead_code)]

use sustain_kube_calibration::{HardwareProfile, UtilizationSample};

/// Standard VM profile: 8 cores, 32 GB, 20-120 W, 0.392 W/GB.
pub fn standard_vm() -> HardwareProfile {
    HardwareProfile::new(8., 32., 20., 120., 0.392).unwrap()
}

pub fn samples(values: &[(f64, f64)]) -> Vec<UtilizationSample> {
    values
        .iter()
        .map(|&(cpu, mem)| UtilizationSample::new(cpu, mem))
        .collect()
}

/// Deterministic workload with varying CPU and memory utilization.
pub fn varying_workload(points: usize) -> Vec<UtilizationSample> {
    (0..points)
        .map(|i| {
            let x = i as f64 / points as f64;
            UtilizationSample::new(0.1 + 0.8 * x, 0.2 + 0.6 * (1. - x) * x)
        })
        .collect()
}

//! Power traces.

use serde::Serialize;

/// Power consumption values in W, one per workload sample, in workload order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PowerTrace {
    values: Vec<f64>,
}

impl PowerTrace {
    /// Returns the number of points in the trace.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the trace has no points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the trace values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over the trace values.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Returns the sum of all values (total energy in W x sample period).
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Returns the mean value, or `None` for an empty trace.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.sum() / self.values.len() as f64)
    }

    /// Returns the first `n` points (the whole trace if it is shorter).
    pub fn head(&self, n: usize) -> &[f64] {
        &self.values[..n.min(self.values.len())]
    }
}

impl From<Vec<f64>> for PowerTrace {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl FromIterator<f64> for PowerTrace {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_methods() {
        let trace: PowerTrace = (1..=4).map(|x| x as f64).collect();
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.sum(), 10.);
        assert_eq!(trace.mean(), Some(2.5));
        assert_eq!(trace.head(2), &[1., 2.]);
        assert_eq!(trace.head(10).len(), 4);
    }

    #[test]
    fn test_empty() {
        let trace = PowerTrace::default();
        assert!(trace.is_empty());
        assert_eq!(trace.sum(), 0.);
        assert_eq!(trace.mean(), None);
    }
}

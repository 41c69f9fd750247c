use serde::{Deserialize, Serialize};

/// Slack for comparisons of accumulated floating point sums, so that a workload which exactly
/// fills the residual capacity of a bin still fits.
pub const FIT_TOLERANCE: f64 = 1e-9;

/// Two-dimensional resource quantity.
#[derive(Default, Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct RuntimeResources {
    pub cpu: f64,    // in cores, fractional
    pub memory: f64, // in GiB
}

impl RuntimeResources {
    pub fn new(cpu: f64, memory: f64) -> Self {
        Self { cpu, memory }
    }

    /// True if `self` can be placed into `available`. Boundary values fit.
    pub fn fits(&self, available: &RuntimeResources) -> bool {
        self.cpu <= available.cpu + FIT_TOLERANCE && self.memory <= available.memory + FIT_TOLERANCE
    }

    pub fn add(&self, other: &RuntimeResources) -> RuntimeResources {
        RuntimeResources {
            cpu: self.cpu + other.cpu,
            memory: self.memory + other.memory,
        }
    }

    pub fn sub(&self, other: &RuntimeResources) -> RuntimeResources {
        RuntimeResources {
            cpu: self.cpu - other.cpu,
            memory: self.memory - other.memory,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.cpu.is_finite() && self.memory.is_finite() && self.cpu > 0.0 && self.memory > 0.0
    }
}

impl std::iter::Sum for RuntimeResources {
    fn sum<I: Iterator<Item = RuntimeResources>>(iter: I) -> Self {
        iter.fold(Default::default(), |acc, r| acc.add(&r))
    }
}

#[cfg(test)]
mod tests {
    use super::RuntimeResources;

    #[test]
    fn test_exact_fill_fits() {
        let available = RuntimeResources::new(1.0, 1.0);
        assert!(RuntimeResources::new(1.0, 1.0).fits(&available));
        assert!(!RuntimeResources::new(1.5, 1.0).fits(&available));
        assert!(!RuntimeResources::new(1.0, 1.01).fits(&available));
    }

    #[test]
    fn test_accumulated_sum_fits() {
        // 0.1 + 0.2 is slightly above 0.3 in binary floating point
        let used = RuntimeResources::new(0.1, 0.1).add(&RuntimeResources::new(0.2, 0.2));
        assert!(used.fits(&RuntimeResources::new(0.3, 0.3)));
    }

    #[test]
    fn test_non_positive_quantities() {
        assert!(RuntimeResources::new(0.5, 2.0).is_positive());
        assert!(!RuntimeResources::new(0.0, 2.0).is_positive());
        assert!(!RuntimeResources::new(1.0, -2.0).is_positive());
        assert!(!RuntimeResources::new(f64::NAN, 2.0).is_positive());
    }
}

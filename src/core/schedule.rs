//! Output of one optimizer run.

use serde::Serialize;

use crate::core::bin::{Bin, BinOrigin};

/// Ordered bins of one placement batch: reused bins first in the order they were handed in,
/// then created bins in the order they were opened.
#[derive(Debug, Default, Serialize, Clone, PartialEq)]
pub struct Schedule {
    pub bins: Vec<Bin>,
}

impl Schedule {
    /// Hourly cost of newly provisioned capacity. Reused bins cost nothing extra.
    pub fn total_cost(&self) -> f64 {
        self.bins.iter().map(|bin| bin.marginal_price()).sum()
    }

    pub fn created_bins(&self) -> impl Iterator<Item = &Bin> {
        self.bins.iter().filter(|b| b.origin == BinOrigin::Created)
    }

    pub fn reused_bins(&self) -> impl Iterator<Item = &Bin> {
        self.bins.iter().filter(|b| b.origin == BinOrigin::Reused)
    }

    /// Count of workloads placed during the run.
    pub fn placed_workloads(&self) -> usize {
        self.bins.iter().map(|b| b.placed_workloads().len()).sum()
    }

    /// Bin holding the workload with the given name, if any.
    pub fn bin_of(&self, workload_name: &str) -> Option<&Bin> {
        self.bins
            .iter()
            .find(|b| b.workloads().iter().any(|w| w.name == workload_name))
    }
}

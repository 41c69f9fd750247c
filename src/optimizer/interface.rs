use std::cmp::Ordering;

use downcast_rs::{impl_downcast, Downcast};
use dyn_clone::DynClone;

use crate::core::common::RuntimeResources;
use crate::core::node_type::NodeType;
use crate::core::workload::Workload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// Bin already present in the in-progress schedule (reused or created earlier in the run),
    /// by its index in the schedule.
    Existing { bin_index: usize },
    /// Hypothetical fresh bin of a catalog type, by its index in the catalog.
    New { type_index: usize },
}

/// A bin the current workload could go to, as seen before the workload is placed.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub kind: CandidateKind,
    pub node_type: &'a NodeType,
    /// Residual capacity before placing the workload. Equals capacity for new candidates.
    pub residual: RuntimeResources,
}

impl<'a> Candidate<'a> {
    pub fn is_existing(&self) -> bool {
        matches!(self.kind, CandidateKind::Existing { .. })
    }

    pub fn capacity(&self) -> RuntimeResources {
        self.node_type.capacity
    }

    pub fn residual_after(&self, workload: &Workload) -> RuntimeResources {
        self.residual.sub(&workload.requests)
    }

    pub fn hourly_price(&self) -> f64 {
        self.node_type.hourly_price
    }
}

/// Trait which any placement strategy implements. The optimizer owns the shared skeleton
/// (validation, ordering, candidate enumeration, failure handling); a strategy decides how
/// workloads are ordered and which candidate wins.
pub trait PlacementStrategy: DynClone + Downcast {
    fn name(&self) -> &str;

    /// Placement order of pending workloads; `Less` goes first. Larger demands are expected to
    /// come first. The sort is stable, so equal workloads keep their input order.
    fn compare_workloads(&self, a: &Workload, b: &Workload) -> Ordering;

    /// Returns the index of the chosen candidate. `candidates` is never empty and lists
    /// existing bins (schedule order) before new bins (catalog order).
    fn select(&self, workload: &Workload, candidates: &[Candidate]) -> usize;
}

dyn_clone::clone_trait_object!(PlacementStrategy);
impl_downcast!(PlacementStrategy);

//! Type definitions for bins: capacity units (nodes) which hold assigned workloads.

use serde::{Deserialize, Serialize};

use crate::core::common::RuntimeResources;
use crate::core::error::PlacementError;
use crate::core::node_type::NodeType;
use crate::core::workload::Workload;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum BinOrigin {
    /// Node already exists in the cluster and is already paid for.
    Reused,
    /// Node opened by the optimizer, has to be provisioned.
    Created,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Bin {
    pub name: String,
    pub node_type: NodeType,
    pub origin: BinOrigin,
    /// Assigned workloads in assignment order.
    workloads: Vec<Workload>,
    /// Number of workloads the bin held before the optimizer started placing into it.
    initial_workload_count: usize,
}

impl Bin {
    /// Fresh empty bin opened from a catalog type. Named `<type id>_<ordinal>`.
    pub fn created(node_type: NodeType, ordinal: usize) -> Self {
        Self {
            name: Self::created_name(&node_type, ordinal),
            node_type,
            origin: BinOrigin::Created,
            workloads: vec![],
            initial_workload_count: 0,
        }
    }

    pub fn created_name(node_type: &NodeType, ordinal: usize) -> String {
        format!("{}_{}", node_type.id, ordinal)
    }

    /// Wraps an existing node together with workloads already running on it.
    pub fn reused(
        name: String,
        node_type: NodeType,
        workloads: Vec<Workload>,
    ) -> Result<Self, PlacementError> {
        let used: RuntimeResources = workloads.iter().map(|w| w.requests).sum();
        if !used.fits(&node_type.capacity) {
            return Err(PlacementError::OvercommittedBin { name });
        }
        let initial_workload_count = workloads.len();
        Ok(Self {
            name,
            node_type,
            origin: BinOrigin::Reused,
            workloads,
            initial_workload_count,
        })
    }

    /// Checks a bin handed in from outside the optimizer: its type must be a valid entry and its
    /// workloads must fit. Bins built through `serde` skip the checks of `reused`.
    pub fn validate(&self) -> Result<(), PlacementError> {
        self.node_type.validate()?;
        if !self.used().fits(&self.capacity()) {
            return Err(PlacementError::OvercommittedBin {
                name: self.name.clone(),
            });
        }
        if self.initial_workload_count > self.workloads.len() {
            return Err(PlacementError::InvalidCatalogEntry {
                id: self.node_type.id.clone(),
                reason: format!(
                    "bin {:?} claims {} running workloads but holds {}",
                    self.name,
                    self.initial_workload_count,
                    self.workloads.len()
                ),
            });
        }
        Ok(())
    }

    pub fn capacity(&self) -> RuntimeResources {
        self.node_type.capacity
    }

    pub fn used(&self) -> RuntimeResources {
        self.workloads.iter().map(|w| w.requests).sum()
    }

    pub fn residual(&self) -> RuntimeResources {
        self.capacity().sub(&self.used())
    }

    pub fn fits(&self, workload: &Workload) -> bool {
        workload.requests.fits(&self.residual())
    }

    /// Places `workload` into the bin. Callers check `fits` first: exceeding the capacity is a
    /// defect in the caller, not a runtime condition.
    pub fn assign(&mut self, workload: Workload) {
        assert!(
            self.fits(&workload),
            "workload {:?} does not fit into bin {:?} (residual {:?})",
            workload.name,
            self.name,
            self.residual()
        );
        self.workloads.push(workload);
    }

    pub fn workloads(&self) -> &[Workload] {
        &self.workloads
    }

    /// Workloads assigned during the optimizer run, excluding those the bin already held.
    pub fn placed_workloads(&self) -> &[Workload] {
        &self.workloads[self.initial_workload_count..]
    }

    /// Zero for reused bins, the type price for created ones.
    pub fn marginal_price(&self) -> f64 {
        match self.origin {
            BinOrigin::Reused => 0.0,
            BinOrigin::Created => self.node_type.hourly_price,
        }
    }
}

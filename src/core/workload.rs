//! Type definition for a pending workload (a pod waiting for a node).

use serde::{Deserialize, Serialize};

use crate::core::common::RuntimeResources;
use crate::core::error::PlacementError;

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct Workload {
    pub name: String,
    /// Requested cpu (cores) and memory (GiB). Immutable once the workload is created.
    pub requests: RuntimeResources,
}

impl Workload {
    pub fn new(name: String, cpu: f64, memory: f64) -> Result<Self, PlacementError> {
        let workload = Self {
            name,
            requests: RuntimeResources { cpu, memory },
        };
        workload.validate()?;
        Ok(workload)
    }

    /// Rejects zero, negative or non-finite demand.
    pub fn validate(&self) -> Result<(), PlacementError> {
        if !self.requests.is_positive() {
            return Err(PlacementError::InvalidRequest {
                name: self.name.clone(),
                cpu: self.requests.cpu,
                memory: self.requests.memory,
            });
        }
        Ok(())
    }

    pub fn cpu(&self) -> f64 {
        self.requests.cpu
    }

    pub fn memory(&self) -> f64 {
        self.requests.memory
    }
}

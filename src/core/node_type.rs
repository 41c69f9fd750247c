//! Catalog entry from which new bins (nodes) are created.

use serde::{Deserialize, Serialize};

use crate::core::common::RuntimeResources;
use crate::core::error::PlacementError;

/// Node type id used for existing nodes whose type cannot be matched with the catalog.
pub const UNKNOWN_NODE_TYPE: &str = "unknown";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NodeType {
    pub id: String,
    /// Total amount of resources of a node of this type.
    pub capacity: RuntimeResources,
    /// On-demand price per hour.
    pub hourly_price: f64,
}

impl NodeType {
    pub fn new(id: String, cpu: f64, memory: f64, hourly_price: f64) -> Self {
        Self {
            id,
            capacity: RuntimeResources { cpu, memory },
            hourly_price,
        }
    }

    pub fn validate(&self) -> Result<(), PlacementError> {
        if !self.capacity.is_positive() {
            return Err(PlacementError::InvalidCatalogEntry {
                id: self.id.clone(),
                reason: format!(
                    "capacity must be positive, got cpu={} memory={}",
                    self.capacity.cpu, self.capacity.memory
                ),
            });
        }
        if !self.hourly_price.is_finite() || self.hourly_price < 0.0 {
            return Err(PlacementError::InvalidCatalogEntry {
                id: self.id.clone(),
                reason: format!("hourly price must be non-negative, got {}", self.hourly_price),
            });
        }
        Ok(())
    }

    /// Whether an empty node of this type can hold `requests`.
    pub fn can_hold(&self, requests: &RuntimeResources) -> bool {
        requests.fits(&self.capacity)
    }
}

//! Immutable catalog of node types available for scale up, and adapters reading catalog feeds.

pub mod csv_catalog;
pub mod pricing_file;
pub mod unit_pricing;

use serde::Serialize;

use crate::core::error::PlacementError;
use crate::core::node_type::NodeType;

/// Ordered list of node types. Loaded once per optimization run and never mutated.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Catalog {
    node_types: Vec<NodeType>,
}

impl Catalog {
    pub fn new(node_types: Vec<NodeType>) -> Result<Self, PlacementError> {
        if node_types.is_empty() {
            return Err(PlacementError::EmptyCatalog);
        }
        for node_type in node_types.iter() {
            node_type.validate()?;
        }
        Ok(Self { node_types })
    }

    pub fn list_types(&self) -> &[NodeType] {
        &self.node_types
    }

    pub fn find(&self, id: &str) -> Option<&NodeType> {
        self.node_types.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.node_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_types.is_empty()
    }
}

//! Pricing file format: a json object keyed by cloud provider, each value is a list of priced
//! machine types.
//!
//! ```json
//! {"gcp": [{"type": "e2-standard-2", "CPU": 2, "RAM": 8.0, "price": 0.067}]}
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::core::error::FeedError;
use crate::core::node_type::NodeType;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PricedMachineType {
    #[serde(rename = "type")]
    pub machine_type: String,
    #[serde(rename = "CPU")]
    pub cpu: f64,
    /// In GiB
    #[serde(rename = "RAM")]
    pub ram: f64,
    /// Per hour
    pub price: f64,
}

impl From<&PricedMachineType> for NodeType {
    fn from(entry: &PricedMachineType) -> Self {
        NodeType::new(entry.machine_type.clone(), entry.cpu, entry.ram, entry.price)
    }
}

impl From<&NodeType> for PricedMachineType {
    fn from(node_type: &NodeType) -> Self {
        Self {
            machine_type: node_type.id.clone(),
            cpu: node_type.capacity.cpu,
            ram: node_type.capacity.memory,
            price: node_type.hourly_price,
        }
    }
}

pub type PricingFile = BTreeMap<String, Vec<PricedMachineType>>;

pub fn catalog_from_pricing_str(pricing_json: &str, provider: &str) -> Result<Catalog, FeedError> {
    let mut pricing: PricingFile = serde_json::from_str(pricing_json)?;
    let entries = pricing
        .remove(provider)
        .ok_or_else(|| FeedError::MissingProvider(provider.to_string()))?;
    info!(
        "Initializing catalog from {:?} pricing: {} machine types",
        provider,
        entries.len()
    );
    Ok(Catalog::new(entries.iter().map(NodeType::from).collect())?)
}

pub fn read_catalog_from_pricing_file(path: &Path, provider: &str) -> Result<Catalog, FeedError> {
    let pricing_json = std::fs::read_to_string(path)?;
    catalog_from_pricing_str(&pricing_json, provider)
}

pub fn pricing_to_string(node_types: &[NodeType], provider: &str) -> Result<String, FeedError> {
    let mut pricing: PricingFile = Default::default();
    pricing.insert(
        provider.to_string(),
        node_types.iter().map(PricedMachineType::from).collect(),
    );
    Ok(serde_json::to_string(&pricing)?)
}

pub fn export_pricing_file(
    node_types: &[NodeType],
    provider: &str,
    path: &Path,
) -> Result<(), FeedError> {
    std::fs::write(path, pricing_to_string(node_types, provider)?)?;
    Ok(())
}

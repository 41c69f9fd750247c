//! Cluster snapshot format: nodes with running pods plus pending pods, as delivered by a cluster
//! poller. Converted into reusable bins and workloads for one optimizer run.

use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::core::bin::Bin;
use crate::core::error::FeedError;
use crate::core::node_type::{NodeType, UNKNOWN_NODE_TYPE};
use crate::core::workload::Workload;
use crate::snapshot::quantity::{parse_cpu, parse_memory};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct QuantityPair {
    pub cpu: String,
    pub memory: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SnapshotContainer {
    pub requests: QuantityPair,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SnapshotPod {
    pub name: String,
    pub containers: Vec<SnapshotContainer>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SnapshotNode {
    pub name: String,
    /// Instance type of the node if known.
    pub node_type: Option<String>,
    pub capacity: QuantityPair,
    #[serde(default = "ready_default")]
    pub ready: bool,
    #[serde(default)]
    pub pods: Vec<SnapshotPod>,
}

fn ready_default() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct ClusterSnapshot {
    #[serde(default)]
    pub nodes: Vec<SnapshotNode>,
    #[serde(default)]
    pub pending_pods: Vec<SnapshotPod>,
}

/// Materialized input of one optimizer run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlacementInputs {
    pub workloads: Vec<Workload>,
    pub existing_bins: Vec<Bin>,
}

impl SnapshotPod {
    /// Sums container requests into one workload.
    pub fn to_workload(&self) -> Result<Workload, FeedError> {
        let mut cpu = 0.0;
        let mut memory = 0.0;
        for container in self.containers.iter() {
            cpu += parse_cpu(&container.requests.cpu)?;
            memory += parse_memory(&container.requests.memory)?;
        }
        Ok(Workload::new(self.name.clone(), cpu, memory)?)
    }
}

impl SnapshotNode {
    /// Node type from the catalog when known (its price is what the node costs), otherwise an
    /// `unknown` free type. Capacity is always taken from the node itself.
    fn resolve_node_type(&self, catalog: &Catalog) -> Result<NodeType, FeedError> {
        let cpu = parse_cpu(&self.capacity.cpu)?;
        let memory = parse_memory(&self.capacity.memory)?;
        let node_type = match self.node_type.as_deref().and_then(|id| catalog.find(id)) {
            Some(catalog_type) => NodeType::new(
                catalog_type.id.clone(),
                cpu,
                memory,
                catalog_type.hourly_price,
            ),
            None => NodeType::new(UNKNOWN_NODE_TYPE.to_string(), cpu, memory, 0.0),
        };
        Ok(node_type)
    }

    pub fn to_bin(&self, catalog: &Catalog) -> Result<Bin, FeedError> {
        let node_type = self.resolve_node_type(catalog)?;
        let running = self
            .pods
            .iter()
            .map(|pod| pod.to_workload())
            .collect::<Result<Vec<Workload>, FeedError>>()?;
        Ok(Bin::reused(self.name.clone(), node_type, running)?)
    }
}

impl ClusterSnapshot {
    pub fn from_yaml(snapshot_yaml: &str) -> Result<Self, FeedError> {
        Ok(serde_yaml::from_str::<ClusterSnapshot>(snapshot_yaml)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, FeedError> {
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }

    /// Skips nodes that are not ready or are listed in `excluded_nodes`.
    pub fn to_placement_inputs(
        &self,
        catalog: &Catalog,
        excluded_nodes: &[String],
    ) -> Result<PlacementInputs, FeedError> {
        let mut inputs = PlacementInputs::default();
        for node in self.nodes.iter() {
            if !node.ready || excluded_nodes.contains(&node.name) {
                debug!("Skipping node {:?} (ready={})", node.name, node.ready);
                continue;
            }
            inputs.existing_bins.push(node.to_bin(catalog)?);
        }
        for pod in self.pending_pods.iter() {
            inputs.workloads.push(pod.to_workload()?);
        }
        info!(
            "Snapshot has {} usable nodes and {} pending pods",
            inputs.existing_bins.len(),
            inputs.workloads.len()
        );
        Ok(inputs)
    }
}

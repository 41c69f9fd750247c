//! Error taxonomy of the placement core and of the data feed adapters.

use thiserror::Error;

use crate::core::workload::Workload;

/// Errors that terminate one `optimize` call (or the validation step in front of it).
/// There is no partial schedule: either every workload gets a bin or one of these is returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlacementError {
    #[error("invalid workload request {name:?}: cpu={cpu}, memory={memory} (both must be positive)")]
    InvalidRequest { name: String, cpu: f64, memory: f64 },

    #[error("invalid catalog entry {id:?}: {reason}")]
    InvalidCatalogEntry { id: String, reason: String },

    #[error("no feasible placement for workload {:?} (cpu={}, memory={})", .0.name, .0.requests.cpu, .0.requests.memory)]
    NoFeasiblePlacement(Workload),

    #[error("catalog has no node types")]
    EmptyCatalog,

    #[error("existing bin {name:?} holds more than its capacity")]
    OvercommittedBin { name: String },

    #[error("invalid score weights: {0}")]
    InvalidWeights(String),

    #[error("unknown placement strategy {0:?}")]
    UnknownStrategy(String),
}

/// Failures of the catalog and cluster snapshot adapters. These never reach the optimizer.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot parse quantity {0:?}")]
    Quantity(String),

    #[error("pricing provider {0:?} not present in pricing file")]
    MissingProvider(String),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

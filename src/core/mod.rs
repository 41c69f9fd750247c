pub mod bin;
pub mod common;
pub mod error;
pub mod node_type;
pub mod schedule;
pub mod workload;

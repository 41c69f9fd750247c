//! Config fields definitions for a placement planner run

use serde::Deserialize;

use crate::optimizer::cost_aware::{ScoreWeights, COST_AWARE_WEIGHTED_SCORE};
use crate::report::printer::ReportPrinterConfig;

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PlannerConfig {
    #[serde(default = "planner_name_default")]
    pub planner_name: String,
    /// Name of placement strategy implementation. Used in `resolve_placement_strategy`.
    #[serde(default = "strategy_type_default")]
    pub strategy_type: String,
    /// Weights for cost aware scoring, ignored by other strategies.
    #[serde(default)]
    pub score_weights: ScoreWeights,
    /// If not set default output of logs is stdout/stderr
    pub logs_filepath: Option<String>,
    /// Names of cluster nodes which never receive workloads (control plane).
    #[serde(default = "excluded_nodes_default")]
    pub excluded_nodes: Vec<String>,
    /// Top level key of the pricing file to read node types from.
    #[serde(default = "pricing_provider_default")]
    pub pricing_provider: String,
    pub report_printer: Option<ReportPrinterConfig>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            planner_name: planner_name_default(),
            strategy_type: strategy_type_default(),
            score_weights: Default::default(),
            logs_filepath: None,
            excluded_nodes: excluded_nodes_default(),
            pricing_provider: pricing_provider_default(),
            report_printer: None,
        }
    }
}

impl PlannerConfig {
    pub fn from_yaml(config_yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str::<PlannerConfig>(config_yaml)
    }
}

fn planner_name_default() -> String {
    "kubepack".to_string()
}
fn strategy_type_default() -> String {
    COST_AWARE_WEIGHTED_SCORE.to_string()
}
fn excluded_nodes_default() -> Vec<String> {
    vec!["master".to_string()]
}
fn pricing_provider_default() -> String {
    "gcp".to_string()
}

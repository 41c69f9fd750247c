use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::config::PlannerConfig;
use crate::core::error::PlacementError;
use crate::optimizer::cost_aware::{CostAwareWeightedScore, COST_AWARE_WEIGHTED_SCORE};
use crate::optimizer::interface::PlacementStrategy;
use crate::optimizer::tightest_fit::{GreedyTightestFit, GREEDY_TIGHTEST_FIT};

pub type StrategyConstructor =
    fn(&PlannerConfig) -> Result<Box<dyn PlacementStrategy>, PlacementError>;

lazy_static! {
    pub static ref STRATEGY_REGISTRY: HashMap<&'static str, StrategyConstructor> = {
        HashMap::from([
            (
                GREEDY_TIGHTEST_FIT,
                new_greedy_tightest_fit as StrategyConstructor,
            ),
            (
                COST_AWARE_WEIGHTED_SCORE,
                new_cost_aware_weighted_score as StrategyConstructor,
            ),
        ])
    };
}

fn new_greedy_tightest_fit(
    _config: &PlannerConfig,
) -> Result<Box<dyn PlacementStrategy>, PlacementError> {
    Ok(Box::new(GreedyTightestFit::new()))
}

fn new_cost_aware_weighted_score(
    config: &PlannerConfig,
) -> Result<Box<dyn PlacementStrategy>, PlacementError> {
    Ok(Box::new(CostAwareWeightedScore::new(config.score_weights)?))
}

/// Builds the strategy named by `strategy_type` in the config.
pub fn resolve_placement_strategy(
    config: &PlannerConfig,
) -> Result<Box<dyn PlacementStrategy>, PlacementError> {
    let constructor = STRATEGY_REGISTRY
        .get(config.strategy_type.as_str())
        .ok_or_else(|| PlacementError::UnknownStrategy(config.strategy_type.clone()))?;
    constructor(config)
}

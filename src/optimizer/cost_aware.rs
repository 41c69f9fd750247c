//! Cost-aware best-fit-decreasing strategy.
//!
//! Every candidate, existing or new, is scored after hypothetically placing the workload:
//!
//! ```text
//! cpu_factor    = 1 - residual_cpu_after / capacity_cpu
//! memory_factor = 1 - residual_memory_after / capacity_memory
//! price_factor  = 1 - hourly_price / max_new_bin_price           (1 for existing bins)
//! score         = w_memory * memory_factor + w_cpu * cpu_factor + w_price * price_factor
//! ```
//!
//! The candidate with the highest score wins, ties go to the earlier candidate. Because
//! existing bins and new bins compete on one scale, a new bin with a much tighter fit can win
//! over reusing a half empty node.

use std::cmp::Ordering;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::error::PlacementError;
use crate::core::workload::Workload;
use crate::optimizer::interface::{Candidate, PlacementStrategy};

pub const COST_AWARE_WEIGHTED_SCORE: &str = "cost_aware_weighted_score";

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    #[serde(default = "memory_weight_default")]
    pub memory: f64,
    #[serde(default = "cpu_weight_default")]
    pub cpu: f64,
    #[serde(default = "price_weight_default")]
    pub price: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            memory: memory_weight_default(),
            cpu: cpu_weight_default(),
            price: price_weight_default(),
        }
    }
}

fn memory_weight_default() -> f64 {
    0.3
}
fn cpu_weight_default() -> f64 {
    0.2
}
fn price_weight_default() -> f64 {
    0.5
}

impl ScoreWeights {
    pub fn validate(&self) -> Result<(), PlacementError> {
        for (name, weight) in [("memory", self.memory), ("cpu", self.cpu), ("price", self.price)] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(PlacementError::InvalidWeights(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }
}

/// Per-candidate factors, all in [0, 1] for feasible candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub cpu_factor: f64,
    pub memory_factor: f64,
    pub price_factor: f64,
    pub score: f64,
}

#[derive(Clone, Debug)]
pub struct CostAwareWeightedScore {
    weights: ScoreWeights,
}

impl Default for CostAwareWeightedScore {
    fn default() -> Self {
        Self {
            weights: Default::default(),
        }
    }
}

impl CostAwareWeightedScore {
    pub fn new(weights: ScoreWeights) -> Result<Self, PlacementError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Price normalization base for one candidate set, taken over new-bin candidates only:
    /// an existing bin costs nothing extra, so its type price must not shift the scores of
    /// new bins. `None` means no price differentiation and every candidate gets factor 1.
    pub fn price_base(candidates: &[Candidate]) -> Option<f64> {
        let new_prices = || {
            candidates
                .iter()
                .filter(|c| !c.is_existing())
                .map(|c| c.hourly_price())
        };
        let max = new_prices().fold(f64::NEG_INFINITY, f64::max);
        let min = new_prices().fold(f64::INFINITY, f64::min);
        if max <= 0.0 || max == min {
            None
        } else {
            Some(max)
        }
    }

    pub fn breakdown(
        &self,
        workload: &Workload,
        candidate: &Candidate,
        price_base: Option<f64>,
    ) -> ScoreBreakdown {
        let capacity = candidate.capacity();
        let after = candidate.residual_after(workload);
        // Each factor reads the residual of its own resource.
        let cpu_factor = 1.0 - after.cpu / capacity.cpu;
        let memory_factor = 1.0 - after.memory / capacity.memory;
        let price_factor = match price_base {
            Some(max_price) if !candidate.is_existing() => {
                1.0 - candidate.hourly_price() / max_price
            }
            _ => 1.0,
        };
        let score = self.weights.memory * memory_factor
            + self.weights.cpu * cpu_factor
            + self.weights.price * price_factor;
        ScoreBreakdown {
            cpu_factor,
            memory_factor,
            price_factor,
            score,
        }
    }
}

impl PlacementStrategy for CostAwareWeightedScore {
    fn name(&self) -> &str {
        COST_AWARE_WEIGHTED_SCORE
    }

    fn compare_workloads(&self, a: &Workload, b: &Workload) -> Ordering {
        b.memory()
            .total_cmp(&a.memory())
            .then(b.cpu().total_cmp(&a.cpu()))
    }

    fn select(&self, workload: &Workload, candidates: &[Candidate]) -> usize {
        let price_base = Self::price_base(candidates);

        let mut best_idx = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (idx, candidate) in candidates.iter().enumerate() {
            let breakdown = self.breakdown(workload, candidate, price_base);
            debug!(
                "Workload {:?} candidate {:?} ({}) scored {:?}",
                workload.name, candidate.kind, candidate.node_type.id, breakdown
            );
            // strictly greater: on equal score the earlier candidate stays
            if breakdown.score > best_score {
                best_idx = idx;
                best_score = breakdown.score;
            }
        }
        best_idx
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{CostAwareWeightedScore, ScoreWeights};
    use crate::core::common::RuntimeResources;
    use crate::core::error::PlacementError;
    use crate::core::node_type::NodeType;
    use crate::core::workload::Workload;
    use crate::optimizer::interface::{Candidate, CandidateKind, PlacementStrategy};

    fn workload(cpu: f64, memory: f64) -> Workload {
        Workload::new("pod".to_string(), cpu, memory).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_orders_by_memory_then_cpu() {
        let strategy = CostAwareWeightedScore::default();
        assert_eq!(
            strategy.compare_workloads(&workload(1.0, 2.0), &workload(4.0, 2.0)),
            Ordering::Greater
        );
        assert_eq!(
            strategy.compare_workloads(&workload(1.0, 3.0), &workload(4.0, 2.0)),
            Ordering::Less
        );
    }

    #[test]
    fn test_default_weights() {
        let strategy = CostAwareWeightedScore::default();
        assert_eq!(
            strategy.weights(),
            &ScoreWeights {
                memory: 0.3,
                cpu: 0.2,
                price: 0.5
            }
        );
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let weights = ScoreWeights {
            memory: 0.3,
            cpu: -0.2,
            price: 0.5,
        };
        assert!(matches!(
            CostAwareWeightedScore::new(weights),
            Err(PlacementError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_breakdown_follows_formula() {
        let strategy = CostAwareWeightedScore::default();
        // existing bin: 4 cpu / 8 GiB, 2 cpu / 2 GiB left, priced far above any new type
        let existing_type = NodeType::new("n2-highmem".to_string(), 4.0, 8.0, 5.0);
        let cheap_type = NodeType::new("e2-medium".to_string(), 2.0, 4.0, 0.1);
        let pricey_type = NodeType::new("n2-standard".to_string(), 4.0, 8.0, 0.2);
        let candidates = vec![
            Candidate {
                kind: CandidateKind::Existing { bin_index: 0 },
                node_type: &existing_type,
                residual: RuntimeResources::new(2.0, 2.0),
            },
            Candidate {
                kind: CandidateKind::New { type_index: 0 },
                node_type: &cheap_type,
                residual: cheap_type.capacity,
            },
            Candidate {
                kind: CandidateKind::New { type_index: 1 },
                node_type: &pricey_type,
                residual: pricey_type.capacity,
            },
        ];
        let w = workload(1.0, 2.0);
        // the existing bin's type price does not count
        let base = CostAwareWeightedScore::price_base(&candidates);
        assert_eq!(base, Some(0.2));

        // existing: cpu 1 - 1/4 = 0.75, memory 1 - 0/8 = 1, price 1
        // 0.3 * 1 + 0.2 * 0.75 + 0.5 * 1 = 0.95
        let existing = strategy.breakdown(&w, &candidates[0], base);
        assert_close(existing.cpu_factor, 0.75);
        assert_close(existing.memory_factor, 1.0);
        assert_close(existing.price_factor, 1.0);
        assert_close(existing.score, 0.95);

        // cheap: cpu 1 - 1/2 = 0.5, memory 1 - 2/4 = 0.5, price 1 - 0.1/0.2 = 0.5
        // 0.3 * 0.5 + 0.2 * 0.5 + 0.5 * 0.5 = 0.5
        let cheap = strategy.breakdown(&w, &candidates[1], base);
        assert_close(cheap.price_factor, 0.5);
        assert_close(cheap.score, 0.5);

        // pricey: cpu 0.25, memory 0.25, price 0
        let pricey = strategy.breakdown(&w, &candidates[2], base);
        assert_close(pricey.price_factor, 0.0);
        assert_close(pricey.score, 0.125);

        assert_eq!(strategy.select(&w, &candidates), 0);
    }

    #[test]
    fn test_existing_bins_alone_give_no_price_base() {
        let expensive = NodeType::new("big".to_string(), 8.0, 8.0, 10.0);
        let cheap = NodeType::new("small".to_string(), 2.0, 2.0, 0.1);
        let candidates = vec![
            Candidate {
                kind: CandidateKind::Existing { bin_index: 0 },
                node_type: &expensive,
                residual: expensive.capacity,
            },
            Candidate {
                kind: CandidateKind::New { type_index: 0 },
                node_type: &cheap,
                residual: cheap.capacity,
            },
        ];
        // a single new type has nothing to be compared against
        assert_eq!(CostAwareWeightedScore::price_base(&candidates), None);
        assert_eq!(CostAwareWeightedScore::price_base(&candidates[..1]), None);
    }

    #[test]
    fn test_factors_read_their_own_resource() {
        // cpu and memory are deliberately asymmetric here. With factors computed from the
        // other resource's residual (memory factor from cpu deltas) the score would be
        // 0.3 * 0.25 + 0.2 * 0.75 + 0.5 = 0.725 instead of 0.775.
        let strategy = CostAwareWeightedScore::default();
        let node_type = NodeType::new("t".to_string(), 4.0, 4.0, 1.0);
        let candidate = Candidate {
            kind: CandidateKind::Existing { bin_index: 0 },
            node_type: &node_type,
            residual: node_type.capacity,
        };
        let breakdown = strategy.breakdown(&workload(1.0, 3.0), &candidate, None);
        assert_close(breakdown.cpu_factor, 0.25);
        assert_close(breakdown.memory_factor, 0.75);
        assert_close(breakdown.score, 0.775);
    }

    #[test]
    fn test_equal_prices_give_no_price_favoritism() {
        let a = NodeType::new("a".to_string(), 2.0, 2.0, 0.5);
        let b = NodeType::new("b".to_string(), 4.0, 4.0, 0.5);
        let candidates = vec![
            Candidate {
                kind: CandidateKind::New { type_index: 0 },
                node_type: &a,
                residual: a.capacity,
            },
            Candidate {
                kind: CandidateKind::New { type_index: 1 },
                node_type: &b,
                residual: b.capacity,
            },
        ];
        let strategy = CostAwareWeightedScore::default();
        assert_eq!(CostAwareWeightedScore::price_base(&candidates), None);
        for candidate in candidates.iter() {
            let breakdown = strategy.breakdown(&workload(1.0, 1.0), candidate, None);
            assert_close(breakdown.price_factor, 1.0);
        }
        // tighter fit wins when price does not differ
        assert_eq!(strategy.select(&workload(1.0, 1.0), &candidates), 0);
    }

    #[test]
    fn test_score_tie_goes_to_first_candidate() {
        let node_type = NodeType::new("same".to_string(), 2.0, 2.0, 0.1);
        let candidates = vec![
            Candidate {
                kind: CandidateKind::Existing { bin_index: 0 },
                node_type: &node_type,
                residual: node_type.capacity,
            },
            Candidate {
                kind: CandidateKind::Existing { bin_index: 1 },
                node_type: &node_type,
                residual: node_type.capacity,
            },
        ];
        assert_eq!(
            CostAwareWeightedScore::default().select(&workload(1.0, 1.0), &candidates),
            0
        );
    }
}

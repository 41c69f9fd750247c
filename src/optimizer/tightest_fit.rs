//! Baseline best-fit-decreasing strategy.

use std::cmp::Ordering;

use crate::core::workload::Workload;
use crate::optimizer::interface::{Candidate, PlacementStrategy};

pub const GREEDY_TIGHTEST_FIT: &str = "greedy_tightest_fit";

/// Workloads go in descending memory order. An existing bin is always preferred over a new
/// one: among existing bins the one with the least memory left after placement wins. Only
/// when nothing existing fits, the catalog type leaving the least memory (then the cheapest)
/// is opened. Ties keep candidate order.
#[derive(Clone, Debug, Default)]
pub struct GreedyTightestFit {}

impl GreedyTightestFit {
    pub fn new() -> Self {
        Self {}
    }
}

/// First index with the smallest key according to `cmp`.
fn first_min_by<I, F>(indices: I, mut cmp: F) -> Option<usize>
where
    I: Iterator<Item = usize>,
    F: FnMut(usize, usize) -> Ordering,
{
    let mut best: Option<usize> = None;
    for idx in indices {
        match best {
            Some(current) if cmp(idx, current) != Ordering::Less => {}
            _ => best = Some(idx),
        }
    }
    best
}

impl PlacementStrategy for GreedyTightestFit {
    fn name(&self) -> &str {
        GREEDY_TIGHTEST_FIT
    }

    fn compare_workloads(&self, a: &Workload, b: &Workload) -> Ordering {
        b.memory().total_cmp(&a.memory())
    }

    fn select(&self, workload: &Workload, candidates: &[Candidate]) -> usize {
        let memory_after = |idx: usize| candidates[idx].residual_after(workload).memory;

        let existing = (0..candidates.len()).filter(|&idx| candidates[idx].is_existing());
        if let Some(idx) = first_min_by(existing, |a, b| memory_after(a).total_cmp(&memory_after(b))) {
            return idx;
        }

        let new = (0..candidates.len()).filter(|&idx| !candidates[idx].is_existing());
        first_min_by(new, |a, b| {
            memory_after(a)
                .total_cmp(&memory_after(b))
                .then(candidates[a].hourly_price().total_cmp(&candidates[b].hourly_price()))
        })
        .unwrap_or(0)
    }
}

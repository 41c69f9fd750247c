//! Placement optimizer: the shared best-fit-decreasing skeleton around a placement strategy.
//!
//! One call to `optimize` works on one immutable snapshot (pending workloads, existing bins,
//! catalog) and produces one irrevocable placement batch. There is no backtracking: once a bin
//! is opened and a workload is assigned, both decisions are final for the run.

use log::{debug, info};

use crate::catalog::Catalog;
use crate::config::PlannerConfig;
use crate::core::bin::Bin;
use crate::core::error::PlacementError;
use crate::core::schedule::Schedule;
use crate::core::workload::Workload;
use crate::optimizer::interface::{Candidate, CandidateKind, PlacementStrategy};
use crate::optimizer::registry::resolve_placement_strategy;

#[derive(Clone)]
pub struct PlacementOptimizer {
    strategy: Box<dyn PlacementStrategy>,
}

impl PlacementOptimizer {
    pub fn new(strategy: Box<dyn PlacementStrategy>) -> Self {
        Self { strategy }
    }

    pub fn from_config(config: &PlannerConfig) -> Result<Self, PlacementError> {
        Ok(Self::new(resolve_placement_strategy(config)?))
    }

    pub fn strategy(&self) -> &dyn PlacementStrategy {
        self.strategy.as_ref()
    }

    pub fn optimize(
        &self,
        workloads: &[Workload],
        existing_bins: Vec<Bin>,
        catalog: &Catalog,
    ) -> Result<Schedule, PlacementError> {
        for workload in workloads.iter() {
            workload.validate()?;
        }
        for bin in existing_bins.iter() {
            bin.validate()?;
        }

        let mut sorted_workloads: Vec<&Workload> = workloads.iter().collect();
        sorted_workloads.sort_by(|a, b| self.strategy.compare_workloads(a, b));

        let mut schedule = Schedule {
            bins: existing_bins,
        };
        let mut created = 0;
        let mut ordinal = 0;

        for workload in sorted_workloads.into_iter() {
            let chosen = {
                let candidates = Self::candidates(workload, &schedule.bins, catalog);
                if candidates.is_empty() {
                    debug!("No existing bin nor catalog type can hold {:?}", workload);
                    return Err(PlacementError::NoFeasiblePlacement(workload.clone()));
                }
                candidates[self.strategy.select(workload, &candidates)].kind
            };

            let bin_index = match chosen {
                CandidateKind::Existing { bin_index } => bin_index,
                CandidateKind::New { type_index } => {
                    created += 1;
                    let node_type = catalog.list_types()[type_index].clone();
                    // created names must not collide with nodes already in the cluster
                    ordinal += 1;
                    while schedule
                        .bins
                        .iter()
                        .any(|b| b.name == Bin::created_name(&node_type, ordinal))
                    {
                        ordinal += 1;
                    }
                    schedule.bins.push(Bin::created(node_type, ordinal));
                    schedule.bins.len() - 1
                }
            };

            let bin = &mut schedule.bins[bin_index];
            debug!(
                "Workload {:?} (cpu={}, memory={}) assigned to {:?} bin {:?}",
                workload.name,
                workload.cpu(),
                workload.memory(),
                bin.origin,
                bin.name
            );
            bin.assign(workload.clone());
        }

        info!(
            "{} placed {} workloads: {} bins created, {} bins total, total cost {:.6}",
            self.strategy.name(),
            workloads.len(),
            created,
            schedule.bins.len(),
            schedule.total_cost()
        );
        Ok(schedule)
    }

    /// Existing bins with enough residual capacity (schedule order), then one hypothetical empty
    /// bin per catalog type whose raw capacity covers the workload (catalog order).
    fn candidates<'a>(
        workload: &Workload,
        bins: &'a [Bin],
        catalog: &'a Catalog,
    ) -> Vec<Candidate<'a>> {
        let existing = bins
            .iter()
            .enumerate()
            .filter(|(_, bin)| bin.fits(workload))
            .map(|(bin_index, bin)| Candidate {
                kind: CandidateKind::Existing { bin_index },
                node_type: &bin.node_type,
                residual: bin.residual(),
            });
        let new = catalog
            .list_types()
            .iter()
            .enumerate()
            .filter(|(_, node_type)| node_type.can_hold(&workload.requests))
            .map(|(type_index, node_type)| Candidate {
                kind: CandidateKind::New { type_index },
                node_type,
                residual: node_type.capacity,
            });
        existing.chain(new).collect()
    }
}

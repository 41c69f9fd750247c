//! Read-only projection of a schedule: per-bin occupancy and aggregate cost.

use average::{concatenate, Estimate, Max, Mean, Min};
use serde::Serialize;

use crate::core::bin::{Bin, BinOrigin};
use crate::core::common::RuntimeResources;
use crate::core::error::PlacementError;
use crate::core::schedule::Schedule;
use crate::core::workload::Workload;

concatenate!(Estimator, [Min, min], [Max, max], [Mean, mean]);

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BinReport {
    pub name: String,
    pub node_type: String,
    pub origin: BinOrigin,
    pub hourly_price: f64,
    pub capacity: RuntimeResources,
    pub occupied: RuntimeResources,
    /// Percent of capacity, 0..=100
    pub cpu_utilization: f64,
    pub memory_utilization: f64,
    pub workloads: Vec<Workload>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct UtilizationStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ScheduleReport {
    pub bins: Vec<BinReport>,
    pub created_bins: usize,
    pub reused_bins: usize,
    pub placed_workloads: usize,
    /// Hourly cost of created bins.
    pub total_cost: f64,
    /// None for an empty schedule.
    pub cpu_utilization: Option<UtilizationStats>,
    pub memory_utilization: Option<UtilizationStats>,
}

fn utilization_percent(occupied: f64, capacity: f64, bin: &Bin) -> Result<f64, PlacementError> {
    if capacity.is_nan() || capacity <= 0.0 {
        return Err(PlacementError::InvalidCatalogEntry {
            id: bin.node_type.id.clone(),
            reason: format!("bin {:?} has non-positive capacity {}", bin.name, capacity),
        });
    }
    Ok(100.0 * occupied / capacity)
}

fn bin_report(bin: &Bin) -> Result<BinReport, PlacementError> {
    let capacity = bin.capacity();
    let occupied = bin.used();
    Ok(BinReport {
        name: bin.name.clone(),
        node_type: bin.node_type.id.clone(),
        origin: bin.origin,
        hourly_price: bin.node_type.hourly_price,
        capacity,
        occupied,
        cpu_utilization: utilization_percent(occupied.cpu, capacity.cpu, bin)?,
        memory_utilization: utilization_percent(occupied.memory, capacity.memory, bin)?,
        workloads: bin.workloads().to_vec(),
    })
}

fn stats(values: impl Iterator<Item = f64>) -> Option<UtilizationStats> {
    let mut estimator = Estimator::new();
    let mut count = 0;
    for value in values {
        estimator.add(value);
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(UtilizationStats {
        min: estimator.min(),
        max: estimator.max(),
        mean: estimator.mean(),
    })
}

pub fn summarize(schedule: &Schedule) -> Result<ScheduleReport, PlacementError> {
    let bins = schedule
        .bins
        .iter()
        .map(bin_report)
        .collect::<Result<Vec<BinReport>, PlacementError>>()?;

    Ok(ScheduleReport {
        created_bins: schedule.created_bins().count(),
        reused_bins: schedule.reused_bins().count(),
        placed_workloads: schedule.placed_workloads(),
        total_cost: schedule.total_cost(),
        cpu_utilization: stats(bins.iter().map(|b| b.cpu_utilization)),
        memory_utilization: stats(bins.iter().map(|b| b.memory_utilization)),
        bins,
    })
}

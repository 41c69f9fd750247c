use crate::catalog::Catalog;
use crate::config::PlannerConfig;
use crate::core::bin::Bin;
use crate::core::common::{RuntimeResources, FIT_TOLERANCE};
use crate::core::node_type::NodeType;
use crate::core::schedule::Schedule;
use crate::core::workload::Workload;

pub fn default_test_planner_config(with_suffix: Option<&str>) -> PlannerConfig {
    let mut default = r#"
    planner_name: "test_kubepack"
    excluded_nodes: ["master"]
    pricing_provider: "gcp"
    "#
    .to_string();

    if let Some(suffix) = with_suffix {
        default.push_str(suffix);
    }

    PlannerConfig::from_yaml(&default).unwrap()
}

pub fn workload(name: &str, cpu: f64, memory: f64) -> Workload {
    Workload::new(name.to_string(), cpu, memory).unwrap()
}

/// Workloads named `w0`, `w1`, ... in the given order.
pub fn workloads(requests: &[(f64, f64)]) -> Vec<Workload> {
    requests
        .iter()
        .enumerate()
        .map(|(idx, (cpu, memory))| workload(&format!("w{}", idx), *cpu, *memory))
        .collect()
}

/// Catalog from `(id, cpu, memory, hourly_price)` tuples.
pub fn catalog(types: &[(&str, f64, f64, f64)]) -> Catalog {
    Catalog::new(
        types
            .iter()
            .map(|(id, cpu, memory, price)| NodeType::new(id.to_string(), *cpu, *memory, *price))
            .collect(),
    )
    .unwrap()
}

/// Existing bin of the given type already running one workload of `used` size.
pub fn reused_bin(name: &str, node_type: NodeType, used: Option<RuntimeResources>) -> Bin {
    let running = match used {
        Some(used) => vec![workload(&format!("{}-running", name), used.cpu, used.memory)],
        None => vec![],
    };
    Bin::reused(name.to_string(), node_type, running).unwrap()
}

pub fn check_bins_respect_capacity(schedule: &Schedule) {
    for bin in schedule.bins.iter() {
        let used = bin.used();
        let capacity = bin.capacity();
        assert!(
            used.cpu <= capacity.cpu + FIT_TOLERANCE,
            "bin {} uses {} cpu of {}",
            bin.name,
            used.cpu,
            capacity.cpu
        );
        assert!(
            used.memory <= capacity.memory + FIT_TOLERANCE,
            "bin {} uses {} memory of {}",
            bin.name,
            used.memory,
            capacity.memory
        );
    }
}

/// Every input workload sits in exactly one bin's newly placed workloads.
pub fn check_each_workload_placed_once(schedule: &Schedule, input: &[Workload]) {
    for workload in input.iter() {
        let occurrences: usize = schedule
            .bins
            .iter()
            .map(|bin| {
                bin.placed_workloads()
                    .iter()
                    .filter(|w| w.name == workload.name)
                    .count()
            })
            .sum();
        assert_eq!(occurrences, 1, "workload {} placed {} times", workload.name, occurrences);
    }
    assert_eq!(schedule.placed_workloads(), input.len());
}

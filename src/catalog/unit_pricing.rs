//! Builds priced node types from machine specs and per-family on-demand unit rates
//! (price of one vcpu-hour and one GiB-hour of ram).
//!
//! The family of a machine type is its name prefix before the first `-`, e.g. `n2` for
//! `n2-standard-4`.

use std::collections::BTreeMap;

use log::{info, warn};
use serde::Deserialize;

use crate::core::node_type::NodeType;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MachineSpec {
    pub name: String,
    pub vcpu: u32,
    pub memory_mb: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FamilyRates {
    pub cpu_hourly_rate: f64,
    pub ram_hourly_rate_per_gib: f64,
}

pub fn machine_family(machine_name: &str) -> &str {
    machine_name.split('-').next().unwrap_or(machine_name)
}

/// Prices every machine whose family has unit rates. When `flavor_pool` is given, only machine
/// names contained in it are priced. Output keeps the order of `machines`.
pub fn price_machine_types(
    machines: &[MachineSpec],
    rates: &BTreeMap<String, FamilyRates>,
    flavor_pool: Option<&[String]>,
) -> Vec<NodeType> {
    let mut node_types = Vec::with_capacity(machines.len());
    for machine in machines.iter() {
        if let Some(pool) = flavor_pool {
            if !pool.contains(&machine.name) {
                continue;
            }
        }
        let family = machine_family(&machine.name);
        let Some(family_rates) = rates.get(family) else {
            warn!(
                "No unit rates for family {:?}, skipping machine type {:?}",
                family, machine.name
            );
            continue;
        };
        let memory_gib = machine.memory_mb as f64 / 1024.0;
        let price = machine.vcpu as f64 * family_rates.cpu_hourly_rate
            + memory_gib * family_rates.ram_hourly_rate_per_gib;
        info!("{} calculated as {:.6}", machine.name, price);
        node_types.push(NodeType::new(
            machine.name.clone(),
            machine.vcpu as f64,
            memory_gib,
            price,
        ));
    }
    node_types
}

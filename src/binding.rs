//! Binding intents derived from a schedule. The surrounding system provisions a node for every
//! created bin and binds every newly placed workload to the node of its bin; nothing here talks
//! to an orchestrator.

use serde::Serialize;

use crate::core::bin::BinOrigin;
use crate::core::schedule::Schedule;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub enum BindingAction {
    /// Provision a node of `node_type` which will be known as `bin`.
    Provision { bin: String, node_type: String },
    /// Bind workload (pod) name to bin (node) name.
    Bind { workload: String, bin: String },
}

/// All provisions first (schedule order), then all binds (schedule order, assignment order
/// within a bin). Workloads already running on reused bins produce no intent.
pub fn binding_plan(schedule: &Schedule) -> Vec<BindingAction> {
    let mut actions: Vec<BindingAction> = Default::default();

    for bin in schedule.bins.iter() {
        if bin.origin == BinOrigin::Created {
            actions.push(BindingAction::Provision {
                bin: bin.name.clone(),
                node_type: bin.node_type.id.clone(),
            });
        }
    }
    for bin in schedule.bins.iter() {
        for workload in bin.placed_workloads() {
            actions.push(BindingAction::Bind {
                workload: workload.name.clone(),
                bin: bin.name.clone(),
            });
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::{binding_plan, BindingAction};
    use crate::core::bin::Bin;
    use crate::core::node_type::NodeType;
    use crate::core::schedule::Schedule;
    use crate::core::workload::Workload;

    #[test]
    fn test_binding_plan_skips_running_workloads() {
        let node_type = NodeType::new("e2-medium".to_string(), 2.0, 4.0, 0.03);
        let mut reused = Bin::reused(
            "worker-1".to_string(),
            node_type.clone(),
            vec![Workload::new("running".to_string(), 1.0, 1.0).unwrap()],
        )
        .unwrap();
        reused.assign(Workload::new("pending-a".to_string(), 0.5, 1.0).unwrap());
        let mut created = Bin::created(node_type, 1);
        created.assign(Workload::new("pending-b".to_string(), 1.0, 2.0).unwrap());

        let plan = binding_plan(&Schedule {
            bins: vec![reused, created],
        });
        assert_eq!(
            plan,
            vec![
                BindingAction::Provision {
                    bin: "e2-medium_1".to_string(),
                    node_type: "e2-medium".to_string()
                },
                BindingAction::Bind {
                    workload: "pending-a".to_string(),
                    bin: "worker-1".to_string()
                },
                BindingAction::Bind {
                    workload: "pending-b".to_string(),
                    bin: "e2-medium_1".to_string()
                },
            ]
        );
    }
}

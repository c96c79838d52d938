use std::collections::BTreeMap;
use std::collections::HashMap;
use std::time::Duration;

use k8s_openapi::api::core::v1::Node;
use serde::{Deserialize, Serialize};

use crate::metrics::Usage;
use crate::resources::quantity::{format_cpu, format_memory, parse_cpu, parse_memory};
use crate::resources::{calculate_age, format_duration, format_used_cpu, format_used_memory, ResourceRow};

const EKS_GROUP_LABEL: &str = "eks.amazonaws.com/nodegroup";
const KARPENTER_POOL_LABEL: &str = "karpenter.sh/nodepool";
const RESERVED_LABEL: &str = "reserved";
const CORE_SERVICES: &str = "core-services";

/// Aggregate figures for one logical node group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeGroupSummary {
    pub name: String,
    pub node_count: usize,
    pub age: Duration,
    pub cpu_used: Option<f64>,
    pub cpu_capacity: f64,
    pub mem_used: Option<u64>,
    pub mem_capacity: u64,
}

impl ResourceRow for NodeGroupSummary {
    fn name(&self) -> &str {
        &self.name
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.node_count.to_string(),
            format_duration(self.age),
            format!("{}/{}", format_used_cpu(self.cpu_used), format_cpu(self.cpu_capacity)),
            format!("{}/{}", format_used_memory(self.mem_used), format_memory(self.mem_capacity)),
        ]
    }
}

/// Which logical group a node belongs to, from its labels. EKS-managed
/// groups win over Karpenter pools, which win over the reserved
/// core-services marker; everything else lands in the `worker` pool.
pub fn group_of(node: &Node) -> String {
    let empty = BTreeMap::new();
    let labels = node.metadata.labels.as_ref().unwrap_or(&empty);

    if let Some(group) = labels.get(EKS_GROUP_LABEL) {
        return format!("eks:{group}");
    }
    if let Some(pool) = labels.get(KARPENTER_POOL_LABEL) {
        return format!("karpenter:{pool}");
    }
    if labels.get(RESERVED_LABEL).map(String::as_str) == Some(CORE_SERVICES) {
        return CORE_SERVICES.into();
    }
    "worker".into()
}

/// Fold a node listing plus usage metrics into per-group summaries,
/// sorted by group name. Utilization is derived from this snapshot only.
pub fn group_nodes(nodes: &[Node], metrics: &HashMap<String, Usage>) -> Vec<NodeGroupSummary> {
    struct Acc {
        count: usize,
        oldest: Duration,
        cpu_used: Option<f64>,
        cpu_capacity: f64,
        mem_used: Option<u64>,
        mem_capacity: u64,
    }

    let mut groups: BTreeMap<String, Acc> = BTreeMap::new();

    for node in nodes {
        let name = node.metadata.name.as_deref().unwrap_or_default();
        let usage = metrics.get(name);
        let capacity = node.status.as_ref().and_then(|s| s.capacity.as_ref());
        let cpu = capacity.and_then(|c| c.get("cpu")).and_then(|q| parse_cpu(&q.0)).unwrap_or_default();
        let mem = capacity.and_then(|c| c.get("memory")).and_then(|q| parse_memory(&q.0)).unwrap_or_default();
        let age = calculate_age(node.metadata.creation_timestamp.as_ref());

        let acc = groups.entry(group_of(node)).or_insert(Acc {
            count: 0,
            oldest: Duration::ZERO,
            cpu_used: None,
            cpu_capacity: 0.0,
            mem_used: None,
            mem_capacity: 0,
        });
        acc.count += 1;
        acc.oldest = acc.oldest.max(age);
        acc.cpu_capacity += cpu;
        acc.mem_capacity += mem;
        if let Some(u) = usage {
            acc.cpu_used = Some(acc.cpu_used.unwrap_or_default() + u.cpu_cores);
            acc.mem_used = Some(acc.mem_used.unwrap_or_default() + u.mem_bytes);
        }
    }

    groups
        .into_iter()
        .map(|(name, acc)| NodeGroupSummary {
            name,
            node_count: acc.count,
            age: acc.oldest,
            cpu_used: acc.cpu_used,
            cpu_capacity: acc.cpu_capacity,
            mem_used: acc.mem_used,
            mem_capacity: acc.mem_capacity,
        })
        .collect()
}

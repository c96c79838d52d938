use std::fmt;
use std::time::Duration;

use k8s_openapi::api::core::v1::Node;
use serde::{Deserialize, Serialize};

use crate::metrics::Usage;
use crate::resources::node_group::group_of;
use crate::resources::quantity::{format_cpu, format_memory, parse_cpu, parse_memory};
use crate::resources::{calculate_age, format_duration, format_used_cpu, format_used_memory, ResourceRow};

const INSTANCE_TYPE_LABEL: &str = "node.kubernetes.io/instance-type";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodePhase {
    Ready,
    NotReady,
    Unknown,
}

impl fmt::Display for NodePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "Ready"),
            Self::NotReady => write!(f, "NotReady"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSummary {
    pub name: String,
    pub group: String,
    pub status: NodePhase,
    pub age: Duration,
    pub instance_type: String,
    pub cpu_used: Option<f64>,
    pub cpu_capacity: f64,
    pub mem_used: Option<u64>,
    pub mem_capacity: u64,
}

impl NodeSummary {
    pub fn from_node(node: &Node, usage: Option<Usage>) -> Self {
        let metadata = &node.metadata;
        let name = metadata.name.clone().unwrap_or_default();
        let labels = metadata.labels.as_ref();

        let status = node
            .status
            .as_ref()
            .and_then(|s| s.conditions.as_ref())
            .and_then(|conds| conds.iter().find(|c| c.type_ == "Ready"))
            .map(|ready| if ready.status == "True" { NodePhase::Ready } else { NodePhase::NotReady })
            .unwrap_or(NodePhase::Unknown);

        let capacity = node.status.as_ref().and_then(|s| s.capacity.as_ref());
        let cpu_capacity =
            capacity.and_then(|c| c.get("cpu")).and_then(|q| parse_cpu(&q.0)).unwrap_or_default();
        let mem_capacity =
            capacity.and_then(|c| c.get("memory")).and_then(|q| parse_memory(&q.0)).unwrap_or_default();

        let instance_type = labels
            .and_then(|l| l.get(INSTANCE_TYPE_LABEL))
            .cloned()
            .unwrap_or_else(|| "Unknown".into());

        Self {
            name,
            group: group_of(node),
            status,
            age: calculate_age(metadata.creation_timestamp.as_ref()),
            instance_type,
            cpu_used: usage.map(|u| u.cpu_cores),
            cpu_capacity,
            mem_used: usage.map(|u| u.mem_bytes),
            mem_capacity,
        }
    }
}

impl ResourceRow for NodeSummary {
    fn name(&self) -> &str {
        &self.name
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.status.to_string(),
            format_duration(self.age),
            self.instance_type.clone(),
            format!("{}/{}", format_used_cpu(self.cpu_used), format_cpu(self.cpu_capacity)),
            format!("{}/{}", format_used_memory(self.mem_used), format_memory(self.mem_capacity)),
        ]
    }
}

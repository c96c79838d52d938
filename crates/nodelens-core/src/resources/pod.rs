use std::fmt;
use std::time::Duration;

use k8s_openapi::api::core::v1::Pod;
use serde::{Deserialize, Serialize};

use crate::metrics::Usage;
use crate::resources::{calculate_age, format_duration, format_used_cpu, format_used_memory, ResourceRow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PodPhase {
    Running,
    Pending,
    Succeeded,
    Failed,
    Unknown,
}

impl fmt::Display for PodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "Running"),
            Self::Pending => write!(f, "Pending"),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodSummary {
    pub name: String,
    pub namespace: String,
    pub node: Option<String>,
    pub phase: PodPhase,
    pub age: Duration,
    pub cpu_used: Option<f64>,
    pub mem_used: Option<u64>,
}

impl PodSummary {
    pub fn from_pod(pod: &Pod, usage: Option<Usage>) -> Self {
        let metadata = &pod.metadata;
        let name = metadata.name.clone().unwrap_or_default();
        let namespace = metadata.namespace.clone().unwrap_or_else(|| "default".into());

        let phase = pod
            .status
            .as_ref()
            .and_then(|s| s.phase.as_deref())
            .map(|p| match p {
                "Running" => PodPhase::Running,
                "Pending" => PodPhase::Pending,
                "Succeeded" => PodPhase::Succeeded,
                "Failed" => PodPhase::Failed,
                _ => PodPhase::Unknown,
            })
            .unwrap_or(PodPhase::Unknown);

        Self {
            name,
            namespace,
            node: pod.spec.as_ref().and_then(|s| s.node_name.clone()),
            phase,
            age: calculate_age(metadata.creation_timestamp.as_ref()),
            cpu_used: usage.map(|u| u.cpu_cores),
            mem_used: usage.map(|u| u.mem_bytes),
        }
    }

    /// Case-insensitive match on pod name or namespace, as the search view
    /// filters.
    pub fn matches(&self, pattern: &str) -> bool {
        let pattern = pattern.to_lowercase();
        self.name.to_lowercase().contains(&pattern) || self.namespace.to_lowercase().contains(&pattern)
    }

    /// FIELD/VALUE pairs for the pod detail listing.
    pub fn detail_fields(&self) -> Vec<(String, String)> {
        vec![
            ("Name".into(), self.name.clone()),
            ("Namespace".into(), self.namespace.clone()),
            ("Node".into(), self.node.clone().unwrap_or_else(|| "Unassigned".into())),
            ("Status".into(), self.phase.to_string()),
            ("Age".into(), format_duration(self.age)),
            ("CPU used".into(), format_used_cpu(self.cpu_used)),
            ("Memory used".into(), format_used_memory(self.mem_used)),
        ]
    }
}

impl ResourceRow for PodSummary {
    fn name(&self) -> &str {
        &self.name
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.namespace.clone(),
            self.name.clone(),
            self.node.clone().unwrap_or_else(|| "Unassigned".into()),
            self.phase.to_string(),
            format_duration(self.age),
            format_used_cpu(self.cpu_used),
            format_used_memory(self.mem_used),
        ]
    }
}

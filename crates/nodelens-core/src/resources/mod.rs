use std::time::Duration;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

pub mod node;
pub mod node_group;
pub mod pod;
pub mod quantity;

pub use node::{NodePhase, NodeSummary};
pub use node_group::NodeGroupSummary;
pub use pod::{PodPhase, PodSummary};

/// A uniform seam between typed summaries and the table-shaped view layer.
pub trait ResourceRow {
    /// Untruncated identity, shown in full on the status line.
    fn name(&self) -> &str;
    /// Display cells, one per column of the kind's table.
    fn row(&self) -> Vec<String>;
}

/// One cluster query result, tagged by resource kind. The cache stores
/// these whole; views receive read-only snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ResourcePayload {
    NodeGroups(Vec<NodeGroupSummary>),
    Nodes(Vec<NodeSummary>),
    Pods(Vec<PodSummary>),
    Contexts(Vec<ContextEntry>),
}

impl ResourcePayload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NodeGroups(_) => "node-groups",
            Self::Nodes(_) => "nodes",
            Self::Pods(_) => "pods",
            Self::Contexts(_) => "contexts",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::NodeGroups(v) => v.len(),
            Self::Nodes(v) => v.len(),
            Self::Pods(v) => v.len(),
            Self::Contexts(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named kubeconfig context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub name: String,
    pub is_current: bool,
}

pub fn calculate_age(creation: Option<&k8s_openapi::apimachinery::pkg::apis::meta::v1::Time>) -> Duration {
    creation
        .and_then(|ts| {
            let diff = Timestamp::now().since(ts.0).ok()?;
            Some(Duration::from_secs(diff.get_seconds().unsigned_abs()))
        })
        .unwrap_or_default()
}

pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}

/// Render an optional usage figure, absent metrics as an em-dash placeholder.
pub fn format_used_cpu(used: Option<f64>) -> String {
    used.map(quantity::format_cpu).unwrap_or_else(|| "—".into())
}

pub fn format_used_memory(used: Option<u64>) -> String {
    used.map(quantity::format_memory).unwrap_or_else(|| "—".into())
}

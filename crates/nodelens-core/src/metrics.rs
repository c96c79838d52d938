use std::collections::HashMap;

use serde::Deserialize;

use crate::client::KubectlClient;
use crate::error::MetricsError;
use crate::resources::quantity::{parse_cpu, parse_memory};

const NODE_METRICS_PATH: &str = "/apis/metrics.k8s.io/v1beta1/nodes";
const POD_METRICS_PATH: &str = "/apis/metrics.k8s.io/v1beta1/pods";

/// Point-in-time usage figures from the metrics API.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Usage {
    pub cpu_cores: f64,
    pub mem_bytes: u64,
}

#[derive(Deserialize)]
struct MetricsList<T> {
    #[serde(default)]
    items: Vec<T>,
}

#[derive(Deserialize, Default)]
struct ItemMeta {
    #[serde(default)]
    name: String,
    #[serde(default)]
    namespace: String,
}

#[derive(Deserialize, Default)]
struct RawUsage {
    #[serde(default)]
    cpu: String,
    #[serde(default)]
    memory: String,
}

#[derive(Deserialize, Default)]
struct NodeMetricsItem {
    metadata: ItemMeta,
    #[serde(default)]
    usage: RawUsage,
}

#[derive(Deserialize, Default)]
struct ContainerMetrics {
    #[serde(default)]
    usage: RawUsage,
}

#[derive(Deserialize, Default)]
struct PodMetricsItem {
    metadata: ItemMeta,
    #[serde(default)]
    containers: Vec<ContainerMetrics>,
}

impl RawUsage {
    fn to_usage(&self) -> Usage {
        Usage {
            cpu_cores: parse_cpu(&self.cpu).unwrap_or_default(),
            mem_bytes: parse_memory(&self.memory).unwrap_or_default(),
        }
    }
}

/// Per-node usage, keyed by node name.
pub async fn node_metrics(client: &KubectlClient) -> Result<HashMap<String, Usage>, MetricsError> {
    let raw = client.raw(NODE_METRICS_PATH).await.map_err(|e| MetricsError::Unavailable(e.to_string()))?;
    let list: MetricsList<NodeMetricsItem> =
        serde_json::from_slice(&raw).map_err(|e| MetricsError::Parse(e.to_string()))?;
    Ok(list.items.into_iter().map(|item| (item.metadata.name, item.usage.to_usage())).collect())
}

/// Per-pod usage summed over containers, keyed `namespace/name`.
pub async fn pod_metrics(client: &KubectlClient) -> Result<HashMap<String, Usage>, MetricsError> {
    let raw = client.raw(POD_METRICS_PATH).await.map_err(|e| MetricsError::Unavailable(e.to_string()))?;
    let list: MetricsList<PodMetricsItem> =
        serde_json::from_slice(&raw).map_err(|e| MetricsError::Parse(e.to_string()))?;
    Ok(list
        .items
        .into_iter()
        .map(|item| {
            let key = pod_key(&item.metadata.namespace, &item.metadata.name);
            let total = item.containers.iter().fold(Usage::default(), |acc, c| {
                let u = c.usage.to_usage();
                Usage { cpu_cores: acc.cpu_cores + u.cpu_cores, mem_bytes: acc.mem_bytes + u.mem_bytes }
            });
            (key, total)
        })
        .collect())
}

pub fn pod_key(namespace: &str, name: &str) -> String {
    format!("{namespace}/{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_metrics_payload_parses() {
        let json = br#"{
            "items": [
                {"metadata": {"name": "node-a"}, "usage": {"cpu": "1500m", "memory": "2097152Ki"}},
                {"metadata": {"name": "node-b"}, "usage": {"cpu": "<unknown>", "memory": "<unknown>"}}
            ]
        }"#;
        let list: MetricsList<NodeMetricsItem> = serde_json::from_slice(json).unwrap();
        let map: HashMap<String, Usage> =
            list.items.into_iter().map(|item| (item.metadata.name, item.usage.to_usage())).collect();
        assert_eq!(map["node-a"], Usage { cpu_cores: 1.5, mem_bytes: 2 * 1024 * 1024 * 1024 });
        assert_eq!(map["node-b"], Usage::default());
    }

    #[test]
    fn pod_metrics_sum_over_containers() {
        let json = br#"{
            "items": [
                {
                    "metadata": {"name": "web", "namespace": "shop"},
                    "containers": [
                        {"usage": {"cpu": "250m", "memory": "1Mi"}},
                        {"usage": {"cpu": "250m", "memory": "1Mi"}}
                    ]
                }
            ]
        }"#;
        let list: MetricsList<PodMetricsItem> = serde_json::from_slice(json).unwrap();
        let item = &list.items[0];
        let total = item.containers.iter().fold(Usage::default(), |acc, c| {
            let u = c.usage.to_usage();
            Usage { cpu_cores: acc.cpu_cores + u.cpu_cores, mem_bytes: acc.mem_bytes + u.mem_bytes }
        });
        assert_eq!(total, Usage { cpu_cores: 0.5, mem_bytes: 2 * 1024 * 1024 });
    }

    #[test]
    fn empty_items_tolerated() {
        let list: MetricsList<NodeMetricsItem> = serde_json::from_slice(b"{}").unwrap();
        assert!(list.items.is_empty());
    }
}

//! Composed cluster queries used by the dashboard. Each joins the kubectl
//! listing with its metrics lookup concurrently; missing metrics degrade
//! to absent usage figures rather than failing the fetch.

use std::collections::HashMap;

use crate::client::KubectlClient;
use crate::error::FetchError;
use crate::metrics::{self, Usage};
use crate::resources::node_group::group_nodes;
use crate::resources::{NodeSummary, PodSummary, ResourcePayload};

pub async fn node_groups(client: &KubectlClient) -> Result<ResourcePayload, FetchError> {
    let (nodes, metrics) = tokio::join!(client.list_nodes(), metrics::node_metrics(client));
    let nodes = nodes?;
    let metrics = usable_metrics(metrics, "node");
    Ok(ResourcePayload::NodeGroups(group_nodes(&nodes, &metrics)))
}

pub async fn nodes(client: &KubectlClient) -> Result<ResourcePayload, FetchError> {
    let (nodes, metrics) = tokio::join!(client.list_nodes(), metrics::node_metrics(client));
    let nodes = nodes?;
    let metrics = usable_metrics(metrics, "node");
    let summaries = nodes
        .iter()
        .map(|node| {
            let usage = node.metadata.name.as_deref().and_then(|name| metrics.get(name)).copied();
            NodeSummary::from_node(node, usage)
        })
        .collect();
    Ok(ResourcePayload::Nodes(summaries))
}

pub async fn pods(client: &KubectlClient) -> Result<ResourcePayload, FetchError> {
    let (pods, metrics) = tokio::join!(client.list_pods(), metrics::pod_metrics(client));
    let pods = pods?;
    let metrics = usable_metrics(metrics, "pod");
    let summaries = pods
        .iter()
        .map(|pod| {
            let usage = match (&pod.metadata.namespace, &pod.metadata.name) {
                (Some(ns), Some(name)) => metrics.get(&metrics::pod_key(ns, name)).copied(),
                _ => None,
            };
            PodSummary::from_pod(pod, usage)
        })
        .collect();
    Ok(ResourcePayload::Pods(summaries))
}

pub async fn contexts(client: &KubectlClient) -> Result<ResourcePayload, FetchError> {
    Ok(ResourcePayload::Contexts(client.list_contexts().await?))
}

fn usable_metrics(
    result: Result<HashMap<String, Usage>, crate::error::MetricsError>,
    kind: &str,
) -> HashMap<String, Usage> {
    result.unwrap_or_else(|e| {
        tracing::warn!("{kind} metrics unavailable, rendering usage as absent: {e}");
        HashMap::new()
    })
}

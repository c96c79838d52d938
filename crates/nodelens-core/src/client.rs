use std::io;

use k8s_openapi::api::core::v1::{Node, Pod};
use tokio::process::Command;

use crate::error::FetchError;
use crate::resources::ContextEntry;

/// Read-only cluster access through the kubectl binary. Every query is
/// safely re-invocable; `switch_context` is the single kubeconfig write
/// the dashboard performs.
#[derive(Debug, Default)]
pub struct KubectlClient;

impl KubectlClient {
    pub fn new() -> Self {
        Self
    }

    async fn run(&self, args: &[&str]) -> Result<Vec<u8>, FetchError> {
        tracing::debug!("running kubectl {}", args.join(" "));
        let output = Command::new("kubectl").args(args).output().await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                FetchError::KubectlMissing
            } else {
                FetchError::CommandFailed { command: command_line(args), stderr: e.to_string() }
            }
        })?;

        if !output.status.success() {
            return Err(FetchError::CommandFailed {
                command: command_line(args),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }

    async fn run_text(&self, args: &[&str]) -> Result<String, FetchError> {
        let stdout = self.run(args).await?;
        Ok(String::from_utf8_lossy(&stdout).trim().to_string())
    }

    pub async fn current_context(&self) -> Result<String, FetchError> {
        self.run_text(&["config", "current-context"]).await
    }

    pub async fn list_contexts(&self) -> Result<Vec<ContextEntry>, FetchError> {
        let names = self.run_text(&["config", "get-contexts", "-o", "name"]).await?;
        let current = self.current_context().await.unwrap_or_default();
        Ok(names
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| ContextEntry { name: name.to_string(), is_current: name == current })
            .collect())
    }

    pub async fn switch_context(&self, name: &str) -> Result<(), FetchError> {
        self.run(&["config", "use-context", name]).await?;
        Ok(())
    }

    pub async fn list_nodes(&self) -> Result<Vec<Node>, FetchError> {
        let stdout = self.run(&["get", "nodes", "-o", "json"]).await?;
        let list: k8s_openapi::List<Node> =
            serde_json::from_slice(&stdout).map_err(|e| FetchError::Parse(e.to_string()))?;
        Ok(list.items)
    }

    pub async fn list_pods(&self) -> Result<Vec<Pod>, FetchError> {
        let stdout = self.run(&["get", "pods", "--all-namespaces", "-o", "json"]).await?;
        let list: k8s_openapi::List<Pod> =
            serde_json::from_slice(&stdout).map_err(|e| FetchError::Parse(e.to_string()))?;
        Ok(list.items)
    }

    /// Raw API access, used for the metrics.k8s.io endpoints that have no
    /// kubectl resource form.
    pub async fn raw(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        self.run(&["get", "--raw", path]).await
    }
}

fn command_line(args: &[&str]) -> String {
    format!("kubectl {}", args.join(" "))
}

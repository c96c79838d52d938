use std::fmt;

/// Failure of a kubectl invocation. Recoverable at the refresh layer via
/// stale-cache fallback; only a missing binary at startup is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    KubectlMissing,
    CommandFailed { command: String, stderr: String },
    Parse(String),
    Interrupted,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KubectlMissing => write!(f, "kubectl not found in PATH"),
            Self::CommandFailed { command, stderr } => {
                if stderr.is_empty() {
                    write!(f, "`{command}` failed")
                } else {
                    write!(f, "`{command}` failed: {stderr}")
                }
            }
            Self::Parse(msg) => write!(f, "failed to parse kubectl output: {msg}"),
            Self::Interrupted => write!(f, "fetch interrupted before completion"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Metrics-server trouble is partial degradation, never fatal: callers
/// proceed without usage figures and the UI renders them as absent.
#[derive(Debug, Clone)]
pub enum MetricsError {
    Unavailable(String),
    Parse(String),
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "metrics unavailable: {msg}"),
            Self::Parse(msg) => write!(f, "failed to parse metrics: {msg}"),
        }
    }
}

impl std::error::Error for MetricsError {}

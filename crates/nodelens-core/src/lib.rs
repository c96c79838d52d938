pub mod cache;
pub mod client;
pub mod context;
pub mod error;
pub mod fetch;
pub mod metrics;
pub mod refresh;
pub mod resources;

pub use cache::{Lookup, PayloadCache};
pub use client::KubectlClient;
pub use context::{keys, ContextTracker};
pub use error::{FetchError, MetricsError};
pub use metrics::Usage;
pub use refresh::{Refresher, Served};
pub use resources::{ContextEntry, NodeGroupSummary, NodePhase, NodeSummary, PodPhase, PodSummary, ResourcePayload, ResourceRow};

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::cache::{Lookup, PayloadCache};
use crate::error::FetchError;
use crate::resources::ResourcePayload;

/// Where an `ensure` result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Served {
    FreshCache,
    Refetched,
    StaleFallback,
}

type FetchSlot = Option<Result<ResourcePayload, FetchError>>;

enum Role {
    Leader(watch::Sender<FetchSlot>),
    Follower(watch::Receiver<FetchSlot>),
}

/// Decides between cache and refetch, and guarantees at most one fetch in
/// flight per key: concurrent callers attach to the pending result instead
/// of spawning a duplicate subprocess.
pub struct Refresher {
    cache: Arc<PayloadCache>,
    in_flight: Mutex<HashMap<String, watch::Receiver<FetchSlot>>>,
}

impl Refresher {
    pub fn new(cache: Arc<PayloadCache>) -> Self {
        Self { cache, in_flight: Mutex::new(HashMap::new()) }
    }

    pub fn cache(&self) -> &PayloadCache {
        &self.cache
    }

    /// Serve `key` from the cache when fresh, otherwise run `fetch` and
    /// store the result. A fetch failure falls back to a retained stale
    /// entry; only a failure with nothing cached at all propagates.
    pub async fn ensure<F, Fut>(&self, key: &str, fetch: F) -> Result<(ResourcePayload, Served), FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ResourcePayload, FetchError>>,
    {
        if let Lookup::Fresh(payload) = self.cache.get(key) {
            return Ok((payload, Served::FreshCache));
        }

        let role = {
            let mut in_flight = self.in_flight.lock().await;
            match in_flight.get(key) {
                Some(rx) => Role::Follower(rx.clone()),
                None => {
                    let (tx, rx) = watch::channel(None);
                    in_flight.insert(key.to_string(), rx);
                    Role::Leader(tx)
                }
            }
        };

        match role {
            Role::Leader(tx) => {
                let result = fetch().await;
                // Update the cache before waking followers, so a `get`
                // issued after either caller returns observes the payload.
                if let Ok(payload) = &result {
                    self.cache.put(key, payload.clone());
                }
                self.in_flight.lock().await.remove(key);
                let _ = tx.send(Some(result.clone()));
                self.settle(key, result)
            }
            Role::Follower(mut rx) => {
                let result = match rx.wait_for(|slot| slot.is_some()).await {
                    Ok(slot) => slot.clone().unwrap_or(Err(FetchError::Interrupted)),
                    Err(_) => Err(FetchError::Interrupted),
                };
                self.settle(key, result)
            }
        }
    }

    /// Manual refresh: invalidate first so the cache cannot satisfy the
    /// request, then go through `ensure` — which still attaches to an
    /// in-flight fetch rather than issuing a duplicate.
    pub async fn refresh<F, Fut>(&self, key: &str, fetch: F) -> Result<(ResourcePayload, Served), FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ResourcePayload, FetchError>>,
    {
        self.cache.invalidate(key);
        self.ensure(key, fetch).await
    }

    fn settle(
        &self,
        key: &str,
        result: Result<ResourcePayload, FetchError>,
    ) -> Result<(ResourcePayload, Served), FetchError> {
        match result {
            Ok(payload) => Ok((payload, Served::Refetched)),
            Err(err) => match self.cache.get(key) {
                Lookup::Fresh(payload) | Lookup::Stale(payload) => {
                    tracing::warn!("fetch for {key} failed, serving last cached data: {err}");
                    Ok((payload, Served::StaleFallback))
                }
                Lookup::Absent => Err(err),
            },
        }
    }
}

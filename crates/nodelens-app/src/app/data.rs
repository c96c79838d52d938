use nodelens_core::{fetch, keys, ContextTracker, NodeSummary, ResourcePayload, Served};
use nodelens_tui::widgets::notice::Notice;

use crate::event::{AppEvent, DataEvent};
use crate::view::{DetailContent, DetailRequest, MainView, SearchPhase, View};

use super::App;

impl App {
    pub(super) fn request_node_groups(&mut self, force: bool) {
        let key = self.context.scoped_key(keys::NODE_GROUPS);
        let refresher = self.refresher.clone();
        let client = self.client.clone();
        let tx = self.app_tx.clone();
        tokio::spawn(async move {
            let fetch = move || async move { fetch::node_groups(client.as_ref()).await };
            let result =
                if force { refresher.refresh(&key, fetch).await } else { refresher.ensure(&key, fetch).await };
            let _ = tx.send(AppEvent::Data(DataEvent::NodeGroups { result }));
        });
    }

    pub(super) fn request_nodes(&mut self) {
        let key = self.context.scoped_key(keys::NODES);
        let refresher = self.refresher.clone();
        let client = self.client.clone();
        let tx = self.app_tx.clone();
        tokio::spawn(async move {
            let fetch = move || async move { fetch::nodes(client.as_ref()).await };
            let result = refresher.ensure(&key, fetch).await;
            let _ = tx.send(AppEvent::Data(DataEvent::Nodes { result }));
        });
    }

    pub(super) fn request_pods(&mut self, pattern: String) {
        let key = self.context.scoped_key(keys::PODS);
        let refresher = self.refresher.clone();
        let client = self.client.clone();
        let tx = self.app_tx.clone();
        tokio::spawn(async move {
            let fetch = move || async move { fetch::pods(client.as_ref()).await };
            let result = refresher.ensure(&key, fetch).await;
            let _ = tx.send(AppEvent::Data(DataEvent::Pods { pattern, result }));
        });
    }

    pub(super) fn request_contexts(&mut self) {
        let key = keys::CONTEXTS.to_string();
        let refresher = self.refresher.clone();
        let client = self.client.clone();
        let tx = self.app_tx.clone();
        tokio::spawn(async move {
            let fetch = move || async move { fetch::contexts(client.as_ref()).await };
            let result = refresher.ensure(&key, fetch).await;
            let _ = tx.send(AppEvent::Data(DataEvent::Contexts { result }));
        });
    }

    pub(super) fn request_switch(&mut self, context: String) {
        let client = self.client.clone();
        let tx = self.app_tx.clone();
        tokio::spawn(async move {
            let result = client.switch_context(&context).await;
            let _ = tx.send(AppEvent::Data(DataEvent::ContextSwitched { context, result }));
        });
    }

    /// Apply a fetch completion to the view it targets. Results for a view
    /// the operator already left are dropped here; the cache has kept them
    /// regardless, so nothing is wasted.
    pub(super) fn handle_data(&mut self, data: DataEvent) {
        let mut notice = None;

        match data {
            DataEvent::NodeGroups { result } => {
                if let View::Main(main) = &mut self.view {
                    match result {
                        Ok((ResourcePayload::NodeGroups(groups), served)) => {
                            main.cursor.clamp(groups.len());
                            main.groups = groups;
                            main.loading = false;
                            main.error = None;
                            main.served = Some(served);
                            notice = stale_notice(served, self.notice_ttl);
                        }
                        Ok((other, _)) => {
                            tracing::error!("unexpected payload kind {} for node groups", other.kind());
                        }
                        Err(e) => {
                            main.loading = false;
                            if main.groups.is_empty() {
                                main.error = Some(e.to_string());
                            } else {
                                notice =
                                    Some(Notice::error(format!("refresh failed: {e}"), self.notice_ttl));
                            }
                        }
                    }
                }
            }
            DataEvent::Nodes { result } => {
                if let View::Detail(detail) = &mut self.view {
                    if let Some(request) = detail.request.clone() {
                        match result {
                            Ok((ResourcePayload::Nodes(all), served)) => {
                                let nodes: Vec<NodeSummary> = match &request {
                                    DetailRequest::GroupNodes { group } => {
                                        all.into_iter().filter(|n| &n.group == group).collect()
                                    }
                                    DetailRequest::HostNode { node } => {
                                        all.into_iter().filter(|n| &n.name == node).collect()
                                    }
                                };
                                detail.cursor.clamp(nodes.len());
                                detail.content = DetailContent::Nodes(nodes);
                                detail.loading = false;
                                detail.error = None;
                                detail.served = Some(served);
                                notice = stale_notice(served, self.notice_ttl);
                            }
                            Ok((other, _)) => {
                                tracing::error!("unexpected payload kind {} for nodes", other.kind());
                            }
                            Err(e) => {
                                detail.loading = false;
                                detail.error = Some(e.to_string());
                            }
                        }
                    }
                }
            }
            DataEvent::Pods { pattern, result } => {
                if let View::PodSearch(search) = &mut self.view {
                    if search.phase == SearchPhase::Results && search.pattern == pattern {
                        match result {
                            Ok((ResourcePayload::Pods(all), served)) => {
                                let results: Vec<_> =
                                    all.into_iter().filter(|p| p.matches(&pattern)).collect();
                                search.cursor.clamp(results.len());
                                search.results = results;
                                search.loading = false;
                                search.error = None;
                                search.served = Some(served);
                                notice = stale_notice(served, self.notice_ttl);
                            }
                            Ok((other, _)) => {
                                tracing::error!("unexpected payload kind {} for pods", other.kind());
                            }
                            Err(e) => {
                                search.loading = false;
                                search.error = Some(e.to_string());
                            }
                        }
                    }
                }
            }
            DataEvent::Contexts { result } => {
                if let View::ContextSelect(select) = &mut self.view {
                    match result {
                        Ok((ResourcePayload::Contexts(contexts), _)) => {
                            select.cursor.selected = contexts
                                .iter()
                                .position(|c| c.is_current)
                                .or_else(|| (!contexts.is_empty()).then_some(0));
                            select.contexts = contexts;
                            select.loading = false;
                            select.error = None;
                        }
                        Ok((other, _)) => {
                            tracing::error!("unexpected payload kind {} for contexts", other.kind());
                        }
                        Err(e) => {
                            select.loading = false;
                            select.error = Some(e.to_string());
                        }
                    }
                }
            }
            DataEvent::ContextSwitched { context, result } => match result {
                Ok(()) => {
                    let old = self.context.switch(context.clone());
                    self.cache.invalidate_prefix(&ContextTracker::prefix_for(&old));
                    self.view = View::Main(MainView::loading());
                    notice = Some(Notice::info(format!("switched to context {context}"), self.notice_ttl));
                    self.request_node_groups(false);
                }
                Err(e) => {
                    if let View::ContextSelect(select) = &mut self.view {
                        select.loading = false;
                    }
                    notice =
                        Some(Notice::error(format!("failed to switch context {context}: {e}"), self.notice_ttl));
                }
            },
        }

        if let Some(notice) = notice {
            self.notices.push(notice);
        }
        self.dirty = true;
    }
}

fn stale_notice(served: Served, ttl: std::time::Duration) -> Option<Notice> {
    (served == Served::StaleFallback)
        .then(|| Notice::warning("cluster unreachable, showing cached data", ttl))
}

use std::sync::Arc;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use nodelens_config::AppConfig;
use nodelens_core::{
    keys, ContextTracker, FetchError, KubectlClient, PayloadCache, Refresher, ResourceRow, Served,
};
use nodelens_tui::layout::{ContextSelectData, RenderContext, SearchData, TableData};
use nodelens_tui::widgets::notice::Notice;

use crate::event::{AppEvent, EventHandler};
use crate::view::{DetailContent, MainView, SearchPhase, View};

mod data;
mod input;

/// Resolve the cluster context, wire up cache and coordinator, and run the
/// dashboard until the operator quits.
pub async fn run(config: &AppConfig, terminal: &mut Terminal<impl Backend>) -> anyhow::Result<()> {
    let client = Arc::new(KubectlClient::new());
    let context = match client.current_context().await {
        Ok(ctx) => ctx,
        Err(FetchError::KubectlMissing) => {
            anyhow::bail!("kubectl not found in PATH; nodelens cannot reach the cluster")
        }
        Err(e) => {
            tracing::warn!("could not resolve current context, using \"default\": {e}");
            "default".to_string()
        }
    };

    let ttl = Duration::from_secs(config.cache.ttl_secs);
    let cache = if config.cache.enabled {
        PayloadCache::with_disk(ttl, config.cache.resolve_dir())
    } else {
        PayloadCache::new(ttl)
    };

    let mut app = App::new(config, context, client, Arc::new(cache));
    app.run(terminal).await
}

pub struct App {
    running: bool,
    /// A frame is committed only when something changed; ticks mark this
    /// too, which is what bounds the periodic repaint rate.
    dirty: bool,
    /// Set on resize: the next frame repaints from scratch instead of
    /// diffing against cells from the old dimensions.
    force_clear: bool,
    view: View,
    context: ContextTracker,
    client: Arc<KubectlClient>,
    cache: Arc<PayloadCache>,
    refresher: Arc<Refresher>,
    notices: Vec<Notice>,
    notice_ttl: Duration,
    tick_rate: Duration,
    poll_timeout: Duration,
    app_tx: mpsc::UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(config: &AppConfig, context: String, client: Arc<KubectlClient>, cache: Arc<PayloadCache>) -> Self {
        let refresher = Arc::new(Refresher::new(cache.clone()));
        let (tx, _rx) = mpsc::unbounded_channel();

        Self {
            running: true,
            dirty: true,
            force_clear: false,
            view: View::Main(MainView::loading()),
            context: ContextTracker::new(context),
            client,
            cache,
            refresher,
            notices: Vec::new(),
            notice_ttl: Duration::from_secs(config.general.notice_ttl_secs),
            tick_rate: Duration::from_millis(config.general.tick_rate_ms),
            poll_timeout: Duration::from_millis(config.general.poll_timeout_ms),
            app_tx: tx,
        }
    }

    pub async fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> anyhow::Result<()> {
        let mut events = EventHandler::new(self.tick_rate, self.poll_timeout);
        self.app_tx = events.app_tx();

        self.request_node_groups(false);
        self.request_contexts();

        while self.running {
            if self.dirty {
                if self.force_clear {
                    terminal.clear()?;
                    self.force_clear = false;
                }
                let ctx = self.build_render_context();
                terminal.draw(|frame| nodelens_tui::layout::render_root(frame, &ctx))?;
                self.dirty = false;
            }

            let first = events.next().await?;
            self.handle_event(first);

            for event in events.drain_pending() {
                if !self.running {
                    break;
                }
                self.handle_event(event);
            }
        }

        Ok(())
    }

    fn build_render_context(&self) -> RenderContext {
        let notice = self.notices.iter().rev().find(|n| !n.is_expired()).cloned();
        let mut ctx = RenderContext {
            context_name: self.context.name().to_string(),
            view_name: self.view.name().to_string(),
            hints: Some(hints_for(&self.view).to_string()),
            table: None,
            search: None,
            context_select: None,
            selection: None,
            freshness: None,
            notice,
        };

        match &self.view {
            View::Main(main) => {
                ctx.table = Some(TableData {
                    title: "Node Groups".into(),
                    headers: vec!["NAME", "NODES", "AGE", "CPU (used/total)", "MEMORY (used/total)"],
                    rows: main.groups.iter().map(|g| g.row()).collect(),
                    selected: main.cursor.selected,
                    loading: main.loading,
                    error: main.error.clone(),
                    empty_message: "No node groups found".into(),
                    status_column: None,
                });
                ctx.selection =
                    main.cursor.selected.and_then(|i| main.groups.get(i)).map(|g| g.name().to_string());
                ctx.freshness = self.freshness(keys::NODE_GROUPS, main.served);
            }
            View::PodSearch(search) => {
                ctx.search = Some(SearchData {
                    pattern: search.pattern.clone(),
                    typing: search.phase == SearchPhase::Typing,
                });
                ctx.table = Some(TableData {
                    title: format!("Pods matching '{}'", search.pattern),
                    headers: vec!["NAMESPACE", "NAME", "NODE", "STATUS", "AGE", "CPU", "MEMORY"],
                    rows: search.results.iter().map(|p| p.row()).collect(),
                    selected: search.cursor.selected,
                    loading: search.loading,
                    error: search.error.clone(),
                    empty_message: match search.phase {
                        SearchPhase::Typing => "Type a pattern and press Enter".into(),
                        SearchPhase::Results => "No pods matched the search pattern".into(),
                    },
                    status_column: Some(3),
                });
                ctx.selection =
                    search.cursor.selected.and_then(|i| search.results.get(i)).map(|p| p.name().to_string());
                ctx.freshness = self.freshness(keys::PODS, search.served);
            }
            View::ContextSelect(select) => {
                ctx.context_select = Some(ContextSelectData {
                    contexts: select.contexts.iter().map(|c| (c.name.clone(), c.is_current)).collect(),
                    selected: select.cursor.selected,
                    loading: select.loading,
                });
                ctx.selection =
                    select.cursor.selected.and_then(|i| select.contexts.get(i)).map(|c| c.name.clone());
            }
            View::Detail(detail) => {
                let (headers, rows, status_column, empty): (Vec<&'static str>, Vec<Vec<String>>, _, &str) =
                    match &detail.content {
                        DetailContent::Nodes(nodes) => (
                            vec!["NAME", "STATUS", "AGE", "INSTANCE TYPE", "CPU (used/total)", "MEMORY (used/total)"],
                            nodes.iter().map(|n| n.row()).collect(),
                            Some(1),
                            "No nodes found",
                        ),
                        DetailContent::PodFields(fields) => (
                            vec!["FIELD", "VALUE"],
                            fields.iter().map(|(k, v)| vec![k.clone(), v.clone()]).collect(),
                            None,
                            "No details available",
                        ),
                    };
                ctx.table = Some(TableData {
                    title: detail.title.clone(),
                    headers,
                    rows,
                    selected: detail.cursor.selected,
                    loading: detail.loading,
                    error: detail.error.clone(),
                    empty_message: empty.into(),
                    status_column,
                });
                ctx.selection = detail.cursor.selected.and_then(|i| match &detail.content {
                    DetailContent::Nodes(nodes) => nodes.get(i).map(|n| n.name().to_string()),
                    DetailContent::PodFields(fields) => fields.get(i).map(|(_, v)| v.clone()),
                });
                ctx.freshness = self.freshness(
                    match detail.content {
                        DetailContent::Nodes(_) => keys::NODES,
                        DetailContent::PodFields(_) => keys::PODS,
                    },
                    detail.served,
                );
            }
        }

        ctx
    }

    /// "updated HH:MM:SS · origin" for the status line, from the cache
    /// timestamp of the key backing the current view.
    fn freshness(&self, kind: &str, served: Option<Served>) -> Option<String> {
        let stamp = self.cache.last_updated(&self.context.scoped_key(kind))?;
        let origin = match served? {
            Served::FreshCache => "cached",
            Served::Refetched => "live",
            Served::StaleFallback => "stale",
        };
        let local = stamp.to_zoned(jiff::tz::TimeZone::system());
        Some(format!("updated {} · {origin}", local.strftime("%H:%M:%S")))
    }

    fn take_view(&mut self) -> View {
        std::mem::replace(&mut self.view, View::Main(MainView::empty()))
    }
}

fn hints_for(view: &View) -> &'static str {
    match view {
        View::Main(_) => "↑↓ navigate  Enter nodes  s search  c context  r refresh  q quit",
        View::PodSearch(search) if search.phase == SearchPhase::Typing => "Enter search  Esc cancel",
        View::PodSearch(_) => "Enter/d describe  n node  q back",
        View::ContextSelect(_) => "Enter switch  q back",
        View::Detail(_) => "↑↓ scroll  q back",
    }
}

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;

use nodelens_core::{FetchError, ResourcePayload, Served};

pub type FetchOutcome = Result<(ResourcePayload, Served), FetchError>;

/// Completion of a background fetch, delivered into the event queue by the
/// task that ran it.
#[derive(Debug)]
pub enum DataEvent {
    NodeGroups { result: FetchOutcome },
    Nodes { result: FetchOutcome },
    Pods { pattern: String, result: FetchOutcome },
    Contexts { result: FetchOutcome },
    ContextSwitched { context: String, result: Result<(), FetchError> },
}

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
    Data(DataEvent),
}

/// Multiplexes the tick interval and a bounded-wait keyboard poll into one
/// queue. Fetch tasks get a sender clone via [`EventHandler::app_tx`] so
/// their results arrive through the same channel.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, poll_timeout: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let loop_tx = tx.clone();
        tokio::spawn(async move {
            let mut tick_interval = tokio::time::interval(tick_rate);
            loop {
                let event = tokio::select! {
                    _ = tick_interval.tick() => AppEvent::Tick,
                    maybe = poll_crossterm_event(poll_timeout) => match maybe {
                        Some(e) => e,
                        None => continue,
                    },
                };
                if loop_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    pub fn app_tx(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> anyhow::Result<AppEvent> {
        self.rx.recv().await.ok_or_else(|| anyhow::anyhow!("Event channel closed"))
    }

    /// Everything already queued, without waiting. Coalesces bursts of
    /// input and data arrivals into a single redraw.
    pub fn drain_pending(&mut self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

async fn poll_crossterm_event(timeout: Duration) -> Option<AppEvent> {
    let event = tokio::task::spawn_blocking(move || {
        if event::poll(timeout).ok()? {
            event::read().ok()
        } else {
            None
        }
    })
    .await
    .ok()??;

    match event {
        Event::Key(key) => Some(AppEvent::Key(key)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

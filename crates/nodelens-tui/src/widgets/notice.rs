use std::time::{Duration, Instant};

use ratatui::style::{Color, Style};

use crate::theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A transient status-line message: stale-data banners, fetch failures,
/// context-switch confirmations. Expires after its TTL; any newer notice
/// replaces it visually.
#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    created_at: Instant,
    ttl: Duration,
}

impl Notice {
    pub fn info(text: impl Into<String>, ttl: Duration) -> Self {
        Self { text: text.into(), level: NoticeLevel::Info, created_at: Instant::now(), ttl }
    }

    pub fn warning(text: impl Into<String>, ttl: Duration) -> Self {
        Self { text: text.into(), level: NoticeLevel::Warning, created_at: Instant::now(), ttl }
    }

    pub fn error(text: impl Into<String>, ttl: Duration) -> Self {
        Self { text: text.into(), level: NoticeLevel::Error, created_at: Instant::now(), ttl }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }

    pub fn style(&self) -> Style {
        let color = match self.level {
            NoticeLevel::Info => theme::ACCENT,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        Style::default().fg(color)
    }
}

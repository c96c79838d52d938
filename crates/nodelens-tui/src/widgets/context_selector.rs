use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use crate::theme;

/// Centered popup listing kubeconfig contexts; the active one carries a
/// `*` marker.
pub struct ContextSelectorWidget<'a> {
    pub contexts: &'a [(String, bool)],
    pub selected: Option<usize>,
    pub loading: bool,
}

impl<'a> ContextSelectorWidget<'a> {
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let popup_width = (area.width / 2).clamp(24, 60).min(area.width);
        let popup_height = (area.height * 3 / 5).clamp(5, 30).min(area.height);
        let popup_area = Rect {
            x: area.x + (area.width.saturating_sub(popup_width)) / 2,
            y: area.y + (area.height.saturating_sub(popup_height)) / 2,
            width: popup_width,
            height: popup_height,
        };

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(" Select Context ")
            .title_style(Style::default().fg(theme::ACCENT).bold())
            .style(Style::default().bg(theme::OVERLAY_BG));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        if self.loading {
            let msg = Paragraph::new("Loading contexts...").style(Style::default().fg(theme::TEXT_DIM));
            frame.render_widget(msg, chunks[0]);
        } else if self.contexts.is_empty() {
            let msg = Paragraph::new("No contexts found").style(Style::default().fg(theme::TEXT_DIM));
            frame.render_widget(msg, chunks[0]);
        } else {
            let items: Vec<ListItem> = self
                .contexts
                .iter()
                .map(|(name, is_current)| {
                    let marker = if *is_current { "*" } else { " " };
                    ListItem::new(format!(" {marker} {name}")).style(Style::default().fg(theme::HEADER_FG))
                })
                .collect();

            let list = List::new(items)
                .highlight_style(Style::default().bg(theme::SELECTION_BG).add_modifier(Modifier::BOLD));
            let mut state = ListState::default().with_selected(self.selected);
            frame.render_stateful_widget(list, chunks[0], &mut state);
        }

        let hints = Paragraph::new(" Enter:switch  q:back").style(Style::default().fg(theme::TEXT_DIM));
        frame.render_widget(hints, chunks[1]);
    }
}

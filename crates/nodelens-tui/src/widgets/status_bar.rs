use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::theme;
use crate::widgets::notice::Notice;

/// One-line footer: active view, context, the untruncated name of the
/// selected row, and on the right either the newest notice or the data
/// freshness marker.
pub struct StatusBarWidget<'a> {
    pub view: &'a str,
    pub context: &'a str,
    pub selection: Option<&'a str>,
    pub freshness: Option<&'a str>,
    pub notice: Option<&'a Notice>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let sep = Style::default().fg(theme::BORDER_COLOR);
        let dim = Style::default().fg(theme::TEXT_DIM);

        let mut spans = vec![Span::styled(
            format!(" {} ", self.view.to_uppercase()),
            Style::default().fg(theme::HEADER_BG).bg(theme::ACCENT).add_modifier(Modifier::BOLD),
        )];

        spans.push(Span::styled(" │ ", sep));
        spans.push(Span::styled(self.context.to_string(), dim));

        if let Some(selection) = self.selection {
            spans.push(Span::styled(" │ ", sep));
            spans.push(Span::styled(selection.to_string(), Style::default().fg(theme::HEADER_FG)));
        }

        let right = match self.notice {
            Some(notice) => Span::styled(format!("{} ", notice.text), notice.style()),
            None => match self.freshness {
                Some(freshness) => Span::styled(format!("{freshness} "), dim),
                None => Span::raw(""),
            },
        };

        let left_used: usize = spans.iter().map(|s| s.width()).sum();
        let fill = (area.width as usize).saturating_sub(left_used + right.width());
        if fill > 0 {
            spans.push(Span::raw(" ".repeat(fill)));
        }
        spans.push(right);

        let bar = Paragraph::new(Line::from(spans));
        frame.render_widget(bar, area);
    }
}

#[cfg(test)]
mod tests;

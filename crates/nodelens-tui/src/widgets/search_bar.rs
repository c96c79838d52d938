use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::theme;

/// The pod-search input line. While typing, a block cursor trails the
/// pattern; once submitted the bar stays visible above the results.
pub struct SearchBarWidget<'a> {
    pub pattern: &'a str,
    pub typing: bool,
}

impl<'a> SearchBarWidget<'a> {
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" Search: ", Style::default().fg(theme::TEXT_DIM)),
            Span::styled(self.pattern.to_string(), Style::default().fg(theme::ACCENT)),
        ];
        if self.typing {
            spans.push(Span::styled("█", Style::default().fg(theme::ACCENT)));
            spans.push(Span::styled("  (Enter:search  Esc:cancel)", Style::default().fg(theme::TEXT_DIM)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(pattern: &str, typing: bool) -> String {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                SearchBarWidget { pattern, typing }.render(frame, area);
            })
            .unwrap();
        terminal.backend().buffer().content().iter().map(|c| c.symbol().chars().next().unwrap_or(' ')).collect()
    }

    #[test]
    fn typing_mode_shows_cursor_and_hints() {
        let text = render("nginx", true);
        assert!(text.contains("Search: nginx█"));
        assert!(text.contains("Esc:cancel"));
    }

    #[test]
    fn submitted_pattern_renders_without_cursor() {
        let text = render("nginx", false);
        assert!(text.contains("Search: nginx"));
        assert!(!text.contains('█'));
    }
}

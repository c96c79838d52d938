use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::theme;
use crate::widgets::context_selector::ContextSelectorWidget;
use crate::widgets::notice::Notice;
use crate::widgets::search_bar::SearchBarWidget;
use crate::widgets::status_bar::StatusBarWidget;
use crate::widgets::summary_table::SummaryTable;

pub struct TableData {
    pub title: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    pub selected: Option<usize>,
    pub loading: bool,
    pub error: Option<String>,
    pub empty_message: String,
    pub status_column: Option<usize>,
}

pub struct SearchData {
    pub pattern: String,
    pub typing: bool,
}

pub struct ContextSelectData {
    pub contexts: Vec<(String, bool)>,
    pub selected: Option<usize>,
    pub loading: bool,
}

/// Everything one frame needs, assembled by the app from the active view.
pub struct RenderContext {
    pub context_name: String,
    pub view_name: String,
    pub hints: Option<String>,
    pub table: Option<TableData>,
    pub search: Option<SearchData>,
    pub context_select: Option<ContextSelectData>,
    pub selection: Option<String>,
    pub freshness: Option<String>,
    pub notice: Option<Notice>,
}

pub fn render_root(frame: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    render_header(frame, chunks[0], ctx);
    render_body(frame, chunks[1], ctx);
    render_status_bar(frame, chunks[2], ctx);
}

fn render_header(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let mut spans = vec![
        Span::styled(" nodelens ", Style::default().fg(theme::HEADER_BG).bg(theme::ACCENT).bold()),
        Span::styled(
            format!(" context: {} ", ctx.context_name),
            Style::default().fg(theme::HEADER_FG).bg(theme::HEADER_BG),
        ),
    ];
    if let Some(hints) = &ctx.hints {
        spans.push(Span::styled(
            format!("· {hints}"),
            Style::default().fg(theme::TEXT_DIM).bg(theme::HEADER_BG),
        ));
    }
    let fill = Style::default().bg(theme::HEADER_BG);
    frame.render_widget(Paragraph::new(Line::from(spans)).style(fill), area);
}

fn render_body(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let mut table_area = area;

    if let Some(search) = &ctx.search {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        SearchBarWidget { pattern: &search.pattern, typing: search.typing }.render(frame, chunks[0]);
        table_area = chunks[1];
    }

    if let Some(table) = &ctx.table {
        let widget = SummaryTable {
            title: &table.title,
            headers: &table.headers,
            rows: &table.rows,
            selected: table.selected,
            loading: table.loading,
            error: table.error.as_deref(),
            empty_message: &table.empty_message,
            status_column: table.status_column,
        };
        widget.render(frame, table_area);
    }

    if let Some(select) = &ctx.context_select {
        let widget = ContextSelectorWidget {
            contexts: &select.contexts,
            selected: select.selected,
            loading: select.loading,
        };
        widget.render(frame, area);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let widget = StatusBarWidget {
        view: &ctx.view_name,
        context: &ctx.context_name,
        selection: ctx.selection.as_deref(),
        freshness: ctx.freshness.as_deref(),
        notice: ctx.notice.as_ref(),
    };
    widget.render(frame, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn base_ctx() -> RenderContext {
        RenderContext {
            context_name: "prod".into(),
            view_name: "main".into(),
            hints: Some("q quit".into()),
            table: Some(TableData {
                title: "Node Groups".into(),
                headers: vec!["NAME", "NODES"],
                rows: vec![vec!["worker".into(), "3".into()]],
                selected: Some(0),
                loading: false,
                error: None,
                empty_message: "No node groups found".into(),
                status_column: None,
            }),
            search: None,
            context_select: None,
            selection: Some("worker".into()),
            freshness: Some("updated 12:30:05 · cached".into()),
            notice: None,
        }
    }

    fn render(ctx: &RenderContext, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render_root(frame, ctx)).unwrap();
        terminal.backend().buffer().content().iter().map(|c| c.symbol().chars().next().unwrap_or(' ')).collect()
    }

    #[test]
    fn full_frame_renders_header_body_and_status() {
        let text = render(&base_ctx(), 80, 12);
        assert!(text.contains("nodelens"));
        assert!(text.contains("context: prod"));
        assert!(text.contains("Node Groups"));
        assert!(text.contains("worker"));
        assert!(text.contains("MAIN"));
        assert!(text.contains("updated 12:30:05"));
    }

    #[test]
    fn full_repaint_after_resize_leaves_no_stale_cells() {
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let ctx = base_ctx();
        terminal.draw(|frame| render_root(frame, &ctx)).unwrap();

        // Shrink the terminal, then clear and repaint as the event loop
        // does for a resize: the new buffer must not carry content from
        // the old dimensions.
        terminal.backend_mut().resize(40, 8);
        terminal.clear().unwrap();
        let mut empty = base_ctx();
        empty.table = None;
        empty.selection = None;
        empty.freshness = None;
        terminal.draw(|frame| render_root(frame, &empty)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect();
        assert!(!text.contains("Node Groups"));
        assert!(!text.contains("worker"));
        assert!(text.contains("nodelens"));
    }

    #[test]
    fn search_bar_renders_above_results() {
        let mut ctx = base_ctx();
        ctx.search = Some(SearchData { pattern: "nginx".into(), typing: true });
        let text = render(&ctx, 80, 12);
        assert!(text.contains("Search: nginx"));
    }

    #[test]
    fn context_selector_overlays_the_body() {
        let mut ctx = base_ctx();
        ctx.context_select = Some(ContextSelectData {
            contexts: vec![("ctx-a".into(), true), ("ctx-b".into(), false)],
            selected: Some(1),
            loading: false,
        });
        let text = render(&ctx, 80, 16);
        assert!(text.contains("Select Context"));
        assert!(text.contains("* ctx-a"));
    }
}

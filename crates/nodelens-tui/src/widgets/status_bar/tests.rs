use std::time::Duration;

use super::*;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn render_status_bar(
    view: &str,
    context: &str,
    selection: Option<&str>,
    freshness: Option<&str>,
    notice: Option<&Notice>,
    width: u16,
) -> String {
    let backend = TestBackend::new(width, 1);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            let widget = StatusBarWidget { view, context, selection, freshness, notice };
            widget.render(frame, area);
        })
        .unwrap();
    terminal.backend().buffer().content().iter().map(|c| c.symbol().chars().next().unwrap_or(' ')).collect()
}

#[test]
fn view_name_is_uppercased() {
    let text = render_status_bar("main", "prod", None, None, None, 80);
    assert!(text.contains("MAIN"));
    assert!(text.contains("prod"));
}

#[test]
fn selected_row_shows_its_full_untruncated_name() {
    // The table may render this name as "very-long-n…"; the status line
    // must carry the whole thing.
    let text = render_status_bar(
        "main",
        "prod",
        Some("very-long-node-group-name-example"),
        None,
        None,
        120,
    );
    assert!(text.contains("very-long-node-group-name-example"));
}

#[test]
fn freshness_marker_sits_on_the_right() {
    let text = render_status_bar("main", "prod", None, Some("updated 12:30:05 · cached"), None, 80);
    assert!(text.contains("updated 12:30:05 · cached"));
}

#[test]
fn notice_takes_precedence_over_freshness() {
    let notice = Notice::warning("cluster unreachable, showing cached data", Duration::from_secs(5));
    let text = render_status_bar("main", "prod", None, Some("updated 12:30:05"), Some(&notice), 90);
    assert!(text.contains("cluster unreachable"));
    assert!(!text.contains("updated 12:30:05"));
}

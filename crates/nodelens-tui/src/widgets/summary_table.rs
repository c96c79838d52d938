use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table, TableState,
};

use crate::text::truncate_with_ellipsis;
use crate::theme;

const MIN_COLUMN_WIDTH: usize = 8;
const COLUMN_SPACING: u16 = 1;
/// Room reserved for the selection symbol.
const HIGHLIGHT_WIDTH: u16 = 2;

/// The one table every view renders: bordered, titled, selection
/// highlighted, with explicit loading / error / empty states so the
/// operator never faces a blank or frozen screen.
pub struct SummaryTable<'a> {
    pub title: &'a str,
    pub headers: &'a [&'a str],
    pub rows: &'a [Vec<String>],
    pub selected: Option<usize>,
    pub loading: bool,
    pub error: Option<&'a str>,
    pub empty_message: &'a str,
    /// Column rendered in its status color, if any.
    pub status_column: Option<usize>,
}

impl<'a> SummaryTable<'a> {
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER_COLOR))
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(theme::ACCENT).bold())
            .title_bottom(
                Line::from(format!(" {} ", self.rows.len()))
                    .right_aligned()
                    .style(Style::default().fg(theme::TEXT_DIM)),
            );

        if self.loading {
            let msg = Paragraph::new("Loading...").style(Style::default().fg(theme::TEXT_DIM)).block(block);
            frame.render_widget(msg, area);
            return;
        }

        if let Some(err) = self.error {
            let msg = Paragraph::new(format!("Error: {err}"))
                .style(Style::default().fg(theme::STATUS_FAILED))
                .block(block);
            frame.render_widget(msg, area);
            return;
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.rows.is_empty() {
            let msg = Paragraph::new(self.empty_message).style(Style::default().fg(theme::TEXT_DIM));
            frame.render_widget(msg, inner);
            return;
        }

        let budget = inner.width.saturating_sub(HIGHLIGHT_WIDTH);
        let widths = column_widths(self.headers, self.rows, budget as usize, COLUMN_SPACING as usize);

        let header_cells: Vec<Cell> = self
            .headers
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(theme::TABLE_HEADER_FG).bold()))
            .collect();
        let header = Row::new(header_cells).height(1);

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|cells| {
                let cells: Vec<Cell> = cells
                    .iter()
                    .enumerate()
                    .map(|(col, value)| {
                        let width = widths.get(col).copied().unwrap_or(MIN_COLUMN_WIDTH);
                        let label = truncate_with_ellipsis(value, width);
                        let style = if self.status_column == Some(col) {
                            Style::default().fg(theme::status_color(value))
                        } else {
                            Style::default()
                        };
                        Cell::from(label).style(style)
                    })
                    .collect();
                Row::new(cells)
            })
            .collect();

        let constraints: Vec<Constraint> = widths.iter().map(|w| Constraint::Length(*w as u16)).collect();
        let table = Table::new(rows, constraints)
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .row_highlight_style(Style::default().bg(theme::SELECTION_BG))
            .highlight_symbol("▶ ");

        let mut state = TableState::default().with_selected(self.selected);
        frame.render_stateful_widget(table, inner, &mut state);

        let visible = inner.height.saturating_sub(1) as usize;
        if self.rows.len() > visible {
            let mut scrollbar_state = ScrollbarState::new(self.rows.len()).position(self.selected.unwrap_or(0));
            let scrollbar =
                Scrollbar::new(ScrollbarOrientation::VerticalRight).style(Style::default().fg(theme::BORDER_COLOR));
            frame.render_stateful_widget(
                scrollbar,
                inner.inner(Margin { vertical: 1, horizontal: 0 }),
                &mut scrollbar_state,
            );
        }
    }
}

/// Fit columns into `total` cells: start from each column's natural width
/// (widest of header and cells) and repeatedly shave the widest column,
/// down to a floor, until the row fits. Wide name columns give way first
/// while compact numeric columns stay readable.
pub fn column_widths(headers: &[&str], rows: &[Vec<String>], total: usize, spacing: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            if col < widths.len() {
                widths[col] = widths[col].max(cell.chars().count());
            }
        }
    }

    let overhead = spacing * widths.len().saturating_sub(1);
    loop {
        let used: usize = widths.iter().sum::<usize>() + overhead;
        if used <= total {
            break;
        }
        let Some((idx, &widest)) = widths.iter().enumerate().max_by_key(|(_, w)| **w) else { break };
        if widest <= MIN_COLUMN_WIDTH {
            break;
        }
        let excess = used - total;
        widths[idx] = widest.saturating_sub(excess).max(MIN_COLUMN_WIDTH);
    }
    widths
}

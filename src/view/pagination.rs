//! Pagination bar: page links on the left, row counts on the right.

use crate::table::{DataTable, PageItem, PageLinks, TableRow};
use crate::view::styles::DashboardStyles;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// "Showing X to Y of Z results", 1-indexed.
pub fn showing_text(start: usize, end: usize, total: usize) -> String {
    format!("Showing {start} to {end} of {total} results")
}

/// Page links as one line. The active page is bracketed so it stays visible
/// without colors.
pub fn pagination_line(links: &PageLinks, styles: &DashboardStyles) -> Line<'static> {
    let mut spans = Vec::with_capacity(links.items.len() * 2);
    for (i, item) in links.items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let label = item.label();
        spans.push(match item {
            PageItem::Page { active: true, .. } => {
                Span::styled(format!("[{label}]"), styles.page_active)
            }
            PageItem::Previous { enabled: false } | PageItem::Next { enabled: false } => {
                Span::styled(label, styles.muted)
            }
            _ => Span::raw(label),
        });
    }
    Line::from(spans)
}

/// Draw the footer: result range on the left, page links on the right.
pub fn render_pagination<T: TableRow>(
    frame: &mut Frame,
    area: Rect,
    table: &DataTable<T>,
    styles: &DashboardStyles,
) {
    let (start, end) = table.showing_bounds();
    let showing = showing_text(start, end, table.filtered_len());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(showing.chars().count() as u16),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(pagination_line(&table.page_links(), styles)),
        chunks[0],
    );
    frame.render_widget(Paragraph::new(showing).style(styles.muted), chunks[1]);
}

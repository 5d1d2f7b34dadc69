//! Navigation sidebar listing the report views.

use crate::route::View;
use crate::view::styles::DashboardStyles;
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render one numbered entry per view, highlighting `current`.
///
/// The numbers match the `1`-`3` view keys.
pub fn render_sidebar(frame: &mut Frame, area: Rect, current: View, styles: &DashboardStyles) {
    let items: Vec<ListItem> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| ListItem::new(Line::from(format!("{} {}", i + 1, view.title()))))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Reports "))
        .highlight_style(styles.sidebar_active)
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(Some(current.index()));
    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(current: View) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(26, 5)).unwrap();
        terminal
            .draw(|frame| {
                render_sidebar(frame, frame.area(), current, &DashboardStyles::default())
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..5u16)
            .map(|y| (0..26u16).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn lists_every_view_in_order() {
        let lines = render(View::RoiTracker);
        assert!(lines[0].contains("Reports"));
        assert!(lines[1].contains("1 ROI Tracker"));
        assert!(lines[2].contains("2 Performance Tracker"));
        assert!(lines[3].contains("3 Marketing ROI"));
    }

    #[test]
    fn marks_current_view() {
        let lines = render(View::MarketingRoi);
        assert!(lines[3].contains("▶ 3 Marketing ROI"));
        assert!(!lines[1].contains('▶'));
    }
}

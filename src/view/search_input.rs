//! Search input widget for rendering the search bar.

use crate::state::SearchState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search input widget.
///
/// Renders an editable box with a block cursor while typing and a read-only
/// box once the search is applied.
pub struct SearchInput<'a> {
    search_state: &'a SearchState,
    border_style: Style,
}

impl<'a> SearchInput<'a> {
    /// Widget over the current search state.
    pub fn new(search_state: &'a SearchState) -> Self {
        Self {
            search_state,
            border_style: Style::default(),
        }
    }

    /// Border style of the editable box.
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.search_state {
            SearchState::Typing { query, cursor } => {
                let before: String = query.chars().take(*cursor).collect();
                let mut after = query.chars().skip(*cursor);
                let cursor_char = after.next().map_or_else(|| " ".to_string(), String::from);
                let after_text: String = after.collect();

                let line = Line::from(vec![
                    Span::raw(before),
                    Span::styled(
                        cursor_char,
                        Style::default()
                            .bg(Color::White)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(after_text),
                ]);
                Paragraph::new(line)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(self.border_style)
                            .title(" Search "),
                    )
                    .render(area, buf);
            }
            SearchState::Active { query } => {
                Paragraph::new(Line::from(query.as_str()))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(" Search (/ to edit, c to clear) "),
                    )
                    .render(area, buf);
            }
            SearchState::Inactive => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(state: &SearchState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(SearchInput::new(state), frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..3u16)
            .map(|y| {
                (0..40u16)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn typing_state_shows_query_and_cursor() {
        let state = SearchState::Typing {
            query: "clicks".to_string(),
            cursor: 2,
        };
        let output = render(&state);
        assert!(output.contains("Search"));
        assert!(output.contains("clicks"));
    }

    #[test]
    fn cursor_at_end_of_multibyte_query_does_not_panic() {
        let state = SearchState::Typing {
            query: "café".to_string(),
            cursor: 4,
        };
        assert!(render(&state).contains("café"));
    }

    #[test]
    fn active_state_shows_applied_query() {
        let state = SearchState::Active {
            query: "paid".to_string(),
        };
        let output = render(&state);
        assert!(output.contains("paid"));
        assert!(output.contains("Search (/ to edit"));
    }

    #[test]
    fn inactive_renders_nothing() {
        let output = render(&SearchState::Inactive);
        assert!(output.trim().is_empty());
    }
}

//! Search box state.

/// Search box state machine.
///
/// The table filter follows [`SearchState::text`] on every transition, so
/// results update while typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    /// No search text.
    #[default]
    Inactive,
    /// User is typing. `cursor` counts characters, not bytes.
    Typing {
        /// Text typed so far.
        query: String,
        /// Cursor position in characters.
        cursor: usize,
    },
    /// Search text applied and input closed.
    Active {
        /// Applied search text.
        query: String,
    },
}

impl SearchState {
    /// Text the table is filtered by. Empty when inactive.
    pub fn text(&self) -> &str {
        match self {
            SearchState::Inactive => "",
            SearchState::Typing { query, .. } | SearchState::Active { query } => query,
        }
    }

    /// True while the search box takes keystrokes.
    pub fn is_typing(&self) -> bool {
        matches!(self, SearchState::Typing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_follows_state() {
        assert_eq!(SearchState::Inactive.text(), "");
        let typing = SearchState::Typing {
            query: "cli".to_string(),
            cursor: 3,
        };
        assert_eq!(typing.text(), "cli");
        assert!(typing.is_typing());
        assert_eq!(
            SearchState::Active {
                query: "paid".to_string()
            }
            .text(),
            "paid"
        );
    }
}

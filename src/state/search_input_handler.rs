//! Search input handling (pure state transitions).
//!
//! Handles text input for the `SearchState::Typing` variant.

use crate::state::SearchState;

/// Byte offset of the `cursor`-th character.
fn byte_index(query: &str, cursor: usize) -> usize {
    query
        .char_indices()
        .nth(cursor)
        .map_or(query.len(), |(i, _)| i)
}

/// Insert a character at the cursor and advance it.
///
/// No-op if not in Typing state.
pub fn handle_char_input(state: SearchState, ch: char) -> SearchState {
    match state {
        SearchState::Typing { mut query, cursor } => {
            query.insert(byte_index(&query, cursor), ch);
            SearchState::Typing {
                query,
                cursor: cursor + 1,
            }
        }
        other => other,
    }
}

/// Delete the character before the cursor.
///
/// No-op if not in Typing state or at the start of the query.
pub fn handle_backspace(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { mut query, cursor } if cursor > 0 => {
            query.remove(byte_index(&query, cursor - 1));
            SearchState::Typing {
                query,
                cursor: cursor - 1,
            }
        }
        other => other,
    }
}

/// Move cursor left by one character. Saturates at 0.
pub fn handle_cursor_left(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { query, cursor } => SearchState::Typing {
            query,
            cursor: cursor.saturating_sub(1),
        },
        other => other,
    }
}

/// Move cursor right by one character. Saturates at query length.
pub fn handle_cursor_right(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { query, cursor } => {
            let max_cursor = query.chars().count();
            SearchState::Typing {
                query,
                cursor: (cursor + 1).min(max_cursor),
            }
        }
        other => other,
    }
}

/// Open the search box, keeping any applied text for editing.
///
/// No-op if already typing.
pub fn activate_search_input(state: SearchState) -> SearchState {
    match state {
        SearchState::Inactive => SearchState::Typing {
            query: String::new(),
            cursor: 0,
        },
        SearchState::Active { query } => {
            let cursor = query.chars().count();
            SearchState::Typing { query, cursor }
        }
        typing => typing,
    }
}

/// Clear the search text and close the box.
pub fn cancel_search(_state: SearchState) -> SearchState {
    SearchState::Inactive
}

/// Close the box, keeping the text applied.
///
/// Whitespace-only text clears the search instead. No-op if not typing.
pub fn submit_search(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { query, .. } if query.trim().is_empty() => SearchState::Inactive,
        SearchState::Typing { query, .. } => SearchState::Active { query },
        other => other,
    }
}

#[cfg(test)]
#[path = "search_input_handler_tests.rs"]
mod tests;

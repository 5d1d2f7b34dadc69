//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings alongside arrow and page keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers are compared; event kind and state are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }

    /// Keys bound to `action`, formatted for display and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(key, _)| describe_key(key))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

/// Short label for a key event: `q`, `Ctrl+f`, `PgDn`.
pub fn describe_key(key: &KeyEvent) -> String {
    let code = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        other => format!("{other:?}"),
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        format!("Ctrl+{code}")
    } else {
        code
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use KeyCode::*;
        let none = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let ctrl = KeyModifiers::CONTROL;

        let mut kb = Self {
            bindings: HashMap::new(),
        };

        // Row and column cursor
        kb.bind(Char('k'), none, KeyAction::RowUp);
        kb.bind(Up, none, KeyAction::RowUp);
        kb.bind(Char('j'), none, KeyAction::RowDown);
        kb.bind(Down, none, KeyAction::RowDown);
        kb.bind(Char('h'), none, KeyAction::ColumnLeft);
        kb.bind(Left, none, KeyAction::ColumnLeft);
        kb.bind(Char('l'), none, KeyAction::ColumnRight);
        kb.bind(Right, none, KeyAction::ColumnRight);

        // Pagination
        kb.bind(Char('p'), none, KeyAction::PreviousPage);
        kb.bind(PageUp, none, KeyAction::PreviousPage);
        kb.bind(Char('n'), none, KeyAction::NextPage);
        kb.bind(PageDown, none, KeyAction::NextPage);
        kb.bind(Char('g'), none, KeyAction::FirstPage);
        kb.bind(Home, none, KeyAction::FirstPage);
        kb.bind(Char('G'), shift, KeyAction::LastPage);
        kb.bind(End, none, KeyAction::LastPage);
        kb.bind(Char(':'), none, KeyAction::GoToPage);
        kb.bind(Char(':'), shift, KeyAction::GoToPage);

        // Table interaction
        kb.bind(Char('s'), none, KeyAction::ToggleSort);
        kb.bind(Enter, none, KeyAction::ToggleSort);
        kb.bind(Char(' '), none, KeyAction::ToggleRowSelection);
        kb.bind(Char('a'), none, KeyAction::ToggleAllSelection);
        kb.bind(Char('t'), none, KeyAction::CycleTypeFilter);
        kb.bind(Char('c'), none, KeyAction::ClearFilters);

        // Search
        kb.bind(Char('/'), none, KeyAction::StartSearch);
        kb.bind(Char('f'), ctrl, KeyAction::StartSearch);
        kb.bind(Esc, none, KeyAction::CancelSearch);

        // Export
        kb.bind(Char('e'), none, KeyAction::ExportCsv);
        kb.bind(Char('x'), none, KeyAction::ExportXlsx);

        // Views
        kb.bind(Tab, none, KeyAction::NextView);
        kb.bind(BackTab, shift, KeyAction::PreviousView);
        kb.bind(BackTab, none, KeyAction::PreviousView);
        kb.bind(Char('1'), none, KeyAction::SelectView(1));
        kb.bind(Char('2'), none, KeyAction::SelectView(2));
        kb.bind(Char('3'), none, KeyAction::SelectView(3));

        // Application controls
        kb.bind(Char('q'), none, KeyAction::Quit);
        kb.bind(Char('?'), none, KeyAction::Help);
        kb.bind(Char('r'), none, KeyAction::Refresh);

        kb
    }
}

//! Keyboard bindings configuration.

use crate::model::{KeyAction, Mode, Operator};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Calculator keys are bound to the characters printed on the keypad, so
/// typing an expression works the same as clicking it.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Terminals disagree on whether shifted punctuation (`+`, `*`, `?`)
    /// carries the SHIFT modifier, so it is ignored for character keys.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let modifiers = match key.code {
            KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
            _ => key.modifiers,
        };
        self.bindings
            .get(&KeyEvent::new(key.code, modifiers))
            .copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }

    fn bind_char(&mut self, c: char, action: KeyAction) {
        self.bind(KeyCode::Char(c), KeyModifiers::NONE, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut kb = Self {
            bindings: HashMap::new(),
        };

        // Operand entry
        for c in ('0'..='9').chain(std::iter::once('.')) {
            kb.bind_char(c, KeyAction::Digit(c));
        }

        // Operators
        for op in Operator::ALL {
            kb.bind_char(op.symbol(), KeyAction::Operator(op));
        }

        // Evaluate / edit
        kb.bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::Evaluate);
        kb.bind_char('=', KeyAction::Evaluate);
        kb.bind(KeyCode::Backspace, KeyModifiers::NONE, KeyAction::Backspace);
        kb.bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::Clear);
        kb.bind(KeyCode::Delete, KeyModifiers::NONE, KeyAction::Clear);
        kb.bind_char('c', KeyAction::Clear);

        // Modes
        kb.bind(KeyCode::F(1), KeyModifiers::NONE, KeyAction::SelectMode(Mode::Standard));
        kb.bind(KeyCode::F(2), KeyModifiers::NONE, KeyAction::SelectMode(Mode::Scientific));
        kb.bind(KeyCode::F(3), KeyModifiers::NONE, KeyAction::SelectMode(Mode::Ai));
        kb.bind(KeyCode::Tab, KeyModifiers::NONE, KeyAction::CycleMode);

        // Explanation
        kb.bind_char('e', KeyAction::RequestExplanation);

        // History
        kb.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::HistoryUp);
        kb.bind_char('k', KeyAction::HistoryUp);
        kb.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::HistoryDown);
        kb.bind_char('j', KeyAction::HistoryDown);
        kb.bind_char(' ', KeyAction::SelectHistory);

        // Application controls
        kb.bind_char('t', KeyAction::ToggleTheme);
        kb.bind_char('?', KeyAction::Help);
        kb.bind_char('q', KeyAction::Quit);
        kb.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        kb
    }
}

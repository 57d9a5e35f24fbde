//! Render tests: draw `AppState`s into a `TestBackend` and inspect the text.

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use smartcalc::model::{KeyAction, Mode, Operator};
use smartcalc::state::AppState;
use smartcalc::view::{render_layout, ColorConfig};

/// Extract rendered text content from a ratatui Buffer.
fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn render(state: &AppState, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| {
            render_layout(frame, state, ColorConfig::disabled(), 0);
        })
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn apply(state: &mut AppState, actions: &[KeyAction]) {
    for action in actions {
        state.dispatch(*action);
    }
}

#[test]
fn initial_screen_shows_placeholder_keypad_and_modes() {
    let content = render(&AppState::new(), 80, 30);

    assert!(content.contains("Standard"));
    assert!(content.contains("Scientific"));
    assert!(content.contains("AI"));
    assert!(content.contains("No history yet"));
    for label in ["C", "÷", "×", "⌫", "7", "=", "."] {
        assert!(content.contains(label), "keypad label {label} missing:\n{content}");
    }
}

#[test]
fn pending_expression_and_operand_are_both_shown() {
    let mut state = AppState::new();
    apply(
        &mut state,
        &[
            KeyAction::Digit('1'),
            KeyAction::Digit('2'),
            KeyAction::Operator(Operator::Multiply),
            KeyAction::Digit('4'),
        ],
    );

    let content = render(&state, 80, 30);
    assert!(content.contains("12 *"), "pending expression missing:\n{content}");
}

#[test]
fn history_panel_lists_newest_first() {
    let mut state = AppState::new();
    for d in ['1', '2'] {
        apply(
            &mut state,
            &[
                KeyAction::Clear,
                KeyAction::Digit(d),
                KeyAction::Operator(Operator::Add),
                KeyAction::Digit('1'),
                KeyAction::Evaluate,
            ],
        );
    }

    let content = render(&state, 80, 30);
    let newer = content.find("2 + 1").expect("newer entry");
    let older = content.find("1 + 1").expect("older entry");
    assert!(newer < older, "newest entry should be listed first:\n{content}");
}

#[test]
fn narrow_terminal_drops_history_panel() {
    let content = render(&AppState::new(), 40, 30);
    assert!(!content.contains("History"));
    assert!(content.contains("⌫"));
}

#[test]
fn ai_mode_replaces_keypad_with_placeholder() {
    let mut state = AppState::new();
    state.mode = Mode::Ai;

    let content = render(&state, 100, 30);
    assert!(content.contains("Explanation"));
    assert!(content.contains("Press e"));
    assert!(!content.contains("⌫"), "keypad should be hidden:\n{content}");
}

#[test]
fn loading_explanation_shows_spinner() {
    let mut state = AppState::new();
    apply(&mut state, &[KeyAction::Digit('9'), KeyAction::RequestExplanation]);

    let content = render(&state, 100, 30);
    assert!(content.contains("Thinking"), "spinner missing:\n{content}");
}

#[test]
fn long_operand_is_truncated_from_the_left() {
    let mut state = AppState::new();
    for _ in 0..60 {
        state.dispatch(KeyAction::Digit('1'));
    }
    state.dispatch(KeyAction::Digit('9'));

    let content = render(&state, 40, 20);
    assert!(content.contains('…'), "expected ellipsis:\n{content}");
    assert!(content.contains("119"));
}

#[test]
fn help_overlay_renders_on_top() {
    let mut state = AppState::new();
    state.dispatch(KeyAction::Help);

    let content = render(&state, 80, 30);
    assert!(content.contains("Keyboard Shortcuts"));
    assert!(content.contains("Press Esc or ? to close"));
}

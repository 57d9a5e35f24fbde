//! Event-loop tests against `TestBackend`.

use super::*;
use crate::explain::{ExplainError, ExplanationService};
use crate::model::Mode;
use crossterm::event::{KeyModifiers, MouseEvent};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Echo;

impl ExplanationService for Echo {
    fn explain(&self, problem: &str) -> Result<String, ExplainError> {
        Ok(format!("**Answer** for {problem}"))
    }
}

fn create_test_app() -> TuiApp<TestBackend> {
    create_sized_test_app(80, 30)
}

fn create_sized_test_app(width: u16, height: u16) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    TuiApp::with_terminal(
        terminal,
        AppState::new(),
        ExplanationWorker::new(Arc::new(Echo)),
        ColorConfig::disabled(),
    )
}

fn press(app: &mut TuiApp<TestBackend>, code: KeyCode) -> bool {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_keys(app: &mut TuiApp<TestBackend>, keys: &str) {
    for c in keys.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn click(app: &mut TuiApp<TestBackend>, column: u16, row: u16) -> bool {
    app.handle_mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

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

fn screen(app: &mut TuiApp<TestBackend>) -> String {
    app.draw().unwrap();
    buffer_to_string(app.terminal().backend().buffer())
}

#[test]
fn tui_error_from_io_error() {
    let io_err = io::Error::other("test error");
    let tui_err: TuiError = io_err.into();
    assert!(matches!(tui_err, TuiError::Io(_)));
}

#[test]
fn handle_key_q_returns_true() {
    let mut app = create_test_app();
    assert!(press(&mut app, KeyCode::Char('q')));
}

#[test]
fn handle_key_ctrl_c_returns_true() {
    let mut app = create_test_app();
    let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(app.handle_key(key));
}

#[test]
fn key_release_is_ignored() {
    let mut app = create_test_app();
    let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
    key.kind = KeyEventKind::Release;
    assert!(!app.handle_key(key));
}

#[test]
fn typed_expression_evaluates_and_renders() {
    let mut app = create_test_app();
    type_keys(&mut app, "12+30");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.app_state().display().current_operand(), "42");
    let content = screen(&mut app);
    assert!(content.contains("42"), "display should show result:\n{content}");
    assert!(content.contains("12 + 30"), "history should show expression:\n{content}");
}

#[test]
fn division_by_zero_renders_error_marker() {
    let mut app = create_test_app();
    type_keys(&mut app, "5/0=");

    let content = screen(&mut app);
    assert!(content.contains("Error"), "expected error marker:\n{content}");
    assert!(content.contains("No history yet"));
}

#[test]
fn esc_closes_help_without_clearing() {
    let mut app = create_test_app();
    type_keys(&mut app, "7?");
    assert!(app.app_state().help_visible);
    assert!(screen(&mut app).contains("Keyboard Shortcuts"));

    press(&mut app, KeyCode::Esc);
    assert!(!app.app_state().help_visible);
    assert_eq!(app.app_state().display().current_operand(), "7");
}

#[test]
fn clicking_keypad_buttons_enters_expression() {
    let mut app = create_test_app();
    app.draw().unwrap();
    let body = app.last_layout.unwrap().body;

    for label in ["8", "×", "2", "="] {
        let button = keypad::KEYPAD.iter().find(|b| b.label == label).unwrap();
        let rect = button.rect(body);
        click(&mut app, rect.x + rect.width / 2, rect.y + rect.height / 2);
    }

    assert_eq!(app.app_state().display().current_operand(), "16");
    assert_eq!(app.app_state().history().len(), 1);
}

#[test]
fn clicking_history_row_loads_result() {
    let mut app = create_test_app();
    type_keys(&mut app, "2+2=c9+1=");
    app.draw().unwrap();
    let history_area = app.last_layout.unwrap().history.unwrap();

    // Second entry (older, "2 + 2") starts on the third inner row.
    click(&mut app, history_area.x + 2, history_area.y + 3);

    assert_eq!(app.app_state().display().current_operand(), "4");
    assert_eq!(app.app_state().history_cursor(), Some(1));
}

#[test]
fn clicking_history_row_after_scrolling_loads_the_row_shown() {
    // Four entries fit in the history panel of a 14-row terminal.
    let mut app = create_sized_test_app(80, 14);
    for n in 1..=6 {
        type_keys(&mut app, &format!("c{n}+0="));
    }
    for _ in 0..6 {
        press(&mut app, KeyCode::Down);
    }
    assert_eq!(app.app_state().history_cursor(), Some(5));

    app.draw().unwrap();
    let history_area = app.last_layout.unwrap().history.unwrap();
    let buffer = app.terminal().backend().buffer();
    let result_row: String = (history_area.left()..history_area.right())
        .map(|x| buffer[(x, history_area.y + 2)].symbol())
        .collect();
    let shown = result_row
        .trim_matches(|c: char| c == '│' || c == ' ')
        .trim_start_matches("= ")
        .to_string();
    assert_ne!(shown, "6", "list should have scrolled past the newest entry");

    click(&mut app, history_area.x + 2, history_area.y + 1);

    assert_eq!(app.app_state().display().current_operand(), shown);
}

#[test]
fn clicking_mode_tab_switches_mode() {
    let mut app = create_test_app();
    app.draw().unwrap();
    let tabs = app.last_layout.unwrap().tabs;

    click(&mut app, tabs.x + 27, tabs.y + 1);
    assert_eq!(app.app_state().mode, Mode::Ai);
}

#[test]
fn keypad_clicks_ignored_in_ai_mode() {
    let mut app = create_test_app();
    press(&mut app, KeyCode::F(3));
    app.draw().unwrap();
    let body = app.last_layout.unwrap().body;

    click(&mut app, body.x + 1, body.y + 1);
    assert_eq!(app.app_state().display().current_operand(), "0");
}

#[test]
fn explanation_round_trip_through_worker() {
    let mut app = create_test_app();
    type_keys(&mut app, "2+3e");

    assert_eq!(app.app_state().mode, Mode::Ai);
    assert!(app.app_state().explanation().is_loading());
    assert!(screen(&mut app).contains("Thinking"));

    let deadline = Instant::now() + Duration::from_secs(5);
    while app.app_state().explanation().is_loading() && Instant::now() < deadline {
        app.on_tick();
        std::thread::sleep(Duration::from_millis(10));
    }

    assert_eq!(app.app_state().explanation().text(), "**Answer** for 2 +  3");
    let content = screen(&mut app);
    assert!(content.contains("Answer for 2 +"), "markdown should render:\n{content}");
}

#[test]
fn input_events_apply_finished_explanations_between_ticks() {
    let mut app = create_test_app();
    type_keys(&mut app, "4*2e");
    assert!(app.app_state().explanation().is_loading());

    // Only input arrives; the tick never fires.
    let deadline = Instant::now() + Duration::from_secs(5);
    while app.app_state().explanation().is_loading() && Instant::now() < deadline {
        assert!(!app.handle_event(Event::Resize(80, 30)));
        std::thread::sleep(Duration::from_millis(10));
    }

    assert_eq!(app.app_state().explanation().text(), "**Answer** for 4 *  2");
}

#[test]
fn tick_without_replies_reports_no_change_when_idle() {
    let mut app = create_test_app();
    assert!(!app.on_tick());
}

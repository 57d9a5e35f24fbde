//! Screen layout: area calculation and top-level rendering.
//!
//! Pure layout logic. Areas are computed separately from rendering so the
//! event loop can reuse them for mouse hit-testing.

use super::constants::{
    DISPLAY_HEIGHT, HISTORY_MIN_TERMINAL_WIDTH, HISTORY_PANEL_WIDTH, STATUS_BAR_HEIGHT,
    TAB_BAR_HEIGHT,
};
use super::styles::{ColorConfig, Palette};
use super::{display, explanation, help, history, keypad};
use crate::model::Mode;
use crate::state::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Screen regions of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppLayout {
    /// Mode selector bar.
    pub tabs: Rect,
    /// Display panel.
    pub display: Rect,
    /// Keypad or explanation panel, depending on mode.
    pub body: Rect,
    /// History panel; `None` on narrow terminals.
    pub history: Option<Rect>,
    /// Status bar with key hints.
    pub status: Rect,
}

/// Split `area` into the application regions.
pub fn calculate_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    let (tabs, content, status) = (vertical[0], vertical[1], vertical[2]);

    let (calculator, history) = if area.width >= HISTORY_MIN_TERMINAL_WIDTH {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(HISTORY_PANEL_WIDTH)])
            .split(content);
        (horizontal[0], Some(horizontal[1]))
    } else {
        (content, None)
    };

    let column = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(DISPLAY_HEIGHT), Constraint::Min(0)])
        .split(calculator);

    AppLayout {
        tabs,
        display: column[0],
        body: column[1],
        history,
        status,
    }
}

/// Mode whose tab title sits under `column` in the selector bar at `area`.
///
/// Mirrors how [`Tabs`] lays out titles: one space of padding either side
/// and a one-column divider between tabs.
pub fn tab_at(area: Rect, column: u16) -> Option<Mode> {
    let mut x = area.x.saturating_add(1); // left border
    for mode in Mode::ALL {
        let width = u16::try_from(mode.title().width()).unwrap_or(u16::MAX) + 2;
        if column >= x && column < x.saturating_add(width) {
            return Some(mode);
        }
        x = x.saturating_add(width + 1);
    }
    None
}

/// Render the whole screen.
///
/// Returns the scroll offset of the history list (0 when it is hidden).
pub fn render_layout(
    frame: &mut Frame,
    state: &AppState,
    colors: ColorConfig,
    tick: usize,
) -> usize {
    let palette = Palette::new(state.theme, colors);
    let layout = calculate_layout(frame.area());

    frame.render_widget(Block::default().style(palette.base), frame.area());

    render_tabs(frame, layout.tabs, state, &palette);
    display::render_display(frame, layout.display, state, &palette);

    if state.mode.shows_keypad() {
        keypad::render_keypad(frame, layout.body, &palette);
    } else {
        explanation::render_explanation(frame, layout.body, state, &palette, tick);
    }

    let history_offset = layout
        .history
        .map_or(0, |area| history::render_history(frame, area, state, &palette));

    render_status_bar(frame, layout.status, state, &palette);

    if state.help_visible {
        help::render_help_overlay(frame, &palette);
    }

    history_offset
}

fn render_tabs(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let titles: Vec<Line> = Mode::ALL.iter().map(|mode| Line::from(mode.title())).collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" smartcalc ")
                .title_style(palette.title)
                .borders(Borders::ALL)
                .border_style(palette.border),
        )
        .select(state.mode.index())
        .style(palette.muted)
        .highlight_style(palette.highlight);

    frame.render_widget(tabs, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let mut spans = Vec::new();
    let hints = [
        ("?", "help"),
        ("e", "explain"),
        ("Tab", "mode"),
        ("t", "theme"),
        ("q", "quit"),
    ];
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {key} "), palette.key));
        spans.push(Span::styled(format!("{label} "), palette.muted));
    }
    if state.explanation().is_loading() {
        spans.push(Span::styled(" explaining…", palette.muted));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

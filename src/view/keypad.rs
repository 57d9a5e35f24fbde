//! Keypad grid: button definitions, geometry and rendering.
//!
//! Buttons are plain data. Each one reports exactly one [`KeyAction`] when
//! clicked; all behaviour lives in `AppState::dispatch`.

use super::constants::{KEYPAD_COLUMNS, KEYPAD_ROWS};
use super::styles::Palette;
use crate::model::{KeyAction, Operator};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Visual category of a button. Affects styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// `0`-`9` and `.`.
    Digit,
    /// Arithmetic operators.
    Operator,
    /// Clear and backspace.
    Action,
    /// Evaluate.
    Special,
}

/// One keypad cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    /// Text drawn on the button.
    pub label: &'static str,
    /// Styling category.
    pub kind: ButtonKind,
    /// Action dispatched when clicked.
    pub action: KeyAction,
    row: u16,
    col: u16,
    row_span: u16,
    col_span: u16,
}

impl Button {
    const fn new(
        label: &'static str,
        kind: ButtonKind,
        action: KeyAction,
        row: u16,
        col: u16,
    ) -> Self {
        Self {
            label,
            kind,
            action,
            row,
            col,
            row_span: 1,
            col_span: 1,
        }
    }

    const fn digit(d: char, label: &'static str, row: u16, col: u16) -> Self {
        Self::new(label, ButtonKind::Digit, KeyAction::Digit(d), row, col)
    }

    const fn operator(op: Operator, label: &'static str, row: u16, col: u16) -> Self {
        Self::new(label, ButtonKind::Operator, KeyAction::Operator(op), row, col)
    }

    const fn spanning(mut self, rows: u16, cols: u16) -> Self {
        self.row_span = rows;
        self.col_span = cols;
        self
    }

    /// Screen rectangle of this button inside the keypad `area`.
    pub fn rect(&self, area: Rect) -> Rect {
        let x0 = split_point(area.x, area.width, self.col, KEYPAD_COLUMNS);
        let x1 = split_point(area.x, area.width, self.col + self.col_span, KEYPAD_COLUMNS);
        let y0 = split_point(area.y, area.height, self.row, KEYPAD_ROWS);
        let y1 = split_point(area.y, area.height, self.row + self.row_span, KEYPAD_ROWS);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

/// Start coordinate of grid line `index` when `length` cells are split into
/// `count` tracks. Tracks differ in size by at most one cell.
fn split_point(origin: u16, length: u16, index: u16, count: u16) -> u16 {
    let offset = u32::from(length) * u32::from(index) / u32::from(count);
    origin + offset as u16
}

/// The keypad, row by row.
///
/// ```text
///  C  ÷  ×  ⌫
///  7  8  9  -
///  4  5  6  +
///  1  2  3  =
///  0     .  =
/// ```
pub const KEYPAD: [Button; 18] = [
    Button::new("C", ButtonKind::Action, KeyAction::Clear, 0, 0),
    Button::operator(Operator::Divide, "÷", 0, 1),
    Button::operator(Operator::Multiply, "×", 0, 2),
    Button::new("⌫", ButtonKind::Action, KeyAction::Backspace, 0, 3),
    Button::digit('7', "7", 1, 0),
    Button::digit('8', "8", 1, 1),
    Button::digit('9', "9", 1, 2),
    Button::operator(Operator::Subtract, "-", 1, 3),
    Button::digit('4', "4", 2, 0),
    Button::digit('5', "5", 2, 1),
    Button::digit('6', "6", 2, 2),
    Button::operator(Operator::Add, "+", 2, 3),
    Button::digit('1', "1", 3, 0),
    Button::digit('2', "2", 3, 1),
    Button::digit('3', "3", 3, 2),
    Button::new("=", ButtonKind::Special, KeyAction::Evaluate, 3, 3).spanning(2, 1),
    Button::digit('0', "0", 4, 0).spanning(1, 2),
    Button::digit('.', ".", 4, 2),
];

/// Button under the given screen position, if any.
pub fn hit_test(area: Rect, column: u16, row: u16) -> Option<&'static Button> {
    let position = Position::new(column, row);
    KEYPAD
        .iter()
        .find(|button| button.rect(area).contains(position))
}

fn style_for(kind: ButtonKind, palette: &Palette) -> Style {
    match kind {
        ButtonKind::Digit => palette.digit,
        ButtonKind::Operator => palette.operator,
        ButtonKind::Action => palette.action,
        ButtonKind::Special => palette.special,
    }
}

/// Render the keypad into `area`.
pub fn render_keypad(frame: &mut Frame, area: Rect, palette: &Palette) {
    for button in &KEYPAD {
        let rect = button.rect(area);
        if rect.is_empty() {
            continue;
        }
        let style = style_for(button.kind, palette);

        // Borders only when there is room for a label inside them.
        let bordered = rect.height >= 3 && rect.width >= 3;
        let inner_height = if bordered { rect.height - 2 } else { rect.height };
        let top_padding = inner_height.saturating_sub(1) / 2;

        let mut lines: Vec<Line> = (0..top_padding).map(|_| Line::default()).collect();
        lines.push(Line::from(button.label));

        let mut paragraph = Paragraph::new(lines)
            .style(style)
            .alignment(Alignment::Center);
        if bordered {
            paragraph = paragraph.block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(palette.border),
            );
        }
        frame.render_widget(paragraph, rect);
    }
}

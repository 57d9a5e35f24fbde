//! Display panel: pending expression above, operand (or error marker) below.

use super::styles::Palette;
use crate::state::AppState;
use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marks text cut off on the left.
const ELLIPSIS: char = '…';

/// Keep the rightmost part of `text` that fits in `width` columns.
///
/// Long operands lose their leading digits first, like a pocket calculator.
pub fn fit_tail(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut start = text.len();
    for (i, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        start = i;
    }

    let mut out = String::with_capacity(text.len() - start + ELLIPSIS.len_utf8());
    out.push(ELLIPSIS);
    out.push_str(&text[start..]);
    out
}

/// Render the display into `area`.
pub fn render_display(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let display = state.display();
    let inner_width = usize::from(area.width.saturating_sub(2));

    let pending = Line::styled(fit_tail(display.pending_expression(), inner_width), palette.muted);
    let main = if display.error().is_some() {
        Line::styled(display.display_text().to_string(), palette.error)
    } else {
        Line::styled(fit_tail(display.display_text(), inner_width), palette.title)
    };

    let paragraph = Paragraph::new(vec![pending, main])
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border),
        );
    frame.render_widget(paragraph, area);
}

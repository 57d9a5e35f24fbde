//! AI panel: explanation text rendered as markdown, or a spinner while a
//! request is in flight.

use super::styles::Palette;
use crate::state::AppState;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_markdown::from_str;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Shown before any explanation has been requested.
pub const PLACEHOLDER: &str = "Press e to get a step-by-step explanation of the current expression.";

/// Spinner glyph for animation frame `tick`.
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Render the explanation panel into `area`.
pub fn render_explanation(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    palette: &Palette,
    tick: usize,
) {
    let block = Block::default()
        .title(" Explanation ")
        .title_style(palette.title)
        .borders(Borders::ALL)
        .border_style(palette.border);

    let explanation = state.explanation();
    let lines = if explanation.is_loading() {
        vec![Line::from(vec![
            Span::styled(spinner_frame(tick), palette.key),
            Span::styled(" Thinking...", palette.muted),
        ])]
    } else if explanation.text().is_empty() {
        vec![Line::styled(PLACEHOLDER, palette.muted)]
    } else {
        render_markdown_with_style(explanation.text(), palette.base)
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Convert markdown into owned lines, layering markdown styling over `base_style`.
fn render_markdown_with_style(markdown_text: &str, base_style: Style) -> Vec<Line<'static>> {
    let text = from_str(markdown_text);

    text.lines
        .into_iter()
        .map(|line| {
            let owned_spans: Vec<_> = line
                .spans
                .into_iter()
                .map(|span| Span::styled(span.content.into_owned(), base_style.patch(span.style)))
                .collect();
            Line::from(owned_spans)
        })
        .collect()
}

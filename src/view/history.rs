//! History panel: newest-first list of past evaluations.

use super::styles::Palette;
use crate::state::AppState;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Lines each entry occupies: expression + time, then result.
const ROWS_PER_ENTRY: u16 = 2;

/// Render the history list into `area`.
///
/// Returns the index of the first visible entry. The list scrolls to keep
/// the highlighted row on screen, so clicks must be mapped through it.
pub fn render_history(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) -> usize {
    let block = Block::default()
        .title(" History ")
        .title_style(palette.title)
        .borders(Borders::ALL)
        .border_style(palette.border);

    if state.history().is_empty() {
        let empty = List::new([ListItem::new(Line::styled("No history yet", palette.muted))])
            .block(block);
        frame.render_widget(empty, area);
        return 0;
    }

    let items: Vec<ListItem> = state
        .history()
        .entries()
        .map(|entry| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(entry.expression().to_string(), palette.muted),
                    Span::raw(" "),
                    Span::styled(entry.timestamp().format("%H:%M:%S").to_string(), palette.muted),
                ]),
                Line::from(Span::styled(
                    format!("= {}", entry.result()),
                    palette.base,
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.highlight);

    let mut list_state = ListState::default().with_selected(state.history_cursor());
    frame.render_stateful_widget(list, area, &mut list_state);
    list_state.offset()
}

/// History index under screen `row`, for a panel drawn at `area` holding
/// `len` entries and scrolled so that entry `offset` is the first visible.
pub fn entry_at(area: Rect, row: u16, len: usize, offset: usize) -> Option<usize> {
    let inner_top = area.y.saturating_add(1);
    let inner_bottom = area.y.saturating_add(area.height).saturating_sub(1);
    if row < inner_top || row >= inner_bottom {
        return None;
    }
    let index = offset + usize::from((row - inner_top) / ROWS_PER_ENTRY);
    (index < len).then_some(index)
}

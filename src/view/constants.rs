//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

use std::time::Duration;

/// Height of the mode selector bar in lines (border + content).
pub const TAB_BAR_HEIGHT: u16 = 3;

/// Height of the display panel: border, pending expression, operand.
pub const DISPLAY_HEIGHT: u16 = 4;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the history panel in columns, including borders.
pub const HISTORY_PANEL_WIDTH: u16 = 30;

/// Below this terminal width the history panel is hidden.
pub const HISTORY_MIN_TERMINAL_WIDTH: u16 = 56;

/// Number of keypad columns.
pub const KEYPAD_COLUMNS: u16 = 4;

/// Number of keypad rows.
pub const KEYPAD_ROWS: u16 = 5;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Event-loop tick: how often explanation replies are drained and the
/// spinner advances.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

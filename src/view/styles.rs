//! Theme palettes and colour configuration.

use crate::model::Theme;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colour output regardless of environment.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Monochrome output.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::enabled()
    }
}

// ===== Palette =====

/// Resolved styles for one frame.
///
/// Built from the theme and [`ColorConfig`]; with colours disabled every
/// style falls back to modifiers only, so the layout stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Background and default text.
    pub base: Style,
    /// Panel borders.
    pub border: Style,
    /// Panel titles.
    pub title: Style,
    /// Digit buttons.
    pub digit: Style,
    /// Operator buttons.
    pub operator: Style,
    /// Clear and backspace buttons.
    pub action: Style,
    /// The evaluate button.
    pub special: Style,
    /// Error marker.
    pub error: Style,
    /// Secondary text such as timestamps and hints.
    pub muted: Style,
    /// Selected tab and history row.
    pub highlight: Style,
    /// Key names in hints and help.
    pub key: Style,
}

impl Palette {
    /// Palette for `theme`, or a colourless one when `colors` is disabled.
    pub fn new(theme: Theme, colors: ColorConfig) -> Self {
        if !colors.colors_enabled() {
            return Self::monochrome();
        }
        match theme {
            Theme::Light => Self {
                base: Style::default().fg(Color::Black).bg(Color::White),
                border: Style::default().fg(Color::Gray),
                title: Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
                digit: Style::default().fg(Color::Black).bg(Color::Gray),
                operator: Style::default().fg(Color::Blue).bg(Color::Gray),
                action: Style::default().fg(Color::Red).bg(Color::Gray),
                special: Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
                error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                muted: Style::default().fg(Color::DarkGray),
                highlight: Style::default().fg(Color::White).bg(Color::Blue),
                key: Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            },
            Theme::Dark => Self {
                base: Style::default().fg(Color::White).bg(Color::Black),
                border: Style::default().fg(Color::DarkGray),
                title: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                digit: Style::default().fg(Color::White).bg(Color::DarkGray),
                operator: Style::default().fg(Color::Cyan).bg(Color::DarkGray),
                action: Style::default().fg(Color::LightRed).bg(Color::DarkGray),
                special: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                error: Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
                muted: Style::default().fg(Color::Gray),
                highlight: Style::default().fg(Color::Black).bg(Color::Cyan),
                key: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            },
        }
    }

    fn monochrome() -> Self {
        let plain = Style::default();
        Self {
            base: plain,
            border: plain,
            title: plain.add_modifier(Modifier::BOLD),
            digit: plain,
            operator: plain.add_modifier(Modifier::BOLD),
            action: plain.add_modifier(Modifier::BOLD),
            special: plain.add_modifier(Modifier::REVERSED),
            error: plain.add_modifier(Modifier::BOLD),
            muted: plain.add_modifier(Modifier::DIM),
            highlight: plain.add_modifier(Modifier::REVERSED),
            key: plain.add_modifier(Modifier::BOLD),
        }
    }
}

// ===== Tests =====

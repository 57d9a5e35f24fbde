//! View selectors: body panel mode and colour theme.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Which body panel is shown below the display.
///
/// Purely a view selector; switching modes never touches the calculator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Basic keypad.
    #[default]
    Standard,
    /// Same keypad, labelled as the scientific view.
    Scientific,
    /// Explanation panel.
    Ai,
}

impl Mode {
    /// All modes in selector order.
    pub const ALL: [Mode; 3] = [Mode::Standard, Mode::Scientific, Mode::Ai];

    /// Next mode in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Mode::Standard => Mode::Scientific,
            Mode::Scientific => Mode::Ai,
            Mode::Ai => Mode::Standard,
        }
    }

    /// Tab title in the mode selector.
    pub fn title(self) -> &'static str {
        match self {
            Mode::Standard => "Standard",
            Mode::Scientific => "Scientific",
            Mode::Ai => "AI ✨",
        }
    }

    /// Whether this mode shows the keypad (as opposed to the explanation panel).
    pub fn shows_keypad(self) -> bool {
        !matches!(self, Mode::Ai)
    }

    /// Position of this mode in [`Mode::ALL`].
    pub fn index(self) -> usize {
        match self {
            Mode::Standard => 0,
            Mode::Scientific => 1,
            Mode::Ai => 2,
        }
    }
}

/// Error for unrecognised mode or theme names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl FromStr for Mode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Mode::Standard),
            "scientific" => Ok(Mode::Scientific),
            "ai" => Ok(Mode::Ai),
            _ => Err(UnknownVariant {
                kind: "mode",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Standard => "standard",
            Mode::Scientific => "scientific",
            Mode::Ai => "ai",
        };
        f.write_str(name)
    }
}

/// Colour theme. Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownVariant {
                kind: "theme",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

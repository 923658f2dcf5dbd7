//! Console palettes so panel rows reference semantic colors, not raw escapes.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Box-drawing characters for the panel frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    pub t_left: char,
    pub t_right: char,
}

pub const BORDER_SINGLE: BorderSet = BorderSet {
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    horizontal: '─',
    vertical: '│',
    t_left: '├',
    t_right: '┤',
};

pub const BORDER_ROUNDED: BorderSet = BorderSet {
    top_left: '╭',
    top_right: '╮',
    bottom_left: '╰',
    bottom_right: '╯',
    ..BORDER_SINGLE
};

/// ANSI escapes for one palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelColors {
    /// Panel title and section headings
    pub heading: &'static str,
    /// Shortcut key column
    pub key: &'static str,
    /// "on" indicator
    pub on: &'static str,
    /// "off" indicator
    pub off: &'static str,
    /// Focused row highlight
    pub focus: &'static str,
    /// Footer and secondary text
    pub dim: &'static str,
    /// Frame color
    pub border: &'static str,
    pub reset: &'static str,
    pub borders: BorderSet,
}

impl PanelColors {
    /// Colorless rendering for `--no-color` and snapshot-style tests.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            heading: "",
            key: "",
            on: "",
            off: "",
            focus: "",
            dim: "",
            border: "",
            reset: "",
            borders: BORDER_SINGLE,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Palette {
    #[default]
    Dark,
    Light,
    Lowdark,
    Lowlight,
    SolarizedDark,
    SolarizedLight,
}

impl Palette {
    pub const ALL: &'static [Palette] = &[
        Palette::Dark,
        Palette::Light,
        Palette::Lowdark,
        Palette::Lowlight,
        Palette::SolarizedDark,
        Palette::SolarizedLight,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Lowdark => "lowdark",
            Self::Lowlight => "lowlight",
            Self::SolarizedDark => "solarized_dark",
            Self::SolarizedLight => "solarized_light",
        }
    }

    #[must_use]
    pub fn colors(self) -> PanelColors {
        match self {
            Self::Dark => PanelColors {
                heading: "\x1b[1;37m",
                key: "\x1b[36m",
                on: "\x1b[1;32m",
                off: "\x1b[90m",
                focus: "\x1b[1;33m",
                dim: "\x1b[2m",
                border: "\x1b[34m",
                reset: "\x1b[0m",
                borders: BORDER_SINGLE,
            },
            Self::Light => PanelColors {
                heading: "\x1b[1;30m",
                key: "\x1b[34m",
                on: "\x1b[32m",
                off: "\x1b[37m",
                focus: "\x1b[1;35m",
                dim: "\x1b[2m",
                border: "\x1b[36m",
                reset: "\x1b[0m",
                borders: BORDER_SINGLE,
            },
            Self::Lowdark => PanelColors {
                heading: "\x1b[37m",
                key: "\x1b[36m",
                on: "\x1b[32m",
                off: "\x1b[90m",
                focus: "\x1b[33m",
                dim: "\x1b[2m",
                border: "\x1b[90m",
                reset: "\x1b[0m",
                borders: BORDER_ROUNDED,
            },
            Self::Lowlight => PanelColors {
                heading: "\x1b[30m",
                key: "\x1b[34m",
                on: "\x1b[32m",
                off: "\x1b[37m",
                focus: "\x1b[35m",
                dim: "\x1b[2m",
                border: "\x1b[37m",
                reset: "\x1b[0m",
                borders: BORDER_ROUNDED,
            },
            Self::SolarizedDark => PanelColors {
                heading: "\x1b[1;38;5;230m",
                key: "\x1b[38;5;37m",
                on: "\x1b[38;5;64m",
                off: "\x1b[38;5;241m",
                focus: "\x1b[38;5;136m",
                dim: "\x1b[38;5;240m",
                border: "\x1b[38;5;33m",
                reset: "\x1b[0m",
                borders: BORDER_SINGLE,
            },
            Self::SolarizedLight => PanelColors {
                heading: "\x1b[1;38;5;235m",
                key: "\x1b[38;5;37m",
                on: "\x1b[38;5;64m",
                off: "\x1b[38;5;245m",
                focus: "\x1b[38;5;166m",
                dim: "\x1b[38;5;246m",
                border: "\x1b[38;5;33m",
                reset: "\x1b[0m",
                borders: BORDER_SINGLE,
            },
        }
    }

    /// Picker shortcut: `1` for the first palette, `2` for the second, ...
    #[must_use]
    pub fn picker_key(self) -> char {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        char::from_digit((idx + 1) as u32, 10).unwrap_or('?')
    }

    #[must_use]
    pub fn from_picker_key(key: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.picker_key() == key)
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Content views selectable as the global default display mode.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentView {
    #[default]
    Auto,
    Css,
    Hex,
    Html,
    Image,
    Javascript,
    Json,
    Multipart,
    Protobuf,
    Raw,
    UrlEncoded,
    Wbxml,
    Xml,
}

impl ContentView {
    pub const ALL: &'static [ContentView] = &[
        ContentView::Auto,
        ContentView::Css,
        ContentView::Hex,
        ContentView::Html,
        ContentView::Image,
        ContentView::Javascript,
        ContentView::Json,
        ContentView::Multipart,
        ContentView::Protobuf,
        ContentView::Raw,
        ContentView::UrlEncoded,
        ContentView::Wbxml,
        ContentView::Xml,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Css => "css",
            Self::Hex => "hex",
            Self::Html => "html",
            Self::Image => "image",
            Self::Javascript => "javascript",
            Self::Json => "json",
            Self::Multipart => "multipart",
            Self::Protobuf => "protobuf",
            Self::Raw => "raw",
            Self::UrlEncoded => "urlencoded",
            Self::Wbxml => "wbxml",
            Self::Xml => "xml",
        }
    }

    /// One-key shortcut offered by the display-mode prompt.
    #[must_use]
    pub fn key(self) -> char {
        match self {
            Self::Auto => 'a',
            Self::Css => 'c',
            Self::Hex => 'e',
            Self::Html => 'h',
            Self::Image => 'i',
            Self::Javascript => 'j',
            Self::Json => 's',
            Self::Multipart => 'm',
            Self::Protobuf => 'p',
            Self::Raw => 'r',
            Self::UrlEncoded => 'u',
            Self::Wbxml => 'w',
            Self::Xml => 'x',
        }
    }

    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|view| view.key() == key)
    }

    /// `(label, key)` pairs in prompt order.
    #[must_use]
    pub fn prompt_choices() -> Vec<(&'static str, char)> {
        Self::ALL.iter().map(|view| (view.name(), view.key())).collect()
    }
}

impl fmt::Display for ContentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

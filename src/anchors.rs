//! Ordered (path, pattern) rules with insert-at-front and exact-match removal.
//!
//! The registry does not validate either half; whoever acts on an anchor
//! decides what a path or pattern means.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub path: String,
    pub pattern: String,
}

impl Anchor {
    #[must_use]
    pub fn new(path: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            pattern: pattern.into(),
        }
    }

    /// Parse `PATH=PATTERN`, splitting at the first `=`.
    pub fn parse(text: &str) -> Result<Self, AnchorParseError> {
        let (path, pattern) = text
            .split_once('=')
            .ok_or_else(|| AnchorParseError::MissingSeparator(text.to_string()))?;
        let path = path.trim();
        let pattern = pattern.trim();
        if path.is_empty() {
            return Err(AnchorParseError::EmptyPath(text.to_string()));
        }
        if pattern.is_empty() {
            return Err(AnchorParseError::EmptyPattern(text.to_string()));
        }
        Ok(Self::new(path, pattern))
    }
}

impl FromStr for Anchor {
    type Err = AnchorParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.path, self.pattern)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorParseError {
    MissingSeparator(String),
    EmptyPath(String),
    EmptyPattern(String),
}

impl fmt::Display for AnchorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator(text) => {
                write!(f, "anchor {text:?} must look like PATH=PATTERN")
            }
            Self::EmptyPath(text) => write!(f, "anchor {text:?} has an empty path"),
            Self::EmptyPattern(text) => write!(f, "anchor {text:?} has an empty pattern"),
        }
    }
}

impl std::error::Error for AnchorParseError {}

/// Front is the most recently added rule. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorRegistry {
    rules: Vec<Anchor>,
}

impl AnchorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_anchor(&mut self, path: impl Into<String>, pattern: impl Into<String>) {
        self.rules.insert(0, Anchor::new(path, pattern));
    }

    /// Remove the first rule equal to `(path, pattern)`. Absent rules are a no-op.
    pub fn remove_anchor(&mut self, path: &str, pattern: &str) -> bool {
        match self
            .rules
            .iter()
            .position(|rule| rule.path == path && rule.pattern == pattern)
        {
            Some(idx) => {
                self.rules.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Owned snapshot, front to back.
    #[must_use]
    pub fn anchors(&self) -> Vec<(String, String)> {
        self.rules
            .iter()
            .map(|rule| (rule.path.clone(), rule.pattern.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Anchor> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

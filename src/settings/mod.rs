//! Proxy console options and the typed field catalogue the panel reads and writes.
//!
//! `Settings` is plain data. Every write goes through [`Settings::set`], which
//! validates the whole value before touching the field, so a rejected write
//! leaves the previous value in place.

mod access;
mod file;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content_view::ContentView;
use crate::palette::Palette;

pub use access::{ConfigAccess, SharedSettings};
pub use file::{default_settings_path, load_settings_file, load_startup_settings, parse_settings};

/// One grid-editor row; cells in column order.
pub type Row = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetHeader {
    pub filter: String,
    pub header: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub filter: String,
    pub regex: String,
    pub replacement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub anticache: bool,
    pub anticomp: bool,
    pub kill: bool,
    pub refresh_server_playback: bool,
    pub showhost: bool,
    pub no_upstream_cert: bool,
    pub setheaders: Vec<SetHeader>,
    pub replacements: Vec<Replacement>,
    pub scripts: Vec<String>,
    pub ignore_hosts: Vec<String>,
    pub tcp_hosts: Vec<String>,
    pub stickyauth: Option<String>,
    pub stickycookie: Option<String>,
    pub default_display_mode: ContentView,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            anticache: false,
            anticomp: false,
            kill: false,
            refresh_server_playback: true,
            showhost: false,
            no_upstream_cert: false,
            setheaders: Vec::new(),
            replacements: Vec::new(),
            scripts: Vec::new(),
            ignore_hosts: Vec::new(),
            tcp_hosts: Vec::new(),
            stickyauth: None,
            stickycookie: None,
            default_display_mode: ContentView::Auto,
            palette: Palette::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AntiCache,
    AntiComp,
    Kill,
    RefreshServerPlayback,
    ShowHost,
    NoUpstreamCert,
    SetHeaders,
    Replacements,
    Scripts,
    IgnoreHosts,
    TcpHosts,
    StickyAuth,
    StickyCookie,
    DefaultDisplayMode,
    Palette,
}

/// Shape of the value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Flag,
    Rows { columns: usize },
    Text,
    View,
    Palette,
}

impl FieldKind {
    fn label(self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Rows { .. } => "rows",
            Self::Text => "text",
            Self::View => "display mode",
            Self::Palette => "palette",
        }
    }
}

impl Field {
    pub const ALL: &'static [Field] = &[
        Field::AntiCache,
        Field::AntiComp,
        Field::Kill,
        Field::RefreshServerPlayback,
        Field::ShowHost,
        Field::NoUpstreamCert,
        Field::SetHeaders,
        Field::Replacements,
        Field::Scripts,
        Field::IgnoreHosts,
        Field::TcpHosts,
        Field::StickyAuth,
        Field::StickyCookie,
        Field::DefaultDisplayMode,
        Field::Palette,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::AntiCache => "anticache",
            Self::AntiComp => "anticomp",
            Self::Kill => "kill",
            Self::RefreshServerPlayback => "refresh_server_playback",
            Self::ShowHost => "showhost",
            Self::NoUpstreamCert => "no_upstream_cert",
            Self::SetHeaders => "setheaders",
            Self::Replacements => "replacements",
            Self::Scripts => "scripts",
            Self::IgnoreHosts => "ignore_hosts",
            Self::TcpHosts => "tcp_hosts",
            Self::StickyAuth => "stickyauth",
            Self::StickyCookie => "stickycookie",
            Self::DefaultDisplayMode => "default_display_mode",
            Self::Palette => "palette",
        }
    }

    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            Self::AntiCache
            | Self::AntiComp
            | Self::Kill
            | Self::RefreshServerPlayback
            | Self::ShowHost
            | Self::NoUpstreamCert => FieldKind::Flag,
            Self::SetHeaders | Self::Replacements => FieldKind::Rows { columns: 3 },
            Self::Scripts | Self::IgnoreHosts | Self::TcpHosts => FieldKind::Rows { columns: 1 },
            Self::StickyAuth | Self::StickyCookie => FieldKind::Text,
            Self::DefaultDisplayMode => FieldKind::View,
            Self::Palette => FieldKind::Palette,
        }
    }

    /// Grid-editor column titles for row-valued fields; empty otherwise.
    #[must_use]
    pub fn column_titles(self) -> &'static [&'static str] {
        match self {
            Self::SetHeaders => &["Filter", "Header", "Value"],
            Self::Replacements => &["Filter", "Regex", "Replacement"],
            Self::Scripts => &["Command"],
            Self::IgnoreHosts | Self::TcpHosts => &["Regex (host:port)"],
            _ => &[],
        }
    }

    #[must_use]
    pub fn default_value(self) -> FieldValue {
        Settings::default().get(self)
    }

    /// Whether "clear all" resets this field. The palette is an interface
    /// preference and survives.
    #[must_use]
    pub fn cleared_by_reset(self) -> bool {
        !matches!(self, Self::Palette)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Flag(bool),
    Rows(Vec<Row>),
    Text(Option<String>),
    View(ContentView),
    Palette(Palette),
}

impl FieldValue {
    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            Self::Rows(rows) => rows,
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    TypeMismatch {
        field: Field,
        expected: &'static str,
    },
    ColumnCount {
        field: Field,
        row: usize,
        expected: usize,
        found: usize,
    },
    InvalidPattern {
        field: Field,
        pattern: String,
        reason: String,
    },
    UnknownDisplayModeKey(char),
    UnknownPaletteKey(char),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { field, expected } => {
                write!(f, "{field}: expected a {expected} value")
            }
            Self::ColumnCount {
                field,
                row,
                expected,
                found,
            } => write!(
                f,
                "{field}: row {row} has {found} columns, expected {expected}"
            ),
            Self::InvalidPattern {
                field,
                pattern,
                reason,
            } => write!(f, "{field}: invalid regex {pattern:?}: {reason}"),
            Self::UnknownDisplayModeKey(key) => write!(f, "unknown display mode key: {key}"),
            Self::UnknownPaletteKey(key) => write!(f, "unknown palette key: {key}"),
        }
    }
}

impl std::error::Error for SettingsError {}

fn is_blank(row: &Row) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

fn check_regex(field: Field, pattern: &str) -> Result<(), SettingsError> {
    Regex::new(pattern)
        .map(|_| ())
        .map_err(|err| SettingsError::InvalidPattern {
            field,
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })
}

/// Drop blank rows, then check column counts and regex columns.
fn validate_rows(field: Field, columns: usize, rows: Vec<Row>) -> Result<Vec<Row>, SettingsError> {
    let rows: Vec<Row> = rows.into_iter().filter(|row| !is_blank(row)).collect();
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != columns {
            return Err(SettingsError::ColumnCount {
                field,
                row: idx + 1,
                expected: columns,
                found: row.len(),
            });
        }
        match field {
            Field::IgnoreHosts | Field::TcpHosts => check_regex(field, &row[0])?,
            Field::Replacements => check_regex(field, &row[1])?,
            _ => {}
        }
    }
    Ok(rows)
}

fn normalize_text(text: Option<String>) -> Option<String> {
    text.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Settings {
    #[must_use]
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::AntiCache => FieldValue::Flag(self.anticache),
            Field::AntiComp => FieldValue::Flag(self.anticomp),
            Field::Kill => FieldValue::Flag(self.kill),
            Field::RefreshServerPlayback => FieldValue::Flag(self.refresh_server_playback),
            Field::ShowHost => FieldValue::Flag(self.showhost),
            Field::NoUpstreamCert => FieldValue::Flag(self.no_upstream_cert),
            Field::SetHeaders => FieldValue::Rows(
                self.setheaders
                    .iter()
                    .map(|h| vec![h.filter.clone(), h.header.clone(), h.value.clone()])
                    .collect(),
            ),
            Field::Replacements => FieldValue::Rows(
                self.replacements
                    .iter()
                    .map(|r| vec![r.filter.clone(), r.regex.clone(), r.replacement.clone()])
                    .collect(),
            ),
            Field::Scripts => FieldValue::Rows(single_column(&self.scripts)),
            Field::IgnoreHosts => FieldValue::Rows(single_column(&self.ignore_hosts)),
            Field::TcpHosts => FieldValue::Rows(single_column(&self.tcp_hosts)),
            Field::StickyAuth => FieldValue::Text(self.stickyauth.clone()),
            Field::StickyCookie => FieldValue::Text(self.stickycookie.clone()),
            Field::DefaultDisplayMode => FieldValue::View(self.default_display_mode),
            Field::Palette => FieldValue::Palette(self.palette),
        }
    }

    /// Validate `value` for `field` and store it. On error nothing changes.
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<(), SettingsError> {
        let mismatch = || SettingsError::TypeMismatch {
            field,
            expected: field.kind().label(),
        };
        match (field.kind(), value) {
            (FieldKind::Flag, FieldValue::Flag(flag)) => {
                *self.flag_mut(field).ok_or_else(mismatch)? = flag;
            }
            (FieldKind::Rows { columns }, FieldValue::Rows(rows)) => {
                let rows = validate_rows(field, columns, rows)?.into_iter();
                match field {
                    Field::SetHeaders => {
                        self.setheaders = rows
                            .map(|row| {
                                let [filter, header, value] = take_cells(row);
                                SetHeader {
                                    filter,
                                    header,
                                    value,
                                }
                            })
                            .collect();
                    }
                    Field::Replacements => {
                        self.replacements = rows
                            .map(|row| {
                                let [filter, regex, replacement] = take_cells(row);
                                Replacement {
                                    filter,
                                    regex,
                                    replacement,
                                }
                            })
                            .collect();
                    }
                    Field::Scripts => self.scripts = first_cells(rows),
                    Field::IgnoreHosts => self.ignore_hosts = first_cells(rows),
                    Field::TcpHosts => self.tcp_hosts = first_cells(rows),
                    _ => return Err(mismatch()),
                }
            }
            (FieldKind::Text, FieldValue::Text(text)) => {
                let text = normalize_text(text);
                match field {
                    Field::StickyAuth => self.stickyauth = text,
                    Field::StickyCookie => self.stickycookie = text,
                    _ => return Err(mismatch()),
                }
            }
            (FieldKind::View, FieldValue::View(view)) => self.default_display_mode = view,
            (FieldKind::Palette, FieldValue::Palette(palette)) => self.palette = palette,
            _ => return Err(mismatch()),
        }
        Ok(())
    }

    /// Re-apply every field through [`Settings::set`] so loaded values obey the
    /// same rules as interactive edits.
    pub fn normalized(&self) -> Result<Settings, SettingsError> {
        let mut checked = Settings::default();
        for field in Field::ALL {
            checked.set(*field, self.get(*field))?;
        }
        Ok(checked)
    }

    fn flag_mut(&mut self, field: Field) -> Option<&mut bool> {
        match field {
            Field::AntiCache => Some(&mut self.anticache),
            Field::AntiComp => Some(&mut self.anticomp),
            Field::Kill => Some(&mut self.kill),
            Field::RefreshServerPlayback => Some(&mut self.refresh_server_playback),
            Field::ShowHost => Some(&mut self.showhost),
            Field::NoUpstreamCert => Some(&mut self.no_upstream_cert),
            _ => None,
        }
    }
}

fn single_column(values: &[String]) -> Vec<Row> {
    values.iter().map(|value| vec![value.clone()]).collect()
}

fn first_cells(rows: impl Iterator<Item = Row>) -> Vec<String> {
    rows.filter_map(|row| row.into_iter().next()).collect()
}

/// Move the three cells of a row validated to have exactly three columns.
fn take_cells(row: Row) -> [String; 3] {
    let mut cells = row.into_iter();
    [
        cells.next().unwrap_or_default(),
        cells.next().unwrap_or_default(),
        cells.next().unwrap_or_default(),
    ]
}

//! Startup settings file (`<config dir>/optionterm/settings.toml`).
//!
//! The file is read once at startup; the panel never writes it back.

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::Settings;
use crate::log_debug;

const SETTINGS_FILE: &str = "settings.toml";
const CONFIG_DIR_ENV: &str = "OPTIONTERM_CONFIG_DIR";

fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        let trimmed = dir.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::config_dir().map(|dir| dir.join("optionterm"))
}

#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(SETTINGS_FILE))
}

/// Parse TOML settings and run every value through the same validation as
/// interactive edits. Unknown keys are ignored.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let raw: Settings = toml::from_str(contents).context("settings file is not valid TOML")?;
    raw.normalized().context("settings file holds an invalid value")
}

pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    parse_settings(&contents).with_context(|| format!("in {}", path.display()))
}

/// Resolve startup settings: an explicit path must exist; the default path is
/// optional and falls back to defaults when absent.
pub fn load_startup_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return load_settings_file(path);
    }
    let Some(path) = default_settings_path() else {
        return Ok(Settings::default());
    };
    match fs::read_to_string(&path) {
        Ok(contents) => {
            log_debug(&format!("loading settings from {}", path.display()));
            parse_settings(&contents).with_context(|| format!("in {}", path.display()))
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Settings::default()),
        Err(err) => {
            Err(err).with_context(|| format!("failed to read settings file {}", path.display()))
        }
    }
}

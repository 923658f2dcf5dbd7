use anyhow::Result;
use clap::Parser;
use optionterm::config::AppConfig;
use optionterm::palette::Palette;
use optionterm::settings::load_startup_settings;
use optionterm::{Anchor, AnchorRegistry, Settings};
use std::path::PathBuf;

/// Interactive options panel for the proxy console.
#[derive(Debug, Parser, Clone)]
#[command(name = "optionterm", version, about)]
pub(crate) struct OverlayConfig {
    #[command(flatten)]
    pub(crate) app: AppConfig,

    /// Load startup settings from this TOML file instead of the default location
    #[arg(long = "settings-file", value_name = "PATH")]
    pub(crate) settings_file: Option<PathBuf>,

    /// Override the palette from the settings file
    #[arg(long, value_enum, value_name = "NAME")]
    pub(crate) palette: Option<Palette>,

    /// Render the panel without ANSI colors
    #[arg(long = "no-color", action = clap::ArgAction::SetTrue)]
    pub(crate) no_color: bool,

    /// Register an anchor rule (repeatable; the last one is listed first)
    #[arg(long = "anchor", value_name = "PATH=PATTERN")]
    pub(crate) anchors: Vec<Anchor>,

    /// Print registered anchors front to back and exit
    #[arg(long = "list-anchors", action = clap::ArgAction::SetTrue)]
    pub(crate) list_anchors: bool,

    /// Print the resolved startup settings as JSON and exit
    #[arg(long = "dump-settings", action = clap::ArgAction::SetTrue)]
    pub(crate) dump_settings: bool,
}

impl OverlayConfig {
    /// Settings file first, then CLI overrides.
    pub(crate) fn resolve_settings(&self) -> Result<Settings> {
        let mut settings = load_startup_settings(self.settings_file.as_deref())?;
        if let Some(palette) = self.palette {
            settings.palette = palette;
        }
        Ok(settings)
    }

    pub(crate) fn anchor_registry(&self) -> AnchorRegistry {
        let mut registry = AnchorRegistry::new();
        for anchor in &self.anchors {
            registry.add_anchor(anchor.path.clone(), anchor.pattern.clone());
        }
        registry
    }
}

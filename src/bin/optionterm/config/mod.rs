//! Command-line configuration so startup flags and the settings file resolve in one place.

mod cli;

pub(crate) use cli::OverlayConfig;

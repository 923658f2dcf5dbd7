//! Shared CLI flags so every binary resolves logging the same way.

use clap::Args;

#[derive(Debug, Clone, Default, Args)]
pub struct AppConfig {
    /// Write a debug log to the temp directory
    #[arg(long = "logs", action = clap::ArgAction::SetTrue)]
    pub logs: bool,

    /// Disable all logging, even when other log flags are set
    #[arg(long = "no-logs", action = clap::ArgAction::SetTrue)]
    pub no_logs: bool,

    /// Record telemetry events (clear-all timings, subscriber failures)
    #[arg(long = "log-timings", action = clap::ArgAction::SetTrue)]
    pub log_timings: bool,
}

impl AppConfig {
    #[inline]
    #[must_use]
    pub fn logging_enabled(&self) -> bool {
        (self.logs || self.log_timings) && !self.no_logs
    }
}

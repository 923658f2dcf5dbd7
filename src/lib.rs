//! Reactive options panel shared by the optionterm binary and its tests.

pub mod anchors;
pub mod bus;
pub mod config;
pub mod content_view;
mod logging;
pub mod palette;
pub mod panel;
pub mod settings;
pub mod shell;
mod telemetry;

pub use anchors::{Anchor, AnchorParseError, AnchorRegistry};
pub use bus::{ChangeBus, PublishReport, SubscriptionId};
pub use logging::{init_logging, log_debug, log_file_path};
pub use panel::{
    proxy_option_entries, ClearReport, OptionDescriptor, PanelContext, PanelEntry, PanelKey,
    SettingsPanel,
};
pub use settings::{ConfigAccess, Field, FieldValue, Settings, SettingsError, SharedSettings};
pub use shell::Shell;
pub use telemetry::init_tracing;

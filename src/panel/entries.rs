//! The proxy console's option menu, grouped into sections.

use super::descriptor::{OptionAction, OptionDescriptor};
use super::PanelEntry;
use crate::settings::Field;

#[must_use]
pub fn proxy_option_entries() -> Vec<PanelEntry> {
    vec![
        PanelEntry::Heading("Traffic Manipulation"),
        PanelEntry::Option(OptionDescriptor::collection(
            "Header Set Patterns",
            'H',
            Field::SetHeaders,
        )),
        PanelEntry::Option(OptionDescriptor::collection(
            "Ignore Patterns",
            'I',
            Field::IgnoreHosts,
        )),
        PanelEntry::Option(OptionDescriptor::collection(
            "Replacement Patterns",
            'R',
            Field::Replacements,
        )),
        PanelEntry::Option(OptionDescriptor::collection("Scripts", 'S', Field::Scripts)),
        PanelEntry::Heading("Interface"),
        PanelEntry::Option(OptionDescriptor::new(
            "Default Display Mode",
            'M',
            OptionAction::DisplayMode,
        )),
        PanelEntry::Option(OptionDescriptor::new("Palette", 'P', OptionAction::Palette)),
        PanelEntry::Option(OptionDescriptor::toggle("Show Host", 'w', Field::ShowHost)),
        PanelEntry::Heading("Network"),
        PanelEntry::Option(OptionDescriptor::toggle(
            "No Upstream Certs",
            'U',
            Field::NoUpstreamCert,
        )),
        PanelEntry::Option(OptionDescriptor::collection(
            "TCP Proxying",
            'T',
            Field::TcpHosts,
        )),
        PanelEntry::Heading("Utility"),
        PanelEntry::Option(OptionDescriptor::toggle("Anti-Cache", 'a', Field::AntiCache)),
        PanelEntry::Option(OptionDescriptor::toggle(
            "Anti-Compression",
            'o',
            Field::AntiComp,
        )),
        PanelEntry::Option(OptionDescriptor::toggle("Kill Extra", 'x', Field::Kill)),
        PanelEntry::Option(OptionDescriptor::inverted_toggle(
            "No Refresh",
            'f',
            Field::RefreshServerPlayback,
        )),
        PanelEntry::Option(OptionDescriptor::text_prompt(
            "Sticky Auth",
            'A',
            Field::StickyAuth,
            "Sticky auth filter",
        )),
        PanelEntry::Option(OptionDescriptor::text_prompt(
            "Sticky Cookies",
            't',
            Field::StickyCookie,
            "Sticky cookie filter",
        )),
    ]
}

//! Options panel wiring so menu rows, key dispatch, and the bulk reset evolve together.

mod descriptor;
mod entries;
mod frame;
mod render;


use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use crate::bus::{ChangeBus, SubscriptionId};
use crate::log_debug;
use crate::palette::PanelColors;
use crate::settings::{ConfigAccess, Field, FieldValue, SettingsError};
use crate::shell::Shell;

pub use descriptor::{OptionAction, OptionDescriptor, ProbeValue};
pub use entries::proxy_option_entries;
pub use frame::display_width;
pub use render::panel_width_for_terminal;

use render::{format_panel, PanelView, RowView, PANEL_CHROME_ROWS};

/// Reserved shortcut that resets every option.
pub const CLEAR_ALL_KEY: char = 'C';
pub const CLEAR_STATUS_TTL: Duration = Duration::from_secs(1);
pub const ERROR_STATUS_TTL: Duration = Duration::from_secs(3);

const PANEL_TITLE: &str = "Options";
const PANEL_FOOTER: &str = "enter/space:activate  C:clear all";

/// Keys the panel understands, decoupled from the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKey {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Home,
    End,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEntry {
    Heading(&'static str),
    Option(OptionDescriptor),
}

impl PanelEntry {
    #[must_use]
    pub fn is_option(&self) -> bool {
        matches!(self, Self::Option(_))
    }
}

/// Everything an activation needs: live config, the bus, and the shell.
#[derive(Clone)]
pub struct PanelContext {
    pub config: Rc<dyn ConfigAccess>,
    pub bus: ChangeBus,
    pub shell: Rc<dyn Shell>,
}

impl PanelContext {
    #[must_use]
    pub fn new(config: Rc<dyn ConfigAccess>, bus: ChangeBus, shell: Rc<dyn Shell>) -> Self {
        Self { config, bus, shell }
    }

    /// Validated write followed by one publish. A rejected value is reported
    /// on the status line and nothing is published.
    pub fn commit(&self, field: Field, value: FieldValue) -> bool {
        match self.config.set(field, value) {
            Ok(()) => {
                self.bus.publish();
                true
            }
            Err(err) => {
                self.report_error(&err);
                false
            }
        }
    }

    pub fn report_error(&self, err: &SettingsError) {
        log_debug(&format!("option rejected: {err}"));
        self.shell
            .status_message(&err.to_string(), Some(ERROR_STATUS_TTL));
    }
}

/// Outcome of a clear-all pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub reset: usize,
    pub failed: usize,
}

pub struct SettingsPanel {
    entries: Vec<PanelEntry>,
    ctx: PanelContext,
    focus: Option<usize>,
    subscription: Option<SubscriptionId>,
    dirty: Rc<Cell<bool>>,
    use_color: bool,
}

impl SettingsPanel {
    /// Build the panel and subscribe it to settings-changed.
    pub fn new(entries: Vec<PanelEntry>, ctx: PanelContext) -> Self {
        for key in shadowed_shortcuts(&entries) {
            log_debug(&format!(
                "options panel: shortcut {key:?} is shadowed by an earlier binding"
            ));
        }
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let subscription = ctx.bus.subscribe(move || {
            flag.set(true);
            Ok(())
        });
        let focus = entries.iter().position(PanelEntry::is_option);
        Self {
            entries,
            ctx,
            focus,
            subscription: Some(subscription),
            dirty,
            use_color: true,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[PanelEntry] {
        &self.entries
    }

    /// Index into [`Self::entries`] of the focused option row.
    #[must_use]
    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn set_color_enabled(&mut self, enabled: bool) {
        if self.use_color != enabled {
            self.use_color = enabled;
            self.dirty.set(true);
        }
    }

    /// Returns and clears the redraw flag.
    pub fn take_redraw(&self) -> bool {
        self.dirty.replace(false)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.entries.len() + PANEL_CHROME_ROWS
    }

    /// Render from live state. Never mutates anything.
    #[must_use]
    pub fn render(&self, width: usize) -> String {
        debug_assert!(self.is_active(), "render after teardown");
        let config = self.ctx.config.as_ref();
        let colors = if self.use_color {
            config.palette().colors()
        } else {
            PanelColors::plain()
        };
        let rows = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| match entry {
                PanelEntry::Heading(text) => RowView::Heading(*text),
                PanelEntry::Option(option) => RowView::Option {
                    key: option.key(),
                    label: option.label(),
                    enabled: option.probe(config).is_set(),
                    focused: self.focus == Some(idx),
                },
            })
            .collect();
        let view = PanelView {
            title: PANEL_TITLE,
            rows,
            footer: PANEL_FOOTER,
            colors,
        };
        format_panel(&view, width)
    }

    /// Dispatch one key. Returns whether the panel consumed it.
    pub fn handle_key(&mut self, key: PanelKey) -> bool {
        debug_assert!(self.is_active(), "key dispatched after teardown");
        match key {
            PanelKey::Char(CLEAR_ALL_KEY) => {
                self.clear_all();
                true
            }
            PanelKey::Enter | PanelKey::Char(' ') => {
                if let Some(idx) = self.focus {
                    self.activate_at(idx);
                }
                true
            }
            PanelKey::Char(ch) => match self.find_shortcut(ch) {
                Some(idx) => {
                    self.set_focus(idx);
                    self.activate_at(idx);
                    true
                }
                None => false,
            },
            PanelKey::Up => {
                self.step_focus(false);
                true
            }
            PanelKey::Down => {
                self.step_focus(true);
                true
            }
            PanelKey::Home => {
                if let Some(first) = self.option_indices().first().copied() {
                    self.set_focus(first);
                }
                true
            }
            PanelKey::End => {
                if let Some(last) = self.option_indices().last().copied() {
                    self.set_focus(last);
                }
                true
            }
            PanelKey::Esc | PanelKey::Backspace | PanelKey::Tab | PanelKey::Other => false,
        }
    }

    /// Reset every resettable field, then publish and notify once.
    pub fn clear_all(&mut self) -> ClearReport {
        let mut report = ClearReport::default();
        for field in Field::ALL.iter().copied().filter(|f| f.cleared_by_reset()) {
            match self.ctx.config.set(field, field.default_value()) {
                Ok(()) => report.reset += 1,
                Err(err) => {
                    log_debug(&format!("clear all: {field} not reset: {err}"));
                    report.failed += 1;
                }
            }
        }
        self.ctx.bus.publish();
        let message = if report.failed == 0 {
            "All options cleared".to_string()
        } else {
            format!("All options cleared ({} failed)", report.failed)
        };
        self.ctx
            .shell
            .status_message(&message, Some(CLEAR_STATUS_TTL));
        tracing::info!(reset = report.reset, failed = report.failed, "clear_all");
        report
    }

    /// Unsubscribe from the bus. Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some(id) = self.subscription.take() {
            if !self.ctx.bus.unsubscribe(id) {
                log_debug("options panel: subscription already gone at teardown");
            }
        }
    }

    /// Key reference for the host's help screen.
    #[must_use]
    pub fn help_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                PanelEntry::Option(option) => {
                    Some(format!("  {}  {}", option.key(), option.label()))
                }
                PanelEntry::Heading(_) => None,
            })
            .collect();
        lines.push(format!("  {CLEAR_ALL_KEY}  Clear all options"));
        lines.push("  ↑/↓  move focus    enter/space  activate".to_string());
        lines
    }

    fn option_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_option())
            .map(|(idx, _)| idx)
            .collect()
    }

    fn find_shortcut(&self, key: char) -> Option<usize> {
        self.entries.iter().position(|entry| match entry {
            PanelEntry::Option(option) => option.key() == key,
            PanelEntry::Heading(_) => false,
        })
    }

    fn set_focus(&mut self, idx: usize) {
        if self.focus != Some(idx) {
            self.focus = Some(idx);
            self.dirty.set(true);
        }
    }

    fn step_focus(&mut self, forward: bool) {
        let options = self.option_indices();
        let Some(current) = self.focus else {
            if let Some(first) = options.first().copied() {
                self.set_focus(first);
            }
            return;
        };
        let next = if forward {
            options.iter().copied().find(|idx| *idx > current)
        } else {
            options.iter().rev().copied().find(|idx| *idx < current)
        };
        if let Some(idx) = next {
            self.set_focus(idx);
        }
    }

    fn activate_at(&self, idx: usize) {
        if let Some(PanelEntry::Option(option)) = self.entries.get(idx) {
            option.activate(&self.ctx);
        }
    }
}

impl Drop for SettingsPanel {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Shortcut keys that can never be reached: repeats of an earlier row and
/// anything equal to the clear-all key.
#[must_use]
pub fn shadowed_shortcuts(entries: &[PanelEntry]) -> Vec<char> {
    let mut seen = HashSet::new();
    let mut shadowed = Vec::new();
    for entry in entries {
        let PanelEntry::Option(option) = entry else {
            continue;
        };
        let key = option.key();
        if (key == CLEAR_ALL_KEY || !seen.insert(key)) && !shadowed.contains(&key) {
            shadowed.push(key);
        }
    }
    shadowed
}

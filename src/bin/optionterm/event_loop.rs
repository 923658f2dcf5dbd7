//! Event loop: route input, redraw on change notifications, expire status messages.

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use optionterm::panel::display_width;
use optionterm::{log_debug, AnchorRegistry, PanelKey, SettingsPanel};
use std::io::Write;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::input::InputEvent;
use crate::terminal_shell::TerminalShell;

const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopAction {
    Continue,
    Quit,
}

pub(crate) struct EventLoopState {
    pub(crate) panel: SettingsPanel,
    pub(crate) shell: Rc<TerminalShell>,
    pub(crate) anchors: AnchorRegistry,
    pub(crate) show_help: bool,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
}

impl EventLoopState {
    /// Pending shell interaction first, then the help screen, then the panel,
    /// then host keys.
    pub(crate) fn dispatch_key(&mut self, key: PanelKey) -> LoopAction {
        if self.shell.handle_key(key) {
            return LoopAction::Continue;
        }
        if self.show_help {
            self.show_help = false;
            return LoopAction::Continue;
        }
        if self.panel.handle_key(key) {
            return LoopAction::Continue;
        }
        match key {
            PanelKey::Char('q') | PanelKey::Esc => LoopAction::Quit,
            PanelKey::Char('?') => {
                self.show_help = true;
                LoopAction::Continue
            }
            _ => LoopAction::Continue,
        }
    }

    /// Screen content, one entry per terminal row starting at the top.
    pub(crate) fn compose_screen(&self) -> Vec<String> {
        let width = usize::from(self.cols);
        let mut lines: Vec<String> = if self.show_help {
            self.help_screen()
        } else {
            self.panel.render(width).lines().map(str::to_string).collect()
        };
        let status_row = usize::from(self.rows.max(1)) - 1;
        lines.truncate(status_row);
        lines.resize(status_row, String::new());
        lines.push(clip_to_width(&self.shell.status_line(), width));
        lines
    }

    fn help_screen(&self) -> Vec<String> {
        let mut lines = vec!["Keys".to_string()];
        lines.extend(self.panel.help_lines());
        lines.push("  ?  this help    q/esc  quit".to_string());
        lines.push(String::new());
        lines.push(format!("Anchors ({})", self.anchors.len()));
        for anchor in self.anchors.iter() {
            lines.push(format!("  {anchor}"));
        }
        lines.push(String::new());
        lines.push("press any key to return".to_string());
        lines
    }
}

fn clip_to_width(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        let candidate = format!("{out}{ch}");
        if display_width(&candidate) > width {
            break;
        }
        out = candidate;
    }
    out
}

fn draw(out: &mut impl Write, lines: &[String]) -> Result<()> {
    queue!(out, Clear(ClearType::All))?;
    for (row, line) in lines.iter().enumerate() {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(out, MoveTo(0, row), Print(line))?;
    }
    out.flush().context("failed to flush terminal output")
}

pub(crate) fn run_event_loop(
    state: &mut EventLoopState,
    input_rx: &Receiver<InputEvent>,
    out: &mut impl Write,
) -> Result<()> {
    let mut force_redraw = true;
    loop {
        let panel_dirty = state.panel.take_redraw();
        let shell_dirty = state.shell.take_redraw();
        if force_redraw || panel_dirty || shell_dirty {
            draw(out, &state.compose_screen())?;
            force_redraw = false;
        }

        match input_rx.recv_timeout(TICK_INTERVAL) {
            Ok(InputEvent::Key(key)) => {
                if state.dispatch_key(key) == LoopAction::Quit {
                    return Ok(());
                }
                // Help toggles and prompt edits do not go through the bus.
                force_redraw = true;
            }
            Ok(InputEvent::Resize { cols, rows }) => {
                state.cols = cols;
                state.rows = rows;
                force_redraw = true;
            }
            Ok(InputEvent::Exit) => return Ok(()),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                log_debug("input channel closed; leaving event loop");
                return Ok(());
            }
        }
        state.shell.tick(Instant::now());
    }
}

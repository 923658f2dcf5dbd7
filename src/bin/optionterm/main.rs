//! optionterm: terminal host for the proxy console's options panel.

mod config;
mod event_loop;
mod input;
mod terminal;
mod terminal_shell;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use crossterm::terminal::size as terminal_size;
use optionterm::{
    init_logging, init_tracing, log_debug, log_file_path, proxy_option_entries, ChangeBus,
    PanelContext, SettingsPanel, SharedSettings, Shell,
};
use std::io::{self, Write};
use std::rc::Rc;

use crate::config::OverlayConfig;
use crate::event_loop::{run_event_loop, EventLoopState};
use crate::input::spawn_input_thread;
use crate::terminal::TerminalGuard;
use crate::terminal_shell::TerminalShell;

const INPUT_CHANNEL_CAPACITY: usize = 64;

fn main() -> Result<()> {
    let config = OverlayConfig::parse();
    let anchors = config.anchor_registry();

    if config.list_anchors {
        let mut stdout = io::stdout().lock();
        for anchor in anchors.iter() {
            writeln!(stdout, "{anchor}")?;
        }
        return Ok(());
    }

    let settings = config.resolve_settings()?;
    if config.dump_settings {
        let json = serde_json::to_string_pretty(&settings).context("failed to encode settings")?;
        println!("{json}");
        return Ok(());
    }

    init_logging(&config.app);
    init_tracing(&config.app);
    log_debug("=== optionterm started ===");
    log_debug(&format!("Log file: {:?}", log_file_path()));
    log_debug(&format!("anchors registered: {}", anchors.len()));

    let bus = ChangeBus::new();
    let shell = Rc::new(TerminalShell::new());
    let ctx = PanelContext::new(
        Rc::new(SharedSettings::new(settings)),
        bus.clone(),
        Rc::clone(&shell) as Rc<dyn Shell>,
    );
    let mut panel = SettingsPanel::new(proxy_option_entries(), ctx);
    panel.set_color_enabled(!config.no_color);

    let (cols, rows) = terminal_size().unwrap_or((80, 24));
    let mut state = EventLoopState {
        panel,
        shell,
        anchors,
        show_help: false,
        cols,
        rows,
    };

    let mut stdout = io::stdout();
    let guard = TerminalGuard::new();
    guard
        .enable_raw_mode()
        .context("failed to enable raw mode")?;
    guard
        .enter_alt_screen(&mut stdout)
        .context("failed to enter alternate screen")?;

    let (input_tx, input_rx) = bounded(INPUT_CHANNEL_CAPACITY);
    // The reader blocks in the terminal read; it exits with the process.
    let _input_handle = spawn_input_thread(input_tx);

    let result = run_event_loop(&mut state, &input_rx, &mut stdout);

    state.panel.teardown();
    bus.shutdown();
    drop(guard);
    log_debug(&format!(
        "=== optionterm exited (published {} changes) ===",
        bus.publish_count()
    ));
    result
}

//! Terminal-state guard so a quit, error, or panic never leaves the shell in raw mode.

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use optionterm::log_debug;
use std::{
    io::{self, Write},
    panic,
    sync::{
        atomic::{AtomicBool, Ordering},
        OnceLock,
    },
};

static RAW_MODE_ENABLED: AtomicBool = AtomicBool::new(false);
static ALT_SCREEN_ENABLED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

/// Restores tracked terminal state on drop and from the panic hook.
pub(crate) struct TerminalGuard;

impl TerminalGuard {
    #[must_use]
    pub(crate) fn new() -> Self {
        install_panic_hook();
        TerminalGuard
    }

    pub(crate) fn enable_raw_mode(&self) -> io::Result<()> {
        enable_raw_mode()?;
        RAW_MODE_ENABLED.store(true, Ordering::SeqCst);
        Ok(())
    }

    pub(crate) fn enter_alt_screen(&self, stdout: &mut impl Write) -> io::Result<()> {
        execute!(stdout, EnterAlternateScreen, Hide)?;
        ALT_SCREEN_ENABLED.store(true, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

pub(crate) fn restore_terminal() {
    if RAW_MODE_ENABLED.swap(false, Ordering::SeqCst) {
        let _ = disable_raw_mode();
    }
    let mut stdout = io::stdout();
    if ALT_SCREEN_ENABLED.swap(false, Ordering::SeqCst) {
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
    let _ = execute!(stdout, Show);
    let _ = stdout.flush();
}

fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            log_debug(&format!("panic at {location}: {info}"));
            previous(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn guard_installs_panic_hook_once() {
        let _guard = test_lock().lock().expect("test lock");
        let _first = TerminalGuard::new();
        let _second = TerminalGuard::new();
        assert!(PANIC_HOOK_INSTALLED.get().is_some());
    }

    #[test]
    fn restore_terminal_clears_state_flags() {
        let _guard = test_lock().lock().expect("test lock");
        ALT_SCREEN_ENABLED.store(true, Ordering::SeqCst);
        restore_terminal();
        assert!(!RAW_MODE_ENABLED.load(Ordering::SeqCst));
        assert!(!ALT_SCREEN_ENABLED.load(Ordering::SeqCst));
    }

    #[test]
    fn guard_drop_restores_terminal_state() {
        let _guard = test_lock().lock().expect("test lock");
        ALT_SCREEN_ENABLED.store(true, Ordering::SeqCst);
        {
            let _terminal = TerminalGuard::new();
        }
        assert!(!ALT_SCREEN_ENABLED.load(Ordering::SeqCst));
    }
}

//! Input-thread bootstrap so terminal reads stay isolated from render/event logic.

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use optionterm::{log_debug, PanelKey};
use std::thread;

/// Semantic input events so the event loop does not depend on crossterm types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputEvent {
    Key(PanelKey),
    Resize { cols: u16, rows: u16 },
    Exit,
}

pub(crate) fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
    {
        return Some(InputEvent::Exit);
    }
    let panel_key = match key.code {
        KeyCode::Char(ch) => PanelKey::Char(ch),
        KeyCode::Enter => PanelKey::Enter,
        KeyCode::Esc => PanelKey::Esc,
        KeyCode::Backspace => PanelKey::Backspace,
        KeyCode::Tab => PanelKey::Tab,
        KeyCode::Up => PanelKey::Up,
        KeyCode::Down => PanelKey::Down,
        KeyCode::Home => PanelKey::Home,
        KeyCode::End => PanelKey::End,
        _ => PanelKey::Other,
    };
    Some(InputEvent::Key(panel_key))
}

pub(crate) fn translate_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Resize(cols, rows) => Some(InputEvent::Resize { cols, rows }),
        _ => None,
    }
}

pub(crate) fn spawn_input_thread(tx: Sender<InputEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        let event = match event::read() {
            Ok(event) => event,
            Err(err) => {
                log_debug(&format!("terminal read error: {err}"));
                let _ = tx.send(InputEvent::Exit);
                return;
            }
        };
        let Some(input) = translate_event(event) else {
            continue;
        };
        if tx.send(input).is_err() {
            return;
        }
    })
}

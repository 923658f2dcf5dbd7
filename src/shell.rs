//! Interface to the surrounding console: status line, prompts, and sub-editors.
//!
//! The panel only launches these; results come back later through the
//! callbacks, on the same event-loop thread. A callback runs at most once and
//! never runs when the user cancels.

use std::time::Duration;

use crate::palette::Palette;
use crate::settings::{Field, Row};

pub type PromptCallback = Box<dyn FnOnce(String)>;
pub type OneKeyCallback = Box<dyn FnOnce(char)>;
pub type EditorCallback = Box<dyn FnOnce(Vec<Row>)>;
pub type PaletteCallback = Box<dyn FnOnce(Palette)>;

/// Grid editor launch parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorRequest {
    pub field: Field,
    pub title: &'static str,
    pub columns: &'static [&'static str],
    pub rows: Vec<Row>,
}

pub trait Shell {
    /// Transient message; `None` keeps it until the next message.
    fn status_message(&self, text: &str, expire: Option<Duration>);

    fn status_prompt(&self, prompt: &str, initial: &str, on_confirm: PromptCallback);

    fn status_prompt_onekey(
        &self,
        prompt: &str,
        choices: &[(&'static str, char)],
        on_confirm: OneKeyCallback,
    );

    fn open_editor(&self, request: EditorRequest, on_confirm: EditorCallback);

    fn open_palette_picker(&self, current: Palette, on_confirm: PaletteCallback);
}

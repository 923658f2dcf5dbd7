//! Single-line shell: status messages, prompts, and the row editor all share the
//! bottom line of the screen.

use optionterm::palette::Palette;
use optionterm::settings::Row;
use optionterm::shell::{
    EditorCallback, EditorRequest, OneKeyCallback, PaletteCallback, PromptCallback,
};
use optionterm::{log_debug, PanelKey, Shell};
use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

/// Standalone token separating rows in the editor line.
pub(crate) const ROW_SEPARATOR: &str = ";";
const EDITOR_ERROR_TTL: Duration = Duration::from_secs(3);

enum Interaction {
    Prompt {
        prompt: String,
        buffer: String,
        on_confirm: PromptCallback,
    },
    OneKey {
        prompt: String,
        choices: Vec<(&'static str, char)>,
        on_confirm: OneKeyCallback,
    },
    Editor {
        title: &'static str,
        columns: &'static [&'static str],
        buffer: String,
        on_confirm: EditorCallback,
    },
    Palette {
        current: Palette,
        on_confirm: PaletteCallback,
    },
}

impl Interaction {
    fn describe(&self) -> String {
        match self {
            Self::Prompt { prompt, buffer, .. } => format!("{prompt}: {buffer}_"),
            Self::OneKey {
                prompt, choices, ..
            } => {
                let keys: Vec<String> = choices
                    .iter()
                    .map(|(label, key)| format!("{key}:{label}"))
                    .collect();
                format!("{prompt} [{}]", keys.join(" "))
            }
            Self::Editor {
                title,
                columns,
                buffer,
                ..
            } => format!(
                "{title} ({}) {ROW_SEPARATOR} between rows: {buffer}_",
                columns.join(" | ")
            ),
            Self::Palette { current, .. } => {
                let keys: Vec<String> = Palette::ALL
                    .iter()
                    .map(|palette| format!("{}:{palette}", palette.picker_key()))
                    .collect();
                format!("Palette (now {current}) [{}]", keys.join(" "))
            }
        }
    }
}

struct StatusMessage {
    text: String,
    expires_at: Option<Instant>,
}

#[derive(Default)]
pub(crate) struct TerminalShell {
    pending: RefCell<Option<Interaction>>,
    status: RefCell<Option<StatusMessage>>,
    dirty: Cell<bool>,
}

impl TerminalShell {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.pending.borrow().is_some()
    }

    pub(crate) fn take_redraw(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Text for the status line: the open interaction, else the live message.
    pub(crate) fn status_line(&self) -> String {
        if let Some(interaction) = self.pending.borrow().as_ref() {
            return interaction.describe();
        }
        self.status
            .borrow()
            .as_ref()
            .map(|message| message.text.clone())
            .unwrap_or_default()
    }

    /// Drop an expired status message. Returns whether anything changed.
    pub(crate) fn tick(&self, now: Instant) -> bool {
        let mut status = self.status.borrow_mut();
        let expired = status
            .as_ref()
            .and_then(|message| message.expires_at)
            .is_some_and(|deadline| now >= deadline);
        if expired {
            *status = None;
            self.dirty.set(true);
        }
        expired
    }

    /// Route a key to the open interaction. Returns `false` when none is open.
    pub(crate) fn handle_key(&self, key: PanelKey) -> bool {
        let Some(interaction) = self.pending.borrow_mut().take() else {
            return false;
        };
        self.dirty.set(true);
        if key == PanelKey::Esc {
            log_debug("shell interaction canceled");
            return true;
        }
        match interaction {
            Interaction::Prompt {
                prompt,
                mut buffer,
                on_confirm,
            } => {
                if key == PanelKey::Enter {
                    on_confirm(buffer);
                    return true;
                }
                edit_buffer(&mut buffer, key);
                self.resume(Interaction::Prompt {
                    prompt,
                    buffer,
                    on_confirm,
                });
            }
            Interaction::OneKey {
                prompt,
                choices,
                on_confirm,
            } => match key {
                PanelKey::Char(ch) if choices.iter().any(|(_, choice)| *choice == ch) => {
                    on_confirm(ch);
                }
                _ => self.resume(Interaction::OneKey {
                    prompt,
                    choices,
                    on_confirm,
                }),
            },
            Interaction::Editor {
                title,
                columns,
                mut buffer,
                on_confirm,
            } => {
                if key == PanelKey::Enter {
                    match parse_editor_rows(&buffer) {
                        Ok(rows) => {
                            on_confirm(rows);
                            return true;
                        }
                        Err(err) => {
                            self.set_status(format!("{title}: {err}"), Some(EDITOR_ERROR_TTL));
                        }
                    }
                } else {
                    edit_buffer(&mut buffer, key);
                }
                self.resume(Interaction::Editor {
                    title,
                    columns,
                    buffer,
                    on_confirm,
                });
            }
            Interaction::Palette {
                current,
                on_confirm,
            } => {
                let chosen = match key {
                    PanelKey::Enter => Some(current),
                    PanelKey::Char(ch) => Palette::from_picker_key(ch),
                    _ => None,
                };
                match chosen {
                    Some(palette) => on_confirm(palette),
                    None => self.resume(Interaction::Palette {
                        current,
                        on_confirm,
                    }),
                }
            }
        }
        true
    }

    fn resume(&self, interaction: Interaction) {
        *self.pending.borrow_mut() = Some(interaction);
    }

    fn open(&self, interaction: Interaction) {
        if self.pending.borrow_mut().replace(interaction).is_some() {
            log_debug("shell interaction replaced before it finished");
        }
        self.dirty.set(true);
    }

    fn set_status(&self, text: String, expire: Option<Duration>) {
        *self.status.borrow_mut() = Some(StatusMessage {
            text,
            expires_at: expire.map(|ttl| Instant::now() + ttl),
        });
        self.dirty.set(true);
    }
}

fn edit_buffer(buffer: &mut String, key: PanelKey) {
    match key {
        PanelKey::Char(ch) => buffer.push(ch),
        PanelKey::Backspace => {
            buffer.pop();
        }
        _ => {}
    }
}

impl Shell for TerminalShell {
    fn status_message(&self, text: &str, expire: Option<Duration>) {
        self.set_status(text.to_string(), expire);
    }

    fn status_prompt(&self, prompt: &str, initial: &str, on_confirm: PromptCallback) {
        self.open(Interaction::Prompt {
            prompt: prompt.to_string(),
            buffer: initial.to_string(),
            on_confirm,
        });
    }

    fn status_prompt_onekey(
        &self,
        prompt: &str,
        choices: &[(&'static str, char)],
        on_confirm: OneKeyCallback,
    ) {
        self.open(Interaction::OneKey {
            prompt: prompt.to_string(),
            choices: choices.to_vec(),
            on_confirm,
        });
    }

    fn open_editor(&self, request: EditorRequest, on_confirm: EditorCallback) {
        self.open(Interaction::Editor {
            title: request.title,
            columns: request.columns,
            buffer: format_editor_rows(&request.rows),
            on_confirm,
        });
    }

    fn open_palette_picker(&self, current: Palette, on_confirm: PaletteCallback) {
        self.open(Interaction::Palette {
            current,
            on_confirm,
        });
    }
}

/// Rows as shell words, rows joined by a standalone separator token.
pub(crate) fn format_editor_rows(rows: &[Row]) -> String {
    let separator = format!(" {ROW_SEPARATOR} ");
    rows.iter()
        .map(|row| shell_words::join(row))
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

/// Inverse of [`format_editor_rows`]. Empty rows are dropped.
pub(crate) fn parse_editor_rows(line: &str) -> Result<Vec<Row>, shell_words::ParseError> {
    let mut rows = Vec::new();
    let mut current = Row::new();
    for word in shell_words::split(line)? {
        if word == ROW_SEPARATOR {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
        } else {
            current.push(word);
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use optionterm::settings::Field;
    use std::rc::Rc;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|cell| (*cell).to_string()).collect()
    }

    fn type_text(shell: &TerminalShell, text: &str) {
        for ch in text.chars() {
            assert!(shell.handle_key(PanelKey::Char(ch)));
        }
    }

    #[test]
    fn editor_rows_survive_quoting() {
        let rows = vec![
            row(&["~q", "X-Trace", "two words"]),
            row(&["~s", "Server", ""]),
        ];
        let line = format_editor_rows(&rows);
        assert_eq!(parse_editor_rows(&line).expect("parse"), rows);
    }

    #[test]
    fn editor_line_splits_on_standalone_separator_only() {
        let rows = parse_editor_rows("dump.py -q ; 'a;b' ; ; tail.py").expect("parse");
        assert_eq!(
            rows,
            vec![row(&["dump.py", "-q"]), row(&["a;b"]), row(&["tail.py"])]
        );
    }

    #[test]
    fn unbalanced_quote_is_a_parse_error() {
        assert!(parse_editor_rows("'unterminated").is_err());
    }

    #[test]
    fn keys_are_ignored_without_an_interaction() {
        let shell = TerminalShell::new();
        assert!(!shell.handle_key(PanelKey::Char('a')));
    }

    #[test]
    fn prompt_edits_then_confirms() {
        let shell = TerminalShell::new();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        shell.status_prompt(
            "Sticky auth filter",
            "~d",
            Box::new(move |text| *sink.borrow_mut() = Some(text)),
        );
        assert_eq!(shell.status_line(), "Sticky auth filter: ~d_");
        type_text(&shell, " example.comx");
        assert!(shell.handle_key(PanelKey::Backspace));
        assert!(shell.handle_key(PanelKey::Enter));
        assert_eq!(seen.borrow().as_deref(), Some("~d example.com"));
        assert!(!shell.is_busy());
    }

    #[test]
    fn esc_cancels_without_calling_back() {
        let shell = TerminalShell::new();
        let called = Rc::new(Cell::new(false));
        let flag = Rc::clone(&called);
        shell.open_editor(
            EditorRequest {
                field: Field::Scripts,
                title: "Scripts",
                columns: Field::Scripts.column_titles(),
                rows: vec![row(&["dump.py"])],
            },
            Box::new(move |_| flag.set(true)),
        );
        assert!(shell.status_line().contains("dump.py"));
        assert!(shell.handle_key(PanelKey::Esc));
        assert!(!called.get());
        assert!(!shell.is_busy());
    }

    #[test]
    fn one_key_prompt_waits_for_a_listed_key() {
        let shell = TerminalShell::new();
        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        shell.status_prompt_onekey(
            "Mode",
            &[("auto", 'a'), ("json", 's')],
            Box::new(move |key| sink.set(Some(key))),
        );
        assert!(shell.handle_key(PanelKey::Char('z')));
        assert!(shell.is_busy());
        assert!(shell.handle_key(PanelKey::Char('s')));
        assert_eq!(seen.get(), Some('s'));
    }

    #[test]
    fn editor_parse_error_keeps_the_editor_open() {
        let shell = TerminalShell::new();
        let called = Rc::new(Cell::new(false));
        let flag = Rc::clone(&called);
        shell.open_editor(
            EditorRequest {
                field: Field::Scripts,
                title: "Scripts",
                columns: Field::Scripts.column_titles(),
                rows: Vec::new(),
            },
            Box::new(move |_| flag.set(true)),
        );
        type_text(&shell, "\"open");
        assert!(shell.handle_key(PanelKey::Enter));
        assert!(!called.get());
        assert!(shell.is_busy());
        shell.handle_key(PanelKey::Esc);
        assert!(shell.status_line().starts_with("Scripts:"));
    }

    #[test]
    fn palette_picker_confirms_by_number() {
        let shell = TerminalShell::new();
        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        shell.open_palette_picker(
            Palette::Dark,
            Box::new(move |palette| sink.set(Some(palette))),
        );
        assert!(shell.status_line().contains("2:light"));
        assert!(shell.handle_key(PanelKey::Char('2')));
        assert_eq!(seen.get(), Some(Palette::Light));
    }

    #[test]
    fn status_message_expires_on_tick() {
        let shell = TerminalShell::new();
        shell.status_message("All options cleared", Some(Duration::from_secs(1)));
        assert_eq!(shell.status_line(), "All options cleared");
        assert!(!shell.tick(Instant::now()));
        assert!(shell.tick(Instant::now() + Duration::from_secs(2)));
        assert_eq!(shell.status_line(), "");
    }
}

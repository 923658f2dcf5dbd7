//! Option rows: what each row shows (probe) and what selecting it does (activate).

use crate::content_view::ContentView;
use crate::palette::Palette;
use crate::settings::{ConfigAccess, Field, FieldValue, SettingsError};
use crate::shell::EditorRequest;

use super::PanelContext;

const DISPLAY_MODE_PROMPT: &str = "Global default display mode";

/// Current state of one row. Counts are "set" when nonzero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeValue {
    Flag(bool),
    Count(usize),
}

impl ProbeValue {
    #[must_use]
    pub fn is_set(self) -> bool {
        match self {
            Self::Flag(flag) => flag,
            Self::Count(count) => count > 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionAction {
    /// Flip a boolean field in place. `inverted` rows display the negation.
    Toggle { field: Field, inverted: bool },
    /// Edit a row-valued field in the grid editor.
    Collection { field: Field, title: &'static str },
    /// Fill an optional filter through the status prompt.
    TextPrompt { field: Field, prompt: &'static str },
    /// Pick the default content view with a one-key prompt.
    DisplayMode,
    /// Pick the console palette.
    Palette,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDescriptor {
    label: &'static str,
    key: char,
    action: OptionAction,
}

impl OptionDescriptor {
    #[must_use]
    pub const fn new(label: &'static str, key: char, action: OptionAction) -> Self {
        Self { label, key, action }
    }

    #[must_use]
    pub const fn toggle(label: &'static str, key: char, field: Field) -> Self {
        Self::new(
            label,
            key,
            OptionAction::Toggle {
                field,
                inverted: false,
            },
        )
    }

    #[must_use]
    pub const fn inverted_toggle(label: &'static str, key: char, field: Field) -> Self {
        Self::new(
            label,
            key,
            OptionAction::Toggle {
                field,
                inverted: true,
            },
        )
    }

    #[must_use]
    pub const fn collection(label: &'static str, key: char, field: Field) -> Self {
        Self::new(label, key, OptionAction::Collection { field, title: label })
    }

    #[must_use]
    pub const fn text_prompt(
        label: &'static str,
        key: char,
        field: Field,
        prompt: &'static str,
    ) -> Self {
        Self::new(label, key, OptionAction::TextPrompt { field, prompt })
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub fn key(&self) -> char {
        self.key
    }

    #[must_use]
    pub fn action(&self) -> &OptionAction {
        &self.action
    }

    /// Read the live value behind this row. Never cached.
    #[must_use]
    pub fn probe(&self, config: &dyn ConfigAccess) -> ProbeValue {
        match &self.action {
            OptionAction::Toggle { field, inverted } => {
                ProbeValue::Flag(config.flag(*field) != *inverted)
            }
            OptionAction::Collection { field, .. } => ProbeValue::Count(config.rows(*field).len()),
            OptionAction::TextPrompt { field, .. } => {
                ProbeValue::Flag(config.text(*field).is_some())
            }
            OptionAction::DisplayMode => {
                ProbeValue::Flag(config.display_mode() != ContentView::Auto)
            }
            OptionAction::Palette => ProbeValue::Flag(config.palette() != Palette::default()),
        }
    }

    /// Run the row's action. Deferred actions commit only from the shell's
    /// confirm callback, so a cancelled editor or prompt changes nothing.
    pub fn activate(&self, ctx: &PanelContext) {
        match &self.action {
            OptionAction::Toggle { field, .. } => {
                let current = ctx.config.flag(*field);
                ctx.commit(*field, FieldValue::Flag(!current));
            }
            OptionAction::Collection { field, title } => {
                let field = *field;
                let request = EditorRequest {
                    field,
                    title: *title,
                    columns: field.column_titles(),
                    rows: ctx.config.rows(field),
                };
                let commit_ctx = ctx.clone();
                ctx.shell.open_editor(
                    request,
                    Box::new(move |rows| {
                        commit_ctx.commit(field, FieldValue::Rows(rows));
                    }),
                );
            }
            OptionAction::TextPrompt { field, prompt } => {
                let field = *field;
                let initial = ctx.config.text(field).unwrap_or_default();
                let commit_ctx = ctx.clone();
                ctx.shell.status_prompt(
                    prompt,
                    &initial,
                    Box::new(move |text| {
                        commit_ctx.commit(field, FieldValue::Text(Some(text)));
                    }),
                );
            }
            OptionAction::DisplayMode => {
                let commit_ctx = ctx.clone();
                ctx.shell.status_prompt_onekey(
                    DISPLAY_MODE_PROMPT,
                    &ContentView::prompt_choices(),
                    Box::new(move |key| match ContentView::from_key(key) {
                        Some(view) => {
                            commit_ctx.commit(Field::DefaultDisplayMode, FieldValue::View(view));
                        }
                        None => commit_ctx.report_error(&SettingsError::UnknownDisplayModeKey(key)),
                    }),
                );
            }
            OptionAction::Palette => {
                let commit_ctx = ctx.clone();
                ctx.shell.open_palette_picker(
                    ctx.config.palette(),
                    Box::new(move |palette| {
                        commit_ctx.commit(Field::Palette, FieldValue::Palette(palette));
                    }),
                );
            }
        }
    }
}

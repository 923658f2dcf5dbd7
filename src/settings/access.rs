//! Read/write accessor handed to every option row instead of ambient globals.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Field, FieldValue, Row, Settings, SettingsError};
use crate::content_view::ContentView;
use crate::palette::Palette;

/// Live configuration as seen by the panel.
///
/// Writes do not notify anyone; whoever commits a change publishes on the
/// change bus afterwards, which lets a bulk reset publish once.
pub trait ConfigAccess {
    fn get(&self, field: Field) -> FieldValue;

    fn set(&self, field: Field, value: FieldValue) -> Result<(), SettingsError>;

    fn flag(&self, field: Field) -> bool {
        self.get(field).as_flag().unwrap_or(false)
    }

    fn rows(&self, field: Field) -> Vec<Row> {
        self.get(field).into_rows()
    }

    fn text(&self, field: Field) -> Option<String> {
        match self.get(field) {
            FieldValue::Text(text) => text,
            _ => None,
        }
    }

    fn display_mode(&self) -> ContentView {
        match self.get(Field::DefaultDisplayMode) {
            FieldValue::View(view) => view,
            _ => ContentView::default(),
        }
    }

    fn palette(&self) -> Palette {
        match self.get(Field::Palette) {
            FieldValue::Palette(palette) => palette,
            _ => Palette::default(),
        }
    }
}

/// Shared handle to one [`Settings`] value, owned by the event-loop thread.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Rc<RefCell<Settings>>,
}

impl SharedSettings {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Rc::new(RefCell::new(settings)),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Settings {
        self.inner.borrow().clone()
    }
}

impl ConfigAccess for SharedSettings {
    fn get(&self, field: Field) -> FieldValue {
        self.inner.borrow().get(field)
    }

    fn set(&self, field: Field, value: FieldValue) -> Result<(), SettingsError> {
        self.inner.borrow_mut().set(field, value)
    }
}

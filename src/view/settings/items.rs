//! Setting items for the list
//!
//! Each row is one [`SettingItem`]. How a row reacts to activation is decided
//! by its [`SettingKind`], so a row can never be both a cycling choice and a
//! submenu at the same time.

use crate::view::panel::Panel;
use std::fmt;

/// Ids starting with this prefix are group headers, never editable
pub const HEADER_ID_PREFIX: &str = "__header__:";

/// Completion callback handed to a submenu panel.
///
/// `Some(value)` commits the value, `None` means the submenu was cancelled.
pub type SubmenuDone = Box<dyn FnOnce(Option<String>)>;

/// Builds the submenu panel for an item from its current value
pub type SubmenuFactory = Box<dyn Fn(&str, SubmenuDone) -> Box<dyn Panel>>;

/// What activating a row does
pub enum SettingKind {
    /// Advance through a fixed, non-empty list of values
    Cycle(Vec<String>),
    /// Edit the value inline with a text input
    FreeText,
    /// Open a nested panel that reports a value back
    Submenu(SubmenuFactory),
    /// Group title; activation does nothing
    Header,
}

impl fmt::Debug for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingKind::Cycle(values) => f.debug_tuple("Cycle").field(values).finish(),
            SettingKind::FreeText => f.write_str("FreeText"),
            SettingKind::Submenu(_) => f.write_str("Submenu(..)"),
            SettingKind::Header => f.write_str("Header"),
        }
    }
}

/// One row in the settings list
#[derive(Debug)]
pub struct SettingItem {
    /// Reported back through the change callback
    pub id: String,
    pub label: String,
    /// Shown below the list while the row is selected
    pub description: Option<String>,
    /// Displayed value. The list only caches it; the store owns the truth.
    pub current_value: String,
    pub kind: SettingKind,
}

impl SettingItem {
    /// A free-text row
    pub fn free_text(
        id: impl Into<String>,
        label: impl Into<String>,
        current_value: impl Into<String>,
    ) -> Self {
        Self::from_parts(id, label, current_value, None, None)
    }

    /// A cycling row. An empty `values` list makes it a free-text row.
    pub fn cycle(
        id: impl Into<String>,
        label: impl Into<String>,
        current_value: impl Into<String>,
        values: Vec<String>,
    ) -> Self {
        Self::from_parts(id, label, current_value, Some(values), None)
    }

    /// A row whose value is edited by a nested panel
    pub fn submenu(
        id: impl Into<String>,
        label: impl Into<String>,
        current_value: impl Into<String>,
        factory: SubmenuFactory,
    ) -> Self {
        Self::from_parts(id, label, current_value, None, Some(factory))
    }

    /// A group header titled after `scope`
    pub fn header(scope: &str) -> Self {
        Self {
            id: format!("{HEADER_ID_PREFIX}{scope}"),
            label: scope.to_string(),
            description: None,
            current_value: String::new(),
            kind: SettingKind::Header,
        }
    }

    /// Build a row from the loose shape used by item providers.
    ///
    /// A submenu wins over values, empty values mean free text, and an id with
    /// the header prefix always yields a header.
    pub fn from_parts(
        id: impl Into<String>,
        label: impl Into<String>,
        current_value: impl Into<String>,
        values: Option<Vec<String>>,
        submenu: Option<SubmenuFactory>,
    ) -> Self {
        let id = id.into();
        let kind = if id.starts_with(HEADER_ID_PREFIX) {
            SettingKind::Header
        } else if let Some(factory) = submenu {
            SettingKind::Submenu(factory)
        } else {
            match values {
                Some(values) if !values.is_empty() => SettingKind::Cycle(values),
                _ => SettingKind::FreeText,
            }
        };

        Self {
            id,
            label: label.into(),
            description: None,
            current_value: current_value.into(),
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_header(&self) -> bool {
        matches!(self.kind, SettingKind::Header)
    }
}

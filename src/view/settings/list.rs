//! Settings list state machine
//!
//! The list is always in exactly one of three modes. While browsing, keys
//! move the selection, activate rows or feed the search field. While editing,
//! keys go to the inline text input. While a submenu is open, keys go to the
//! child panel until it reports completion through its done callback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::Line;
use rust_i18n::t;

use super::items::{SettingItem, SettingKind, SubmenuDone};
use crate::config::ListConfig;
use crate::input::fuzzy::fuzzy_filter;
use crate::input::keybindings::{Action, KeybindingResolver};
use crate::primitives::display_width::str_width;
use crate::view::controls::{TextInputEvent, TextInputState};
use crate::view::panel::Panel;
use crate::view::theme::SettingsListTheme;

/// Called with `(id, new_value)` whenever a row's value is committed
pub type ChangeCallback = Box<dyn FnMut(&str, &str)>;

/// Called when the user leaves the list
pub type CancelCallback = Box<dyn FnMut()>;

/// Layout and behavior knobs for [`SettingsList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsListOptions {
    /// Maximum number of rows in the window
    pub max_visible: usize,
    /// Typing filters the list when enabled
    pub enable_search: bool,
    /// Cap on the label column
    pub max_label_width: usize,
}

impl Default for SettingsListOptions {
    fn default() -> Self {
        Self::from_config(&ListConfig::default())
    }
}

impl SettingsListOptions {
    pub fn from_config(config: &ListConfig) -> Self {
        Self {
            max_visible: config.max_visible,
            enable_search: config.enable_search,
            max_label_width: config.max_label_width,
        }
    }
}

/// A child panel opened from a submenu row
pub(super) struct ActiveSubmenu {
    pub(super) panel: Box<dyn Panel>,
    /// Row whose value the submenu edits
    item_index: usize,
    /// Selection to restore once the submenu closes
    display_index: usize,
    /// Written by the child's done callback: `Some(None)` is a cancel
    outcome: Rc<RefCell<Option<Option<String>>>>,
}

pub(super) enum Mode {
    Browsing,
    Editing {
        item_index: usize,
        input: TextInputState,
    },
    Submenu(ActiveSubmenu),
}

/// Interactive list of settings with search, inline editing and submenus
pub struct SettingsList {
    pub(super) items: Vec<SettingItem>,
    /// Item indices in display order
    pub(super) filtered: Vec<usize>,
    /// Index into `filtered`
    pub(super) selected_index: usize,
    pub(super) mode: Mode,
    pub(super) search: Option<TextInputState>,
    pub(super) options: SettingsListOptions,
    pub(super) theme: SettingsListTheme,
    pub(super) keys: Rc<KeybindingResolver>,
    on_change: ChangeCallback,
    on_cancel: CancelCallback,
    label_width_cache: Cell<Option<usize>>,
}

/// What activating the selected row resolved to
enum Activation {
    Ignore,
    Commit(String),
    Edit(String),
    OpenSubmenu(Box<dyn Panel>, Rc<RefCell<Option<Option<String>>>>),
}

impl SettingsList {
    pub fn new(
        items: Vec<SettingItem>,
        options: SettingsListOptions,
        on_change: ChangeCallback,
        on_cancel: CancelCallback,
    ) -> Self {
        let filtered = (0..items.len()).collect();
        let search = options.enable_search.then(|| {
            TextInputState::new().with_placeholder(t!("settings.search_placeholder"))
        });

        Self {
            items,
            filtered,
            selected_index: 0,
            mode: Mode::Browsing,
            search,
            options,
            theme: SettingsListTheme::default(),
            keys: Rc::new(KeybindingResolver::default()),
            on_change,
            on_cancel,
            label_width_cache: Cell::new(None),
        }
    }

    pub fn with_theme(mut self, theme: SettingsListTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_keybindings(mut self, keys: Rc<KeybindingResolver>) -> Self {
        self.keys = keys;
        self
    }

    /// Replace a displayed value without firing the change callback.
    ///
    /// Unknown ids are ignored.
    pub fn update_value(&mut self, id: &str, value: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.current_value = value.to_string();
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Ids of the rows currently displayed, in display order
    pub fn displayed_ids(&self) -> Vec<&str> {
        self.filtered
            .iter()
            .map(|&index| self.items[index].id.as_str())
            .collect()
    }

    /// Displayed value of the row with `id`
    pub fn value_of(&self, id: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.current_value.as_str())
    }

    /// Current search text, empty when search is disabled
    pub fn search_query(&self) -> &str {
        self.search.as_ref().map_or("", |search| search.value())
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing { .. })
    }

    pub fn is_submenu_active(&self) -> bool {
        matches!(self.mode, Mode::Submenu(_))
    }

    /// Width of the label column, shared by all rows and cached until
    /// [`Panel::invalidate`].
    pub(super) fn label_width(&self) -> usize {
        if let Some(width) = self.label_width_cache.get() {
            return width;
        }
        let width = self
            .items
            .iter()
            .map(|item| str_width(&item.label))
            .max()
            .unwrap_or(0)
            .min(self.options.max_label_width);
        self.label_width_cache.set(Some(width));
        width
    }

    fn handle_browsing_key(&mut self, key: KeyEvent) {
        let len = self.filtered.len();

        match self.keys.resolve(&key) {
            Action::SelectUp => {
                if len > 0 {
                    self.selected_index = (self.selected_index + len - 1) % len;
                }
            }
            Action::SelectDown => {
                if len > 0 {
                    self.selected_index = (self.selected_index + 1) % len;
                }
            }
            Action::SelectConfirm | Action::InsertChar(' ') => self.activate(),
            Action::SelectCancel => {
                tracing::debug!("Settings list cancelled");
                (self.on_cancel)();
            }
            _ => self.handle_search_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let Some(search) = self.search.as_mut() else {
            return;
        };
        // Space is reserved for activation
        if key.code == KeyCode::Char(' ') {
            return;
        }
        if let Some(TextInputEvent::Changed(query)) = search.handle_key(key) {
            self.apply_filter(&query);
        }
    }

    fn apply_filter(&mut self, query: &str) {
        self.filtered = if query.is_empty() {
            (0..self.items.len()).collect()
        } else {
            fuzzy_filter(query, &self.items, |item| item.label.as_str())
                .into_iter()
                .map(|(index, _)| index)
                .filter(|&index| !self.items[index].is_header())
                .collect()
        };
        self.selected_index = 0;
        tracing::debug!(
            "Search {:?} matched {} of {} settings",
            query,
            self.filtered.len(),
            self.items.len()
        );
    }

    fn activate(&mut self) {
        let display_index = self.selected_index;
        let Some(&item_index) = self.filtered.get(display_index) else {
            return;
        };

        let activation = {
            let item = &self.items[item_index];
            match &item.kind {
                SettingKind::Header => Activation::Ignore,
                SettingKind::Cycle(values) => {
                    // An unknown current value lands on the first entry
                    let next = values
                        .iter()
                        .position(|value| *value == item.current_value)
                        .map_or(0, |pos| (pos + 1) % values.len());
                    match values.get(next) {
                        Some(value) => Activation::Commit(value.clone()),
                        None => Activation::Ignore,
                    }
                }
                SettingKind::FreeText => Activation::Edit(item.current_value.clone()),
                SettingKind::Submenu(factory) => {
                    let outcome = Rc::new(RefCell::new(None));
                    let slot = Rc::clone(&outcome);
                    let done: SubmenuDone = Box::new(move |value| {
                        *slot.borrow_mut() = Some(value);
                    });
                    Activation::OpenSubmenu(factory(&item.current_value, done), outcome)
                }
            }
        };

        match activation {
            Activation::Ignore => {}
            Activation::Commit(value) => self.commit(item_index, value),
            Activation::Edit(current) => {
                tracing::debug!("Editing setting {}", self.items[item_index].id);
                self.mode = Mode::Editing {
                    item_index,
                    input: TextInputState::new().with_value(current),
                };
            }
            Activation::OpenSubmenu(panel, outcome) => {
                tracing::debug!("Opening submenu for {}", self.items[item_index].id);
                self.mode = Mode::Submenu(ActiveSubmenu {
                    panel,
                    item_index,
                    display_index,
                    outcome,
                });
                // The child may have completed while being built
                self.apply_submenu_outcome();
            }
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        let action = self.keys.resolve(&key);
        let Mode::Editing { item_index, input } = &mut self.mode else {
            return;
        };
        let item_index = *item_index;

        let event = match action {
            Action::SelectConfirm => Some(TextInputEvent::Submitted(input.value.clone())),
            Action::SelectCancel => Some(TextInputEvent::Cancelled),
            _ => input.handle_key(key),
        };

        match event {
            Some(TextInputEvent::Submitted(value)) => {
                self.mode = Mode::Browsing;
                self.commit(item_index, value);
            }
            Some(TextInputEvent::Cancelled) => {
                tracing::debug!("Edit of {} discarded", self.items[item_index].id);
                self.mode = Mode::Browsing;
            }
            Some(TextInputEvent::Changed(_)) | None => {}
        }
    }

    fn forward_to_submenu(&mut self, key: KeyEvent) {
        if let Mode::Submenu(active) = &mut self.mode {
            active.panel.handle_key(key);
        }
        self.apply_submenu_outcome();
    }

    /// Close the submenu if its done callback has fired
    fn apply_submenu_outcome(&mut self) {
        let outcome = match &self.mode {
            Mode::Submenu(active) => active.outcome.borrow_mut().take(),
            _ => return,
        };
        let Some(outcome) = outcome else {
            return;
        };

        let Mode::Submenu(active) = std::mem::replace(&mut self.mode, Mode::Browsing) else {
            return;
        };
        self.selected_index = active.display_index;

        match outcome {
            Some(value) => self.commit(active.item_index, value),
            None => tracing::debug!(
                "Submenu for {} cancelled",
                self.items[active.item_index].id
            ),
        }
    }

    fn commit(&mut self, item_index: usize, value: String) {
        let item = &mut self.items[item_index];
        item.current_value = value;
        tracing::debug!("Setting {} changed to {:?}", item.id, item.current_value);
        (self.on_change)(&item.id, &item.current_value);
    }
}

impl Panel for SettingsList {
    fn render(&self, width: usize) -> Vec<Line<'static>> {
        match &self.mode {
            Mode::Submenu(active) => active.panel.render(width),
            _ => self.render_list(width),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Submenu(_) => self.forward_to_submenu(key),
            Mode::Editing { .. } => self.handle_editing_key(key),
            Mode::Browsing => self.handle_browsing_key(key),
        }
    }

    fn invalidate(&mut self) {
        self.label_width_cache.set(None);
        if let Mode::Submenu(active) = &mut self.mode {
            active.panel.invalidate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::items::SubmenuFactory;
    use super::*;
    use crossterm::event::KeyModifiers;

    type Changes = Rc<RefCell<Vec<(String, String)>>>;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn values(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn list_with(items: Vec<SettingItem>, enable_search: bool) -> (SettingsList, Changes) {
        let changes: Changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let options = SettingsListOptions {
            enable_search,
            ..SettingsListOptions::default()
        };
        let list = SettingsList::new(
            items,
            options,
            Box::new(move |id: &str, value: &str| {
                sink.borrow_mut().push((id.to_string(), value.to_string()))
            }),
            Box::new(|| {}),
        );
        (list, changes)
    }

    #[test]
    fn test_cycle_advances_and_wraps() {
        let (mut list, changes) = list_with(
            vec![SettingItem::cycle("timeout", "Timeout", "30", values(&["10", "30", "60"]))],
            false,
        );

        list.handle_key(key(KeyCode::Enter));
        assert_eq!(list.value_of("timeout"), Some("60"));
        list.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(list.value_of("timeout"), Some("10"));

        assert_eq!(
            *changes.borrow(),
            vec![
                ("timeout".to_string(), "60".to_string()),
                ("timeout".to_string(), "10".to_string())
            ]
        );
    }

    #[test]
    fn test_cycle_unknown_value_lands_on_first() {
        let (mut list, _) = list_with(
            vec![SettingItem::cycle("mode", "Mode", "weird", values(&["a", "b"]))],
            false,
        );
        list.handle_key(key(KeyCode::Enter));
        assert_eq!(list.value_of("mode"), Some("a"));
    }

    #[test]
    fn test_navigation_wraps() {
        let (mut list, _) = list_with(
            vec![
                SettingItem::free_text("a", "A", ""),
                SettingItem::free_text("b", "B", ""),
                SettingItem::free_text("c", "C", ""),
            ],
            false,
        );
        list.handle_key(key(KeyCode::Up));
        assert_eq!(list.selected_index(), 2);
        list.handle_key(key(KeyCode::Down));
        assert_eq!(list.selected_index(), 0);
    }

    #[test]
    fn test_header_activation_is_noop() {
        let (mut list, changes) = list_with(vec![SettingItem::header("editor")], false);
        list.handle_key(key(KeyCode::Enter));
        assert!(!list.is_editing());
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_edit_commit_and_discard() {
        let (mut list, changes) =
            list_with(vec![SettingItem::free_text("greeting", "Greeting", "")], false);

        list.handle_key(key(KeyCode::Enter));
        assert!(list.is_editing());
        for c in "hi there".chars() {
            list.handle_key(key(KeyCode::Char(c)));
        }
        list.handle_key(key(KeyCode::Enter));
        assert!(!list.is_editing());
        assert_eq!(list.value_of("greeting"), Some("hi there"));

        list.handle_key(key(KeyCode::Enter));
        list.handle_key(key(KeyCode::Char('!')));
        list.handle_key(key(KeyCode::Esc));
        assert_eq!(list.value_of("greeting"), Some("hi there"));
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn test_search_filters_and_resets_selection() {
        let (mut list, _) = list_with(
            vec![
                SettingItem::free_text("timeout", "Timeout", ""),
                SettingItem::free_text("debug", "Debug Mode", ""),
                SettingItem::free_text("theme", "Theme", ""),
            ],
            true,
        );
        list.handle_key(key(KeyCode::Down));
        for c in "the".chars() {
            list.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(list.search_query(), "the");
        assert_eq!(list.displayed_ids(), vec!["theme"]);
        assert_eq!(list.selected_index(), 0);

        for _ in 0..3 {
            list.handle_key(key(KeyCode::Backspace));
        }
        assert_eq!(list.displayed_ids(), vec!["timeout", "debug", "theme"]);
    }

    #[test]
    fn test_update_value_is_silent() {
        let (mut list, changes) = list_with(vec![SettingItem::free_text("a", "A", "x")], false);
        list.update_value("a", "y");
        list.update_value("missing", "z");
        assert_eq!(list.value_of("a"), Some("y"));
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_label_width_cache_invalidated() {
        let (mut list, _) = list_with(vec![SettingItem::free_text("a", "Short", "")], false);
        assert_eq!(list.label_width(), 5);
        list.items[0].label = "Much longer".to_string();
        assert_eq!(list.label_width(), 5);
        list.invalidate();
        assert_eq!(list.label_width(), 11);
    }

    struct CountingPanel {
        invalidations: Rc<Cell<usize>>,
    }

    impl Panel for CountingPanel {
        fn render(&self, _width: usize) -> Vec<Line<'static>> {
            Vec::new()
        }

        fn handle_key(&mut self, _key: KeyEvent) {}

        fn invalidate(&mut self) {
            self.invalidations.set(self.invalidations.get() + 1);
        }
    }

    #[test]
    fn test_invalidate_reaches_open_submenu() {
        let invalidations = Rc::new(Cell::new(0));
        let counter = Rc::clone(&invalidations);
        let factory: SubmenuFactory =
            Box::new(move |_: &str, _: SubmenuDone| -> Box<dyn Panel> {
                Box::new(CountingPanel {
                    invalidations: Rc::clone(&counter),
                })
            });
        let items = vec![SettingItem::submenu("s", "Sub", "", factory)];
        let (mut list, _) = list_with(items, false);

        // Nothing to forward to while browsing
        list.invalidate();
        assert_eq!(invalidations.get(), 0);

        list.handle_key(key(KeyCode::Enter));
        assert!(list.is_submenu_active());
        list.invalidate();
        assert_eq!(invalidations.get(), 1);
    }
}

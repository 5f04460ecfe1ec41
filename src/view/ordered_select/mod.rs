//! Ordered multi-select panel
//!
//! Picks a subset of options and puts it in a user-defined order. The result
//! is the selected ids joined with commas, first id first. Selected options
//! are listed on top in their chosen order, the rest below in declaration
//! order.

mod render;

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::Line;

use crate::input::keybindings::{Action, KeybindingResolver};
use crate::view::panel::Panel;
use crate::view::theme::OrderedListTheme;

/// One candidate in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedListOption {
    /// Token written to the result
    pub id: String,
    pub label: String,
}

impl OrderedListOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Receives the joined ids on confirm, `None` on cancel
pub type DoneCallback = Box<dyn FnOnce(Option<String>)>;

/// Split a stored value into ids: trimmed, no empties, no duplicates.
pub fn parse_selection(value: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for token in value.split(',').map(str::trim) {
        if !token.is_empty() && !ids.iter().any(|id| id == token) {
            ids.push(token.to_string());
        }
    }
    ids
}

/// A row of the displayed sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DisplayEntry {
    pub(crate) option_index: usize,
    /// 1-based rank among the displayed selected options
    pub(crate) position: Option<usize>,
}

pub struct OrderedMultiSelect {
    options: Vec<OrderedListOption>,
    /// Chosen ids in order. Ids without a matching option are kept as they
    /// are and passed through on confirm.
    selected: Vec<String>,
    cursor_index: usize,
    max_visible: usize,
    theme: OrderedListTheme,
    keys: Rc<KeybindingResolver>,
    on_done: Option<DoneCallback>,
}

impl OrderedMultiSelect {
    pub fn new(options: Vec<OrderedListOption>, current_value: &str, on_done: DoneCallback) -> Self {
        let selected = parse_selection(current_value);
        let unknown = selected
            .iter()
            .filter(|id| !options.iter().any(|option| &option.id == *id))
            .count();
        if unknown > 0 {
            tracing::debug!("Keeping {} selected ids with no matching option", unknown);
        }

        Self {
            options,
            selected,
            cursor_index: 0,
            max_visible: 10,
            theme: OrderedListTheme::default(),
            keys: Rc::new(KeybindingResolver::default()),
            on_done: Some(on_done),
        }
    }

    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible.max(1);
        self
    }

    pub fn with_theme(mut self, theme: OrderedListTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_keybindings(mut self, keys: Rc<KeybindingResolver>) -> Self {
        self.keys = keys;
        self
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// The value confirm would report
    pub fn value(&self) -> String {
        self.selected.join(",")
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor_index
    }

    /// Option ids in display order
    pub fn displayed_ids(&self) -> Vec<&str> {
        self.displayed()
            .into_iter()
            .map(|entry| self.options[entry.option_index].id.as_str())
            .collect()
    }

    /// Whether the done callback has fired
    pub fn is_done(&self) -> bool {
        self.on_done.is_none()
    }

    fn option_index(&self, id: &str) -> Option<usize> {
        self.options.iter().position(|option| option.id == id)
    }

    pub(crate) fn displayed(&self) -> Vec<DisplayEntry> {
        let mut entries: Vec<DisplayEntry> = self
            .selected
            .iter()
            .filter_map(|id| self.option_index(id))
            .enumerate()
            .map(|(rank, option_index)| DisplayEntry {
                option_index,
                position: Some(rank + 1),
            })
            .collect();

        entries.extend(
            self.options
                .iter()
                .enumerate()
                .filter(|(_, option)| !self.selected.contains(&option.id))
                .map(|(option_index, _)| DisplayEntry {
                    option_index,
                    position: None,
                }),
        );
        entries
    }

    fn move_cursor(&mut self, up: bool) {
        let len = self.options.len();
        if len == 0 {
            return;
        }
        self.cursor_index = if up {
            (self.cursor_index + len - 1) % len
        } else {
            (self.cursor_index + 1) % len
        };
    }

    fn toggle(&mut self) {
        let Some(entry) = self.displayed().get(self.cursor_index).copied() else {
            return;
        };
        let id = &self.options[entry.option_index].id;

        if let Some(pos) = self.selected.iter().position(|selected| selected == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id.clone());
        }
        tracing::trace!("Selection is now {:?}", self.selected);
    }

    /// Swap the selected option under the cursor with its displayed
    /// neighbor, the cursor following it.
    fn move_item(&mut self, up: bool) {
        let entries = self.displayed();
        let Some(entry) = entries.get(self.cursor_index) else {
            return;
        };
        if entry.position.is_none() {
            return;
        }

        // Selected options occupy the first display rows, in order
        let neighbor = if up {
            match self.cursor_index.checked_sub(1) {
                Some(index) => index,
                None => return,
            }
        } else {
            self.cursor_index + 1
        };
        let Some(other) = entries.get(neighbor).filter(|other| other.position.is_some()) else {
            return;
        };

        let a = &self.options[entry.option_index].id;
        let b = &self.options[other.option_index].id;
        let (Some(ia), Some(ib)) = (
            self.selected.iter().position(|id| id == a),
            self.selected.iter().position(|id| id == b),
        ) else {
            return;
        };
        self.selected.swap(ia, ib);
        self.cursor_index = neighbor;
    }

    fn finish(&mut self, result: Option<String>) {
        if let Some(on_done) = self.on_done.take() {
            tracing::debug!("Ordered selection finished with {:?}", result);
            on_done(result);
        }
    }
}

impl Panel for OrderedMultiSelect {
    fn render(&self, width: usize) -> Vec<Line<'static>> {
        self.render_lines(width)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.is_done() {
            return;
        }

        match self.keys.resolve(&key) {
            Action::SelectUp => self.move_cursor(true),
            Action::SelectDown => self.move_cursor(false),
            Action::MoveItemUp => self.move_item(true),
            Action::MoveItemDown => self.move_item(false),
            Action::InsertChar(' ') => self.toggle(),
            Action::SelectConfirm => {
                let value = self.value();
                self.finish(Some(value));
            }
            Action::SelectCancel => self.finish(None),
            _ if key.modifiers == KeyModifiers::NONE => match key.code {
                KeyCode::Up => self.move_cursor(true),
                KeyCode::Down => self.move_cursor(false),
                _ => {}
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    type Outcome = Rc<RefCell<Vec<Option<String>>>>;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shift(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::SHIFT)
    }

    fn abc(current: &str) -> (OrderedMultiSelect, Outcome) {
        let outcome: Outcome = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&outcome);
        let options = vec![
            OrderedListOption::new("a", "Alpha"),
            OrderedListOption::new("b", "Beta"),
            OrderedListOption::new("c", "Gamma"),
        ];
        let widget = OrderedMultiSelect::new(
            options,
            current,
            Box::new(move |value| sink.borrow_mut().push(value)),
        );
        (widget, outcome)
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection(""), Vec::<String>::new());
        assert_eq!(parse_selection(" a, ,b,,a , c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_pick_b_then_a() {
        let (mut widget, outcome) = abc("");
        widget.handle_key(key(KeyCode::Down));
        widget.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(widget.selected(), ["b"]);
        assert_eq!(widget.displayed_ids(), vec!["b", "a", "c"]);

        // The cursor stays on row 1, which is now "a"
        widget.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(widget.selected(), ["b", "a"]);

        widget.handle_key(key(KeyCode::Enter));
        assert_eq!(*outcome.borrow(), vec![Some("b,a".to_string())]);
    }

    #[test]
    fn test_toggle_off_then_on_appends() {
        let (mut widget, _) = abc("a,b,c");
        widget.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(widget.selected(), ["b", "c"]);
        // "a" is now the last row
        widget.handle_key(key(KeyCode::Up));
        widget.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(widget.selected(), ["b", "c", "a"]);
    }

    #[test]
    fn test_reorder_follows_cursor() {
        let (mut widget, _) = abc("a,b,c");
        widget.handle_key(key(KeyCode::Down));
        widget.handle_key(shift(KeyCode::Up));
        assert_eq!(widget.selected(), ["b", "a", "c"]);
        assert_eq!(widget.cursor_index(), 0);

        widget.handle_key(shift(KeyCode::Down));
        assert_eq!(widget.selected(), ["a", "b", "c"]);
        assert_eq!(widget.cursor_index(), 1);
    }

    #[test]
    fn test_reorder_noops() {
        let (mut widget, _) = abc("a");
        // Top boundary
        widget.handle_key(shift(KeyCode::Up));
        // Bottom boundary of the selected group
        widget.handle_key(shift(KeyCode::Down));
        assert_eq!(widget.selected(), ["a"]);
        assert_eq!(widget.cursor_index(), 0);

        // Unselected item
        widget.handle_key(key(KeyCode::Down));
        widget.handle_key(shift(KeyCode::Up));
        assert_eq!(widget.selected(), ["a"]);
        assert_eq!(widget.cursor_index(), 1);
    }

    #[test]
    fn test_cancel_reports_none() {
        let (mut widget, outcome) = abc("a");
        widget.handle_key(key(KeyCode::Char(' ')));
        widget.handle_key(key(KeyCode::Esc));
        assert_eq!(*outcome.borrow(), vec![None]);
        assert!(widget.is_done());

        // Further input is ignored
        widget.handle_key(key(KeyCode::Enter));
        assert_eq!(outcome.borrow().len(), 1);
    }

    #[test]
    fn test_unknown_ids_survive_confirm() {
        let (mut widget, outcome) = abc("x,b");
        assert_eq!(widget.displayed_ids(), vec!["b", "a", "c"]);
        // Toggle "a" on
        widget.handle_key(key(KeyCode::Down));
        widget.handle_key(key(KeyCode::Char(' ')));
        widget.handle_key(key(KeyCode::Enter));
        assert_eq!(*outcome.borrow(), vec![Some("x,b,a".to_string())]);
    }

    #[test]
    fn test_reorder_skips_over_unknown_ids() {
        let (mut widget, _) = abc("a,x,b");
        widget.handle_key(key(KeyCode::Down));
        widget.handle_key(shift(KeyCode::Up));
        assert_eq!(widget.selected(), ["b", "x", "a"]);
        assert_eq!(widget.cursor_index(), 0);
    }

    #[test]
    fn test_empty_options_still_cancel() {
        let outcome: Outcome = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&outcome);
        let mut widget = OrderedMultiSelect::new(
            Vec::new(),
            "",
            Box::new(move |value| sink.borrow_mut().push(value)),
        );
        widget.handle_key(key(KeyCode::Down));
        widget.handle_key(key(KeyCode::Char(' ')));
        assert!(widget.render(40).is_empty());
        widget.handle_key(key(KeyCode::Esc));
        assert_eq!(*outcome.borrow(), vec![None]);
    }
}

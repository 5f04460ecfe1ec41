// Helpers shared by the integration tests
#![allow(dead_code)]

pub mod tracing;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cell::RefCell;
use std::rc::Rc;
use tui_settings::view::panel::Panel;
use tui_settings::view::settings::{SettingItem, SettingsList, SettingsListOptions};

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn shift(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}

/// Send each character of `text` as its own key
pub fn type_text(panel: &mut dyn Panel, text: &str) {
    for c in text.chars() {
        panel.handle_key(key(KeyCode::Char(c)));
    }
}

pub type Changes = Rc<RefCell<Vec<(String, String)>>>;

/// A list recording every change callback, plus a cancel counter
pub struct Harness {
    pub list: SettingsList,
    pub changes: Changes,
    pub cancels: Rc<RefCell<usize>>,
}

pub fn harness(items: Vec<SettingItem>, enable_search: bool) -> Harness {
    let changes: Changes = Rc::new(RefCell::new(Vec::new()));
    let cancels = Rc::new(RefCell::new(0));

    let on_change = {
        let changes = Rc::clone(&changes);
        Box::new(move |id: &str, value: &str| {
            changes.borrow_mut().push((id.to_string(), value.to_string()));
        })
    };
    let on_cancel = {
        let cancels = Rc::clone(&cancels);
        Box::new(move || *cancels.borrow_mut() += 1)
    };

    let list = SettingsList::new(
        items,
        SettingsListOptions {
            enable_search,
            ..SettingsListOptions::default()
        },
        on_change,
        on_cancel,
    );

    Harness {
        list,
        changes,
        cancels,
    }
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

//! Settings session
//!
//! Ties the registry, a store and the settings list together. The list
//! reports changes through its callback; the session queues them and, once
//! the key that caused them has been handled, decodes each value and writes
//! it to the store. A value that does not decode is not stored and the row
//! falls back to the stored value.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crossterm::event::KeyEvent;
use ratatui::text::Line;

use crate::config::Config;
use crate::input::keybindings::KeybindingResolver;
use crate::services::registry::{decode_value, encode_value, SettingsRegistry};
use crate::services::store::SettingsStore;
use crate::view::panel::Panel;
use crate::view::settings::{SettingsList, SettingsListOptions};
use crate::view::theme::{OrderedListTheme, SettingsListTheme};

/// Whether the session still accepts input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Open,
    /// The user left the list
    Closed,
}

pub struct SettingsSession<S: SettingsStore> {
    registry: SettingsRegistry,
    store: S,
    list: SettingsList,
    pending: Rc<RefCell<Vec<(String, String)>>>,
    closed: Rc<Cell<bool>>,
}

impl<S: SettingsStore> SettingsSession<S> {
    pub fn new(registry: SettingsRegistry, store: S, config: &Config) -> Self {
        let keys = Rc::new(KeybindingResolver::new(&config.keybindings));
        let items = registry.build_items(
            &store,
            &keys,
            &OrderedListTheme::from_config(&config.theme),
            config.list.max_visible,
        );

        let pending = Rc::new(RefCell::new(Vec::new()));
        let closed = Rc::new(Cell::new(false));
        let on_change = {
            let pending = Rc::clone(&pending);
            Box::new(move |id: &str, value: &str| {
                pending
                    .borrow_mut()
                    .push((id.to_string(), value.to_string()));
            })
        };
        let on_cancel = {
            let closed = Rc::clone(&closed);
            Box::new(move || closed.set(true))
        };

        let list = SettingsList::new(
            items,
            SettingsListOptions::from_config(&config.list),
            on_change,
            on_cancel,
        )
        .with_theme(SettingsListTheme::from_config(&config.theme))
        .with_keybindings(keys);

        Self {
            registry,
            store,
            list,
            pending,
            closed,
        }
    }

    /// Feed one key to the list and store whatever it committed
    pub fn handle_key(&mut self, key: KeyEvent) -> SessionStatus {
        if self.closed.get() {
            return SessionStatus::Closed;
        }

        self.list.handle_key(key);
        self.apply_pending();

        if self.closed.get() {
            tracing::debug!("Settings session closed");
            SessionStatus::Closed
        } else {
            SessionStatus::Open
        }
    }

    fn apply_pending(&mut self) {
        let changes = std::mem::take(&mut *self.pending.borrow_mut());

        for (item_id, raw) in changes {
            let Some((scope, definition)) = self.registry.find(&item_id) else {
                tracing::warn!("Change for unknown setting {}", item_id);
                continue;
            };

            match decode_value(definition, &raw) {
                Ok(value) => {
                    tracing::info!("Committed setting {} = {}", item_id, value);
                    // Show the value as stored, e.g. a trimmed number
                    let shown = encode_value(&value);
                    self.store.set(scope, &definition.id, value);
                    if shown != raw {
                        self.list.update_value(&item_id, &shown);
                    }
                }
                Err(e) => {
                    tracing::warn!("Rejected value for {}: {}", item_id, e);
                    let stored = self.store.get(scope, &definition.id, &definition.default);
                    self.list.update_value(&item_id, &encode_value(&stored));
                }
            }
        }
    }

    pub fn render(&self, width: usize) -> Vec<Line<'static>> {
        self.list.render(width)
    }

    pub fn invalidate(&mut self) {
        self.list.invalidate();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    pub fn list(&self) -> &SettingsList {
        &self.list
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

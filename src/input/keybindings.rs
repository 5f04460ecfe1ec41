//! Key event to action resolution
//!
//! Panels never look at raw key codes for their navigation vocabulary; they
//! ask the resolver which [`Action`] a key event stands for. Custom bindings
//! from the config file take precedence over the built-in defaults.

use crate::config::Keybinding;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Semantic actions understood by the settings panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SelectUp,
    SelectDown,
    SelectConfirm,
    SelectCancel,
    /// Move the item under the cursor one step earlier in its ordering
    MoveItemUp,
    /// Move the item under the cursor one step later in its ordering
    MoveItemDown,
    /// A literal character with no binding of its own
    InsertChar(char),
    None,
}

impl Action {
    /// Parse an action name as written in the config file
    pub fn from_str(s: &str) -> Option<Action> {
        Some(match s {
            "select_up" => Action::SelectUp,
            "select_down" => Action::SelectDown,
            "select_confirm" => Action::SelectConfirm,
            "select_cancel" => Action::SelectCancel,
            "move_item_up" => Action::MoveItemUp,
            "move_item_down" => Action::MoveItemDown,
            _ => return None,
        })
    }

    /// The config-file name of this action, if it is bindable
    pub fn name(&self) -> Option<&'static str> {
        Some(match self {
            Action::SelectUp => "select_up",
            Action::SelectDown => "select_down",
            Action::SelectConfirm => "select_confirm",
            Action::SelectCancel => "select_cancel",
            Action::MoveItemUp => "move_item_up",
            Action::MoveItemDown => "move_item_down",
            Action::InsertChar(_) | Action::None => return None,
        })
    }
}

type BindingMap = HashMap<(KeyCode, KeyModifiers), Action>;

static DEFAULT_BINDINGS: Lazy<BindingMap> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert((KeyCode::Up, KeyModifiers::NONE), Action::SelectUp);
    map.insert((KeyCode::Down, KeyModifiers::NONE), Action::SelectDown);
    map.insert((KeyCode::Enter, KeyModifiers::NONE), Action::SelectConfirm);
    map.insert((KeyCode::Esc, KeyModifiers::NONE), Action::SelectCancel);
    map.insert((KeyCode::Char('c'), KeyModifiers::CONTROL), Action::SelectCancel);
    map.insert((KeyCode::Up, KeyModifiers::SHIFT), Action::MoveItemUp);
    map.insert((KeyCode::Down, KeyModifiers::SHIFT), Action::MoveItemDown);
    map
});

/// Resolves key events to actions
#[derive(Debug, Clone)]
pub struct KeybindingResolver {
    /// Bindings loaded from the config file
    bindings: BindingMap,
    /// Built-in bindings
    default_bindings: BindingMap,
}

impl Default for KeybindingResolver {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl KeybindingResolver {
    /// Create a resolver with the defaults plus the given custom bindings
    pub fn new(custom: &[Keybinding]) -> Self {
        let mut resolver = Self {
            bindings: HashMap::new(),
            default_bindings: DEFAULT_BINDINGS.clone(),
        };
        resolver.load_bindings(custom);
        resolver
    }

    fn load_bindings(&mut self, custom: &[Keybinding]) {
        for binding in custom {
            let Some(action) = Action::from_str(&binding.action) else {
                tracing::warn!("Ignoring keybinding with unknown action {:?}", binding.action);
                continue;
            };
            let Some(code) = parse_key(&binding.key) else {
                tracing::warn!("Ignoring keybinding with unknown key {:?}", binding.key);
                continue;
            };
            let modifiers = parse_modifiers(&binding.modifiers);
            tracing::debug!(
                "Custom keybinding {} -> {:?}",
                format_keybinding(&code, &modifiers),
                action
            );
            self.bindings.insert((code, modifiers), action);
        }
    }

    /// Resolve a key event to an action
    pub fn resolve(&self, event: &KeyEvent) -> Action {
        let key = (event.code, event.modifiers);

        if let Some(action) = self.bindings.get(&key) {
            tracing::trace!("  -> Found in custom bindings: {:?}", action);
            return *action;
        }
        if let Some(action) = self.default_bindings.get(&key) {
            tracing::trace!("  -> Found in default bindings: {:?}", action);
            return *action;
        }

        if event.modifiers.is_empty() || event.modifiers == KeyModifiers::SHIFT {
            if let KeyCode::Char(c) = event.code {
                return Action::InsertChar(c);
            }
        }

        Action::None
    }

    /// Display label of the simplest key bound to `action`, for hint lines.
    ///
    /// Custom bindings win over defaults. Among several keys the one with the
    /// fewest modifiers is chosen, ties broken deterministically.
    pub fn key_label(&self, action: Action) -> Option<String> {
        for map in [&self.bindings, &self.default_bindings] {
            let mut matches: Vec<(KeyCode, KeyModifiers)> = map
                .iter()
                .filter(|(key, bound)| **bound == action && !self.is_shadowed(map, key))
                .map(|(key, _)| *key)
                .collect();

            matches.sort_by_key(|(code, modifiers)| {
                (
                    modifiers.bits().count_ones(),
                    modifiers.bits(),
                    key_code_sort_key(code),
                )
            });

            if let Some((code, modifiers)) = matches.first() {
                return Some(format_keybinding(code, modifiers));
            }
        }
        None
    }

    /// A default binding is shadowed when a custom binding reuses its key
    fn is_shadowed(&self, map: &BindingMap, key: &(KeyCode, KeyModifiers)) -> bool {
        !std::ptr::eq(map, &self.bindings) && self.bindings.contains_key(key)
    }
}

fn key_code_sort_key(code: &KeyCode) -> (u8, u32) {
    match code {
        KeyCode::Enter => (0, 0),
        KeyCode::Esc => (1, 0),
        KeyCode::Up => (2, 0),
        KeyCode::Down => (3, 0),
        KeyCode::Left => (4, 0),
        KeyCode::Right => (5, 0),
        KeyCode::Tab => (6, 0),
        KeyCode::Backspace => (7, 0),
        KeyCode::F(n) => (8, u32::from(*n)),
        KeyCode::Char(c) => (9, u32::from(*c)),
        _ => (10, 0),
    }
}

/// Parse a key name from the config file
pub fn parse_key(key: &str) -> Option<KeyCode> {
    let lower = key.to_lowercase();
    match lower.as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        "tab" => Some(KeyCode::Tab),
        "esc" | "escape" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),

        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" => Some(KeyCode::PageUp),
        "pagedown" => Some(KeyCode::PageDown),

        s if s.chars().count() == 1 => s.chars().next().map(KeyCode::Char),
        s if s.starts_with('f') && s.len() >= 2 => s[1..].parse::<u8>().ok().map(KeyCode::F),
        _ => None,
    }
}

/// Parse modifier names from the config file
pub fn parse_modifiers(modifiers: &[String]) -> KeyModifiers {
    let mut result = KeyModifiers::empty();
    for m in modifiers {
        match m.to_lowercase().as_str() {
            "ctrl" | "control" => result |= KeyModifiers::CONTROL,
            "shift" => result |= KeyModifiers::SHIFT,
            "alt" => result |= KeyModifiers::ALT,
            other => tracing::warn!("Unknown modifier {:?} in keybinding", other),
        }
    }
    result
}

/// Format a keybinding as a user-friendly string
pub fn format_keybinding(keycode: &KeyCode, modifiers: &KeyModifiers) -> String {
    let mut result = String::new();

    if modifiers.contains(KeyModifiers::CONTROL) {
        result.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        result.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        result.push_str("Shift+");
    }

    match keycode {
        KeyCode::Enter => result.push_str("Enter"),
        KeyCode::Backspace => result.push_str("Backspace"),
        KeyCode::Delete => result.push_str("Del"),
        KeyCode::Tab => result.push_str("Tab"),
        KeyCode::Esc => result.push_str("Esc"),
        KeyCode::Left => result.push('←'),
        KeyCode::Right => result.push('→'),
        KeyCode::Up => result.push('↑'),
        KeyCode::Down => result.push('↓'),
        KeyCode::Home => result.push_str("Home"),
        KeyCode::End => result.push_str("End"),
        KeyCode::PageUp => result.push_str("PgUp"),
        KeyCode::PageDown => result.push_str("PgDn"),
        KeyCode::F(n) => result.push_str(&format!("F{n}")),
        KeyCode::Char(' ') => result.push_str("Space"),
        KeyCode::Char(c) => result.push(c.to_ascii_uppercase()),
        _ => result.push('?'),
    }

    result
}

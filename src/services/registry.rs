//! Registration service for setting definitions
//!
//! Scopes register their definitions on a [`RegistryBuilder`] during startup.
//! [`RegistryBuilder::build`] freezes the result; only the frozen
//! [`SettingsRegistry`] can produce list items, so every registration is
//! visible before the first panel exists.
//!
//! Values cross the panel boundary as strings. [`encode_value`] and
//! [`decode_value`] convert between those strings and the JSON values kept
//! in the store.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::input::keybindings::KeybindingResolver;
use crate::services::store::SettingsStore;
use crate::view::ordered_select::{OrderedListOption, OrderedMultiSelect};
use crate::view::panel::Panel;
use crate::view::settings::{SettingItem, SubmenuDone};
use crate::view::theme::OrderedListTheme;

/// Joins scope and setting id into a list item id
pub const ID_SEPARATOR: char = '/';

/// How a setting is edited
#[derive(Debug, Clone, PartialEq)]
pub enum SettingControl {
    /// Free text; the default's JSON type decides how text is decoded
    Text,
    /// One of a fixed list of values, cycled in order
    Choice(Vec<String>),
    /// `"true"` / `"false"`
    Boolean,
    /// Ordered subset of options, stored comma-joined
    OrderedList(Vec<OrderedListOption>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingDefinition {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub default: Value,
    pub control: SettingControl,
}

impl SettingDefinition {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        default: Value,
        control: SettingControl,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            default,
            control,
        }
    }

    pub fn text(id: impl Into<String>, label: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(id, label, Value::String(default.into()), SettingControl::Text)
    }

    /// Free-text setting holding an integer
    pub fn number(id: impl Into<String>, label: impl Into<String>, default: i64) -> Self {
        Self::new(id, label, Value::from(default), SettingControl::Text)
    }

    pub fn boolean(id: impl Into<String>, label: impl Into<String>, default: bool) -> Self {
        Self::new(id, label, Value::Bool(default), SettingControl::Boolean)
    }

    pub fn choice<S: Into<String>>(
        id: impl Into<String>,
        label: impl Into<String>,
        values: impl IntoIterator<Item = S>,
        default: Value,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(id, label, default, SettingControl::Choice(values))
    }

    pub fn ordered_list(
        id: impl Into<String>,
        label: impl Into<String>,
        options: Vec<OrderedListOption>,
        default: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            label,
            Value::String(default.into()),
            SettingControl::OrderedList(options),
        )
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Render a stored value as the string shown in the list
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Turn a string from the list back into a value for `definition`.
pub fn decode_value(definition: &SettingDefinition, raw: &str) -> Result<Value, ValueError> {
    match &definition.control {
        SettingControl::Boolean => parse_bool(raw),
        SettingControl::OrderedList(_) => Ok(Value::String(raw.to_string())),
        SettingControl::Choice(values) => {
            if !values.iter().any(|value| value == raw) {
                return Err(ValueError::NotAChoice {
                    raw: raw.to_string(),
                    choices: values.clone(),
                });
            }
            decode_as(&definition.default, raw)
        }
        SettingControl::Text => decode_as(&definition.default, raw),
    }
}

/// Decode `raw` into the JSON type of `template`
fn decode_as(template: &Value, raw: &str) -> Result<Value, ValueError> {
    match template {
        Value::String(_) | Value::Null => Ok(Value::String(raw.to_string())),
        Value::Bool(_) => parse_bool(raw),
        Value::Number(_) => {
            let trimmed = raw.trim();
            if let Ok(n) = trimmed.parse::<i64>() {
                return Ok(Value::from(n));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| ValueError::InvalidNumber(raw.to_string()))
        }
        Value::Array(_) | Value::Object(_) => {
            serde_json::from_str(raw).map_err(|e| ValueError::InvalidJson {
                raw: raw.to_string(),
                message: e.to_string(),
            })
        }
    }
}

fn parse_bool(raw: &str) -> Result<Value, ValueError> {
    match raw {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => Err(ValueError::InvalidBoolean(raw.to_string())),
    }
}

/// A string from the list that does not decode for its setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    InvalidNumber(String),
    InvalidBoolean(String),
    NotAChoice { raw: String, choices: Vec<String> },
    InvalidJson { raw: String, message: String },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::InvalidNumber(raw) => write!(f, "{raw:?} is not a number"),
            ValueError::InvalidBoolean(raw) => write!(f, "{raw:?} is not true or false"),
            ValueError::NotAChoice { raw, choices } => {
                write!(f, "{raw:?} is not one of {}", choices.join(", "))
            }
            ValueError::InvalidJson { raw, message } => {
                write!(f, "{raw:?} is not valid JSON: {message}")
            }
        }
    }
}

impl std::error::Error for ValueError {}

/// Rejected registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidScope(String),
    DuplicateScope(String),
    InvalidId { scope: String, id: String },
    DuplicateSetting { scope: String, id: String },
    EmptyChoices { scope: String, id: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::InvalidScope(scope) => write!(f, "invalid scope name {scope:?}"),
            RegistryError::DuplicateScope(scope) => {
                write!(f, "scope {scope:?} is already registered")
            }
            RegistryError::InvalidId { scope, id } => {
                write!(f, "invalid setting id {id:?} in scope {scope:?}")
            }
            RegistryError::DuplicateSetting { scope, id } => {
                write!(f, "setting {id:?} is registered twice in scope {scope:?}")
            }
            RegistryError::EmptyChoices { scope, id } => {
                write!(f, "setting {id:?} in scope {scope:?} has no choices")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Settings registered under one scope name
#[derive(Debug, Clone)]
pub struct ScopeSettings {
    pub name: String,
    pub settings: Vec<SettingDefinition>,
}

/// Collects registrations during startup
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    scopes: Vec<ScopeSettings>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the definitions of one scope.
    ///
    /// Nothing is registered when any definition is rejected.
    pub fn register(
        &mut self,
        scope: impl Into<String>,
        settings: Vec<SettingDefinition>,
    ) -> Result<(), RegistryError> {
        let scope = scope.into();
        if scope.is_empty() || scope.contains(ID_SEPARATOR) {
            return Err(RegistryError::InvalidScope(scope));
        }
        if self.scopes.iter().any(|existing| existing.name == scope) {
            return Err(RegistryError::DuplicateScope(scope));
        }

        let mut seen = HashSet::new();
        for definition in &settings {
            let id = &definition.id;
            if id.is_empty() || id.contains(ID_SEPARATOR) {
                return Err(RegistryError::InvalidId {
                    scope,
                    id: id.clone(),
                });
            }
            if !seen.insert(id.as_str()) {
                return Err(RegistryError::DuplicateSetting {
                    scope,
                    id: id.clone(),
                });
            }
            if matches!(&definition.control, SettingControl::Choice(values) if values.is_empty()) {
                return Err(RegistryError::EmptyChoices {
                    scope,
                    id: id.clone(),
                });
            }
        }

        tracing::debug!("Registered {} settings for scope {}", settings.len(), scope);
        self.scopes.push(ScopeSettings {
            name: scope,
            settings,
        });
        Ok(())
    }

    /// End the registration phase
    pub fn build(self) -> SettingsRegistry {
        SettingsRegistry {
            scopes: self.scopes,
        }
    }
}

/// Immutable set of registered settings, in registration order
#[derive(Debug, Clone)]
pub struct SettingsRegistry {
    scopes: Vec<ScopeSettings>,
}

impl SettingsRegistry {
    pub fn scopes(&self) -> &[ScopeSettings] {
        &self.scopes
    }

    /// List item id of a setting
    pub fn item_id(scope: &str, id: &str) -> String {
        format!("{scope}{ID_SEPARATOR}{id}")
    }

    /// Resolve a list item id back to its scope and definition
    pub fn find(&self, item_id: &str) -> Option<(&str, &SettingDefinition)> {
        let (scope, id) = item_id.split_once(ID_SEPARATOR)?;
        let entry = self.scopes.iter().find(|s| s.name == scope)?;
        let definition = entry.settings.iter().find(|d| d.id == id)?;
        Some((entry.name.as_str(), definition))
    }

    /// Build list rows: a header per scope followed by its settings, with
    /// current values read from `store`. Ordered-list submenus show at most
    /// `max_visible` options at once.
    pub fn build_items<S: SettingsStore + ?Sized>(
        &self,
        store: &S,
        keys: &Rc<KeybindingResolver>,
        theme: &OrderedListTheme,
        max_visible: usize,
    ) -> Vec<SettingItem> {
        let mut items = Vec::new();
        for scope in &self.scopes {
            items.push(SettingItem::header(&scope.name));

            for definition in &scope.settings {
                let id = Self::item_id(&scope.name, &definition.id);
                let current = encode_value(&store.get(&scope.name, &definition.id, &definition.default));

                let item = match &definition.control {
                    SettingControl::Text => SettingItem::free_text(id, &definition.label, current),
                    SettingControl::Choice(values) => {
                        SettingItem::cycle(id, &definition.label, current, values.clone())
                    }
                    SettingControl::Boolean => SettingItem::cycle(
                        id,
                        &definition.label,
                        current,
                        vec!["true".to_string(), "false".to_string()],
                    ),
                    SettingControl::OrderedList(options) => {
                        let options = options.clone();
                        let keys = Rc::clone(keys);
                        let theme = theme.clone();
                        SettingItem::submenu(
                            id,
                            &definition.label,
                            current,
                            Box::new(move |current: &str, done: SubmenuDone| -> Box<dyn Panel> {
                                Box::new(
                                    OrderedMultiSelect::new(options.clone(), current, done)
                                        .with_max_visible(max_visible)
                                        .with_theme(theme.clone())
                                        .with_keybindings(Rc::clone(&keys)),
                                )
                            }),
                        )
                    }
                };

                items.push(match &definition.description {
                    Some(description) => item.with_description(description),
                    None => item,
                });
            }
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MemorySettingsStore;
    use crate::view::settings::SettingKind;
    use serde_json::json;

    fn editor_settings() -> Vec<SettingDefinition> {
        vec![
            SettingDefinition::choice("timeout", "Timeout", ["10", "30", "60"], json!(30))
                .with_description("Seconds to wait"),
            SettingDefinition::boolean("debug", "Debug Mode", false),
            SettingDefinition::text("greeting", "Greeting", "hello"),
            SettingDefinition::number("tab_width", "Tab Width", 4),
        ]
    }

    #[test]
    fn test_encode_value() {
        assert_eq!(encode_value(&json!("dark")), "dark");
        assert_eq!(encode_value(&json!(true)), "true");
        assert_eq!(encode_value(&json!(30)), "30");
        assert_eq!(encode_value(&json!(1.5)), "1.5");
        assert_eq!(encode_value(&Value::Null), "");
        assert_eq!(encode_value(&json!(["a", 1])), r#"["a",1]"#);
    }

    #[test]
    fn test_decode_by_default_type() {
        let defs = editor_settings();
        assert_eq!(decode_value(&defs[0], "60"), Ok(json!(60)));
        assert_eq!(decode_value(&defs[1], "true"), Ok(json!(true)));
        assert_eq!(decode_value(&defs[2], " spaced "), Ok(json!(" spaced ")));
        assert_eq!(decode_value(&defs[3], "8"), Ok(json!(8)));
        assert_eq!(decode_value(&defs[3], "2.5"), Ok(json!(2.5)));
    }

    #[test]
    fn test_decode_rejects_bad_values() {
        let defs = editor_settings();
        assert!(matches!(
            decode_value(&defs[0], "45"),
            Err(ValueError::NotAChoice { .. })
        ));
        assert_eq!(
            decode_value(&defs[1], "yes"),
            Err(ValueError::InvalidBoolean("yes".to_string()))
        );
        assert_eq!(
            decode_value(&defs[3], "wide"),
            Err(ValueError::InvalidNumber("wide".to_string()))
        );
    }

    #[test]
    fn test_encode_decode_round_trip() {
        for def in editor_settings() {
            let encoded = encode_value(&def.default);
            assert_eq!(decode_value(&def, &encoded), Ok(def.default.clone()));
        }
    }

    #[test]
    fn test_register_rejects_invalid_definitions() {
        let mut builder = RegistryBuilder::new();
        builder.register("editor", editor_settings()).unwrap();

        assert_eq!(
            builder.register("editor", Vec::new()),
            Err(RegistryError::DuplicateScope("editor".to_string()))
        );
        assert!(matches!(
            builder.register("a/b", Vec::new()),
            Err(RegistryError::InvalidScope(_))
        ));
        assert!(matches!(
            builder.register(
                "dup",
                vec![
                    SettingDefinition::text("x", "X", ""),
                    SettingDefinition::text("x", "X again", ""),
                ]
            ),
            Err(RegistryError::DuplicateSetting { .. })
        ));
        assert!(matches!(
            builder.register(
                "empty",
                vec![SettingDefinition::choice("c", "C", Vec::<String>::new(), json!(""))]
            ),
            Err(RegistryError::EmptyChoices { .. })
        ));
        assert!(matches!(
            builder.register("slash", vec![SettingDefinition::text("a/b", "AB", "")]),
            Err(RegistryError::InvalidId { .. })
        ));

        // Rejected scopes leave no trace
        assert_eq!(builder.build().scopes().len(), 1);
    }

    #[test]
    fn test_build_items_reads_store() {
        let mut builder = RegistryBuilder::new();
        builder.register("editor", editor_settings()).unwrap();
        builder
            .register(
                "providers",
                vec![SettingDefinition::ordered_list(
                    "order",
                    "Provider Order",
                    vec![OrderedListOption::new("a", "Alpha")],
                    "a",
                )],
            )
            .unwrap();
        let registry = builder.build();

        let mut store = MemorySettingsStore::new();
        store.set("editor", "timeout", json!(60));

        let items = registry.build_items(
            &store,
            &Rc::new(KeybindingResolver::default()),
            &OrderedListTheme::default(),
            10,
        );
        let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "__header__:editor",
                "editor/timeout",
                "editor/debug",
                "editor/greeting",
                "editor/tab_width",
                "__header__:providers",
                "providers/order",
            ]
        );

        assert_eq!(items[1].current_value, "60");
        assert_eq!(items[1].description.as_deref(), Some("Seconds to wait"));
        assert_eq!(items[2].current_value, "false");
        assert!(matches!(items[2].kind, SettingKind::Cycle(ref v) if v == &["true", "false"]));
        assert!(matches!(items[3].kind, SettingKind::FreeText));
        assert!(matches!(items[6].kind, SettingKind::Submenu(_)));
    }

    #[test]
    fn test_find_resolves_item_ids() {
        let mut builder = RegistryBuilder::new();
        builder.register("editor", editor_settings()).unwrap();
        let registry = builder.build();

        let (scope, def) = registry.find("editor/debug").unwrap();
        assert_eq!(scope, "editor");
        assert_eq!(def.label, "Debug Mode");
        assert!(registry.find("editor/missing").is_none());
        assert!(registry.find("__header__:editor").is_none());
    }
}

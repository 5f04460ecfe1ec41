use ratatui::style::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    #[serde(default)]
    pub list: ListConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    /// Extra keybindings layered over the built-in ones
    #[serde(default)]
    pub keybindings: Vec<Keybinding>,

    /// Locale for hint texts (e.g. "en"); falls back to English
    #[serde(default)]
    pub locale: Option<String>,
}

/// Settings list behavior
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListConfig {
    /// Maximum number of item rows shown at once
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,

    /// Whether typing in the list filters it with fuzzy search
    #[serde(default = "default_true")]
    pub enable_search: bool,

    /// Cap on the label column width
    #[serde(default = "default_max_label_width")]
    pub max_label_width: usize,
}

fn default_max_visible() -> usize {
    10
}

fn default_max_label_width() -> usize {
    30
}

fn default_true() -> bool {
    true
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
            enable_search: true,
            max_label_width: default_max_label_width(),
        }
    }
}

/// Color names for the panels.
///
/// Accepts anything `ratatui::style::Color` parses: named colors
/// ("cyan", "darkgray"), indexed colors ("42") and hex ("#ff8800").
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ThemeConfig {
    #[serde(default = "default_accent")]
    pub accent: String,

    #[serde(default = "default_value")]
    pub value: String,

    #[serde(default = "default_accent")]
    pub value_selected: String,

    #[serde(default = "default_dim")]
    pub description: String,

    #[serde(default = "default_dim")]
    pub hint: String,

    #[serde(default = "default_header")]
    pub header: String,

    #[serde(default = "default_checkmark")]
    pub checkmark: String,
}

fn default_accent() -> String {
    "cyan".to_string()
}

fn default_value() -> String {
    "gray".to_string()
}

fn default_dim() -> String {
    "darkgray".to_string()
}

fn default_header() -> String {
    "yellow".to_string()
}

fn default_checkmark() -> String {
    "green".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: default_accent(),
            value: default_value(),
            value_selected: default_accent(),
            description: default_dim(),
            hint: default_dim(),
            header: default_header(),
            checkmark: default_checkmark(),
        }
    }
}

impl ThemeConfig {
    /// Parse one of the color fields, falling back to `Color::Reset`
    pub fn color(name: &str) -> Color {
        Color::from_str(name).unwrap_or_else(|_| {
            tracing::warn!("Unknown color {:?}, using terminal default", name);
            Color::Reset
        })
    }

    fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("accent", &self.accent),
            ("value", &self.value),
            ("value_selected", &self.value_selected),
            ("description", &self.description),
            ("hint", &self.hint),
            ("header", &self.header),
            ("checkmark", &self.checkmark),
        ]
    }
}

/// Keybinding definition
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Keybinding {
    /// Key name (e.g., "k", "Enter", "F1")
    pub key: String,

    /// Modifiers (e.g., ["ctrl"], ["ctrl", "shift"])
    #[serde(default)]
    pub modifiers: Vec<String>,

    /// Action to perform (e.g., "select_up", "move_item_down")
    pub action: String,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// JSON Schema describing the config file
    pub fn json_schema() -> Result<String, ConfigError> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.list.max_visible == 0 {
            return Err(ConfigError::ValidationError(
                "list.max_visible must be greater than 0".to_string(),
            ));
        }

        if self.list.max_label_width == 0 {
            return Err(ConfigError::ValidationError(
                "list.max_label_width must be greater than 0".to_string(),
            ));
        }

        for (field, name) in self.theme.fields() {
            if Color::from_str(name).is_err() {
                return Err(ConfigError::ValidationError(format!(
                    "theme.{field}: unknown color {name:?}"
                )));
            }
        }

        for binding in &self.keybindings {
            if binding.key.is_empty() {
                return Err(ConfigError::ValidationError(
                    "keybinding key cannot be empty".to_string(),
                ));
            }
            if binding.action.is_empty() {
                return Err(ConfigError::ValidationError(
                    "keybinding action cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

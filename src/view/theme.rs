//! Styles for the settings panels
//!
//! Built from [`ThemeConfig`] color names; defaults match the config
//! defaults so an empty config file and no config file look the same.

use crate::config::ThemeConfig;
use crate::view::controls::TextInputStyle;
use ratatui::style::{Modifier, Style};

/// Styles for the settings list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsListTheme {
    /// Marker drawn before the selected row
    pub cursor: String,
    pub label: Style,
    pub label_selected: Style,
    pub value: Style,
    pub value_selected: Style,
    pub description: Style,
    pub hint: Style,
    pub header: Style,
    pub search: TextInputStyle,
}

impl Default for SettingsListTheme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl SettingsListTheme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let accent = ThemeConfig::color(&config.accent);
        let dim = Style::default().fg(ThemeConfig::color(&config.hint));

        Self {
            cursor: "→ ".to_string(),
            label: Style::default(),
            label_selected: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            value: Style::default().fg(ThemeConfig::color(&config.value)),
            value_selected: Style::default().fg(ThemeConfig::color(&config.value_selected)),
            description: Style::default().fg(ThemeConfig::color(&config.description)),
            hint: dim,
            header: Style::default()
                .fg(ThemeConfig::color(&config.header))
                .add_modifier(Modifier::BOLD),
            search: TextInputStyle {
                text: Style::default(),
                placeholder: dim,
                cursor: Style::default().add_modifier(Modifier::REVERSED),
            },
        }
    }
}

/// Styles for the ordered multi-select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedListTheme {
    pub cursor: String,
    pub label: Style,
    pub label_selected: Style,
    pub checkmark: Style,
    pub hint: Style,
}

impl Default for OrderedListTheme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl OrderedListTheme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            cursor: "→ ".to_string(),
            label: Style::default(),
            label_selected: Style::default()
                .fg(ThemeConfig::color(&config.accent))
                .add_modifier(Modifier::BOLD),
            checkmark: Style::default().fg(ThemeConfig::color(&config.checkmark)),
            hint: Style::default().fg(ThemeConfig::color(&config.hint)),
        }
    }
}

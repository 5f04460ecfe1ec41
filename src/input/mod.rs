pub mod fuzzy;
pub mod keybindings;

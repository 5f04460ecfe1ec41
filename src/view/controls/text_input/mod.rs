//! Single-line text input control
//!
//! Used twice by the settings list: as the search field above the items and
//! as the inline editor of a free-text setting. The state is plain data; key
//! handling lives in [`input`] and rendering to a styled line in [`render`].

mod input;
mod render;

pub use input::TextInputEvent;
pub use render::TextInputStyle;

use crate::primitives::grapheme::{next_grapheme_boundary, prev_grapheme_boundary};

/// State of a single-line text input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInputState {
    /// Current text
    pub value: String,
    /// Cursor position as a byte offset into `value`, always on a char boundary
    pub cursor: usize,
    /// Shown dimmed while the value is empty
    pub placeholder: String,
}

impl TextInputState {
    /// Create an empty input
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial value, cursor at the end
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Set the placeholder text
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the text and move the cursor to the end
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a string at the cursor
    pub fn insert_str(&mut self, s: &str) {
        self.value.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Delete the grapheme before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = prev_grapheme_boundary(&self.value, self.cursor);
            self.value.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    /// Delete the grapheme at the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            let next = next_grapheme_boundary(&self.value, self.cursor);
            self.value.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = prev_grapheme_boundary(&self.value, self.cursor);
    }

    pub fn move_right(&mut self) {
        self.cursor = next_grapheme_boundary(&self.value, self.cursor);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Clear the text
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

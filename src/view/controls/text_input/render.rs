//! Text input rendering

use crate::primitives::display_width::{str_width, truncate_to_width};
use crate::primitives::grapheme::grapheme_at;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_segmentation::UnicodeSegmentation;

use super::TextInputState;

/// Styles used to draw a text input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextInputStyle {
    pub text: Style,
    pub placeholder: Style,
    pub cursor: Style,
}

impl Default for TextInputStyle {
    fn default() -> Self {
        Self {
            text: Style::default(),
            placeholder: Style::default().add_modifier(Modifier::DIM),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

impl TextInputState {
    /// Render the input into a line at most `width` columns wide.
    ///
    /// The text scrolls horizontally so the whole cursor cell stays visible,
    /// including a double-width character under the cursor. The cursor
    /// occupies one extra column when it sits past the last character.
    pub fn render_line(&self, width: usize, style: &TextInputStyle) -> Line<'static> {
        if width == 0 {
            return Line::default();
        }

        if self.value.is_empty() {
            let mut spans = vec![Span::styled(" ", style.cursor)];
            if !self.placeholder.is_empty() && width > 1 {
                let placeholder = truncate_to_width(&self.placeholder, width - 1, "");
                spans.push(Span::styled(placeholder, style.placeholder));
            }
            return Line::from(spans);
        }

        let cursor = self.cursor.min(self.value.len());
        let cursor_col = str_width(&self.value[..cursor]);
        let cursor_cell =
            grapheme_at(&self.value, cursor).map_or(1, |grapheme| str_width(grapheme).max(1));
        let scroll = (cursor_col + cursor_cell).saturating_sub(width);

        let mut before = String::new();
        let mut at_cursor: Option<String> = None;
        let mut after = String::new();
        let mut col = 0;

        for (idx, grapheme) in self.value.grapheme_indices(true) {
            let w = str_width(grapheme);
            let start = col;
            col += w;
            if start < scroll {
                continue;
            }
            if col - scroll > width {
                break;
            }
            if idx < cursor {
                before.push_str(grapheme);
            } else if idx == cursor {
                at_cursor = Some(grapheme.to_string());
            } else {
                after.push_str(grapheme);
            }
        }

        let mut spans = Vec::with_capacity(3);
        if !before.is_empty() {
            spans.push(Span::styled(before, style.text));
        }
        match at_cursor {
            Some(grapheme) => spans.push(Span::styled(grapheme, style.cursor)),
            None if cursor == self.value.len() => spans.push(Span::styled(" ", style.cursor)),
            None => {}
        }
        if !after.is_empty() {
            spans.push(Span::styled(after, style.text));
        }
        Line::from(spans)
    }
}

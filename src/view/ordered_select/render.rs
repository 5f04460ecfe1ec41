use super::OrderedMultiSelect;
use crate::input::keybindings::Action;
use crate::primitives::display_width::str_width;
use crate::view::panel::{clip_line, window_start};
use ratatui::text::{Line, Span};
use rust_i18n::t;

impl OrderedMultiSelect {
    pub(super) fn render_lines(&self, width: usize) -> Vec<Line<'static>> {
        if self.options.is_empty() {
            return Vec::new();
        }

        let entries = self.displayed();
        let len = entries.len();
        let cursor = self.cursor_index.min(len - 1);
        let visible = self.max_visible.min(len);
        let start = window_start(cursor, len, visible);
        let end = start + visible;

        // "✓" plus room for the largest position number
        let marker_width = 1 + self.options.len().to_string().len();
        let cursor_width = str_width(&self.theme.cursor);

        let mut lines = Vec::with_capacity(visible + 3);
        for (display_index, entry) in entries.iter().enumerate().take(end).skip(start) {
            let option = &self.options[entry.option_index];
            let is_cursor = display_index == cursor;

            let prefix = if is_cursor {
                self.theme.cursor.clone()
            } else {
                " ".repeat(cursor_width)
            };
            let marker = match entry.position {
                Some(position) => {
                    let text = format!("✓{position}");
                    let pad = marker_width.saturating_sub(str_width(&text));
                    Span::styled(format!("{text}{} ", " ".repeat(pad)), self.theme.checkmark)
                }
                None => Span::raw(" ".repeat(marker_width + 1)),
            };
            let label_style = if is_cursor {
                self.theme.label_selected
            } else {
                self.theme.label
            };

            lines.push(clip_line(
                vec![
                    Span::raw(prefix),
                    marker,
                    Span::styled(option.label.clone(), label_style),
                ],
                width,
            ));
        }

        if start > 0 || end < len {
            lines.push(clip_line(
                vec![Span::styled(
                    format!("  ({}/{})", cursor + 1, len),
                    self.theme.hint,
                )],
                width,
            ));
        }

        lines.push(Line::default());
        lines.push(clip_line(
            vec![Span::styled(format!("  {}", self.hint_text()), self.theme.hint)],
            width,
        ));
        lines
    }

    fn hint_text(&self) -> String {
        let label = |action, fallback: &str| {
            self.keys
                .key_label(action)
                .unwrap_or_else(|| fallback.to_string())
        };
        let reorder = format!(
            "{}/{}",
            label(Action::MoveItemUp, "Shift+↑"),
            label(Action::MoveItemDown, "Shift+↓")
        );

        t!(
            "ordered.hint",
            reorder = reorder,
            confirm = label(Action::SelectConfirm, "Enter"),
            cancel = label(Action::SelectCancel, "Esc")
        )
        .to_string()
    }
}

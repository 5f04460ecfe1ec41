//! Settings list renderer
//!
//! Produces the list as styled lines: search field, a window of rows around
//! the selection, a position indicator, the selected row's description and a
//! hint line. Reads state only.

use super::items::SettingKind;
use super::list::{Mode, SettingsList};
use crate::input::keybindings::Action;
use crate::primitives::display_width::{pad_to_width, str_width, truncate_to_width};
use crate::primitives::line_wrapping::wrap_text;
use crate::view::panel::{clip_line, window_start};
use ratatui::text::{Line, Span};
use rust_i18n::t;

const INDENT: &str = "  ";
const SEPARATOR: &str = "  ";

impl SettingsList {
    pub(super) fn render_list(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let editing_index = match &self.mode {
            Mode::Editing { item_index, .. } => Some(*item_index),
            _ => None,
        };

        if let (Some(search), None) = (&self.search, editing_index) {
            let mut spans = vec![Span::raw(INDENT)];
            spans.extend(
                search
                    .render_line(width.saturating_sub(INDENT.len()), &self.theme.search)
                    .spans,
            );
            lines.push(clip_line(spans, width));
            lines.push(Line::default());
        }

        if self.items.is_empty() {
            lines.push(self.hint_text(&format!("{INDENT}{}", t!("settings.empty")), width));
            if self.search.is_some() {
                self.push_hint_line(&mut lines, width);
            }
            return lines;
        }

        let len = self.filtered.len();
        if len == 0 {
            lines.push(self.hint_text(&format!("{INDENT}{}", t!("settings.no_matches")), width));
            self.push_hint_line(&mut lines, width);
            return lines;
        }

        let selected = self.selected_index.min(len - 1);
        let visible = self.options.max_visible.max(1).min(len);
        let start = window_start(selected, len, visible);
        let end = start + visible;
        let label_width = self.label_width();

        for display_index in start..end {
            let item_index = self.filtered[display_index];
            let is_selected = display_index == selected;
            let editor = editing_index.filter(|&index| index == item_index);
            lines.push(self.render_row(
                item_index,
                is_selected,
                editor.is_some(),
                label_width,
                width,
            ));
        }

        if start > 0 || end < len {
            let indicator = format!("{INDENT}({}/{})", selected + 1, len);
            lines.push(self.hint_text(&indicator, width));
        }

        if editing_index.is_none() {
            let item = &self.items[self.filtered[selected]];
            if let Some(description) = item.description.as_deref() {
                lines.push(Line::default());
                for wrapped in wrap_text(description, width.saturating_sub(2 * INDENT.len())) {
                    lines.push(clip_line(
                        vec![Span::styled(
                            format!("{INDENT}{wrapped}"),
                            self.theme.description,
                        )],
                        width,
                    ));
                }
            }
        }

        self.push_hint_line(&mut lines, width);
        lines
    }

    fn render_row(
        &self,
        item_index: usize,
        is_selected: bool,
        is_editing: bool,
        label_width: usize,
        width: usize,
    ) -> Line<'static> {
        let item = &self.items[item_index];
        let cursor_width = str_width(&self.theme.cursor);
        let prefix = if is_selected {
            self.theme.cursor.clone()
        } else {
            " ".repeat(cursor_width)
        };

        if matches!(item.kind, SettingKind::Header) {
            return clip_line(
                vec![
                    Span::raw(prefix),
                    Span::styled(item.label.clone(), self.theme.header),
                ],
                width,
            );
        }

        let label_style = if is_selected {
            self.theme.label_selected
        } else {
            self.theme.label
        };
        let mut spans = vec![
            Span::raw(prefix),
            Span::styled(pad_to_width(&item.label, label_width), label_style),
            Span::raw(SEPARATOR),
        ];

        let value_width = width.saturating_sub(cursor_width + label_width + SEPARATOR.len());
        if is_editing {
            if let Mode::Editing { input, .. } = &self.mode {
                spans.extend(input.render_line(value_width, &self.theme.search).spans);
            }
        } else {
            let value_style = if is_selected {
                self.theme.value_selected
            } else {
                self.theme.value
            };
            spans.push(Span::styled(
                truncate_to_width(&item.current_value, value_width, "..."),
                value_style,
            ));
        }

        clip_line(spans, width)
    }

    fn hint_text(&self, text: &str, width: usize) -> Line<'static> {
        clip_line(vec![Span::styled(text.to_string(), self.theme.hint)], width)
    }

    fn push_hint_line(&self, lines: &mut Vec<Line<'static>>, width: usize) {
        let confirm = self
            .keys
            .key_label(Action::SelectConfirm)
            .unwrap_or_else(|| "Enter".to_string());
        let cancel = self
            .keys
            .key_label(Action::SelectCancel)
            .unwrap_or_else(|| "Esc".to_string());

        let text = if matches!(self.mode, Mode::Editing { .. }) {
            t!("settings.hint_editing", confirm = confirm, cancel = cancel)
        } else if self.search.is_some() {
            t!("settings.hint_search", confirm = confirm, cancel = cancel)
        } else {
            t!("settings.hint", confirm = confirm, cancel = cancel)
        };

        lines.push(Line::default());
        lines.push(self.hint_text(&format!("{INDENT}{text}"), width));
    }
}

//! The interactive panel contract shared by every widget
//!
//! A panel renders itself into styled lines for a given width and reacts to
//! key events. The settings list hosts a child panel as a submenu and
//! forwards both calls to it while it is open.

use crate::primitives::display_width::{str_width, truncate_to_width};
use crossterm::event::KeyEvent;
use ratatui::text::{Line, Span};

pub trait Panel {
    /// Render into lines no wider than `width` columns.
    fn render(&self, width: usize) -> Vec<Line<'static>>;

    /// Process one key event to completion.
    fn handle_key(&mut self, key: KeyEvent);

    /// Drop cached layout state. Called when the terminal is resized or the
    /// theme changes.
    fn invalidate(&mut self) {}
}

/// Flatten rendered lines to their plain text, one `String` per line.
pub fn plain_text(lines: &[Line<'_>]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
        .collect()
}

/// First row of a window of `visible` rows out of `len`, centered on
/// `selected` and clamped to the ends.
pub fn window_start(selected: usize, len: usize, visible: usize) -> usize {
    if len <= visible {
        return 0;
    }
    selected.saturating_sub(visible / 2).min(len - visible)
}

/// Assemble spans into a line, cutting it at `width` columns.
///
/// Spans past the limit are dropped; the span crossing it is truncated with
/// an ellipsis when one fits.
pub fn clip_line(spans: Vec<Span<'static>>, width: usize) -> Line<'static> {
    let total: usize = spans.iter().map(|span| str_width(&span.content)).sum();
    if total <= width {
        return Line::from(spans);
    }

    let mut out = Vec::with_capacity(spans.len());
    let mut used = 0;
    for span in spans {
        let span_width = str_width(&span.content);
        if used + span_width < width {
            used += span_width;
            out.push(span);
            continue;
        }
        let text = truncate_to_width(&span.content, width - used, "...");
        if !text.is_empty() {
            out.push(Span::styled(text, span.style));
        }
        break;
    }
    Line::from(out)
}

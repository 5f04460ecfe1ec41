//! Word wrapping for help text
//!
//! Descriptions shown under the selected setting are wrapped on word
//! boundaries. Words that are wider than the available width are broken
//! by display width so no produced line ever exceeds the limit (except for
//! a single character that is wider than the limit on its own).

use crate::primitives::display_width::{char_width, str_width};

/// Break `text` into consecutive chunks of at most `width` columns.
///
/// Always includes at least one character per chunk, so a width of zero or a
/// character wider than `width` cannot loop forever.
pub fn break_by_width(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let start = pos;
        let mut chunk_width = 0;

        while pos < chars.len() {
            let w = char_width(chars[pos]);
            if chunk_width + w > width && pos > start {
                break;
            }
            chunk_width += w;
            pos += 1;
        }

        chunks.push(chars[start..pos].iter().collect());
    }

    if chunks.is_empty() {
        chunks.push(String::new());
    }
    chunks
}

/// Wrap `text` to `width` columns on whitespace boundaries.
///
/// Explicit newlines start a new line; runs of whitespace collapse to a
/// single space. The result always contains at least one (possibly empty)
/// line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;
        let mut produced = false;

        for word in paragraph.split_whitespace() {
            let word_width = str_width(word);

            if word_width > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    produced = true;
                }
                let mut chunks = break_by_width(word, width);
                let last = chunks.pop().unwrap_or_default();
                for chunk in chunks {
                    lines.push(chunk);
                    produced = true;
                }
                current_width = str_width(&last);
                current = last;
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + 1 + word_width <= width {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                produced = true;
                current.push_str(word);
                current_width = word_width;
            }
        }

        if !current.is_empty() || !produced {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

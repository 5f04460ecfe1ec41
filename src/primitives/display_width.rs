//! Display width calculation for Unicode text
//!
//! Every layout decision in the panels (label alignment, value truncation,
//! the inline editor window) is made in terminal columns, not bytes or chars.
//! CJK and emoji take two columns, control and zero-width characters none.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Calculate the display width of a single character.
///
/// Returns 0 for control characters and zero-width characters,
/// 2 for CJK/fullwidth characters and emoji,
/// 1 for most other characters.
#[inline]
pub fn char_width(c: char) -> usize {
    // unicode_width returns None for control characters
    c.width().unwrap_or(0)
}

/// Calculate the display width of a string.
#[inline]
pub fn str_width(s: &str) -> usize {
    s.width()
}

/// Extension trait for convenient width calculation on string types.
pub trait DisplayWidth {
    /// Returns the display width (number of terminal columns) of this string.
    fn display_width(&self) -> usize;
}

impl DisplayWidth for str {
    #[inline]
    fn display_width(&self) -> usize {
        str_width(self)
    }
}

impl DisplayWidth for String {
    #[inline]
    fn display_width(&self) -> usize {
        str_width(self)
    }
}

/// Truncate `s` so that it occupies at most `max_width` columns.
///
/// When truncation happens, `ellipsis` is appended if it fits in the budget;
/// otherwise the text is cut hard. Strings that already fit are returned
/// unchanged.
pub fn truncate_to_width(s: &str, max_width: usize, ellipsis: &str) -> String {
    if str_width(s) <= max_width {
        return s.to_string();
    }

    let ellipsis_width = str_width(ellipsis);
    let (budget, suffix) = if ellipsis_width <= max_width {
        (max_width - ellipsis_width, ellipsis)
    } else {
        (max_width, "")
    };

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = char_width(ch);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(suffix);
    out
}

/// Pad (or truncate) `s` to exactly `width` columns.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width, "");
    // A wide char that didn't fit leaves a one-column hole; fill it too.
    let pad = width.saturating_sub(str_width(&out));
    out.push_str(&" ".repeat(pad));
    out
}

//! Grapheme cluster navigation for the single-line editor
//!
//! The cursor of a text input moves by user-perceived characters, so an
//! accented letter built from a combining mark or an emoji ZWJ sequence is
//! stepped over in one keypress.

use unicode_segmentation::UnicodeSegmentation;

/// Byte offset where the grapheme cluster before `pos` starts.
pub fn prev_grapheme_boundary(s: &str, pos: usize) -> usize {
    if pos == 0 || s.is_empty() {
        return 0;
    }

    let pos = pos.min(s.len());
    let mut last_boundary = 0;
    for (idx, _) in s.grapheme_indices(true) {
        if idx >= pos {
            break;
        }
        last_boundary = idx;
    }
    last_boundary
}

/// Byte offset just past the grapheme cluster that starts at or contains `pos`.
pub fn next_grapheme_boundary(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }

    s.grapheme_indices(true)
        .map(|(idx, grapheme)| idx + grapheme.len())
        .find(|&end| end > pos)
        .unwrap_or(s.len())
}

/// The grapheme cluster containing byte `pos`, if any.
pub fn grapheme_at(s: &str, pos: usize) -> Option<&str> {
    s.grapheme_indices(true)
        .find(|(idx, grapheme)| *idx <= pos && pos < idx + grapheme.len())
        .map(|(_, grapheme)| grapheme)
}

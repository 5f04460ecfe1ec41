pub mod display_width;
pub mod grapheme;
pub mod line_wrapping;

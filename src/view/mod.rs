//! View layer
//!
//! Panels, the controls they are built from and their styles.

pub mod controls;
pub mod ordered_select;
pub mod panel;
pub mod settings;
pub mod theme;

//! Settings list panel
//!
//! Browse settings, cycle through fixed choices, edit free text inline,
//! filter by fuzzy search and open nested panels for complex values.

mod items;
mod list;
mod render;

pub use items::{SettingItem, SettingKind, SubmenuDone, SubmenuFactory, HEADER_ID_PREFIX};
pub use list::{CancelCallback, ChangeCallback, SettingsList, SettingsListOptions};

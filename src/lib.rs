// Settings panels library - exposes all core modules for embedding and testing

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod input;
pub mod primitives;
pub mod services;
pub mod view;

// Game logic lives in the library so the binary, the integration tests and
// the criterion benches share one module tree.

rust_i18n::i18n!("locales", fallback = "uk");

pub mod app;
pub mod catalog;
pub mod config;
pub mod event;
pub mod game;
pub mod images;
pub mod route;
pub mod selection;
pub mod toast;
pub mod ui;
pub mod words;

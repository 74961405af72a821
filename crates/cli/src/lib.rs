//! Operator-facing surface: configuration, input parsing, menu loop and
//! console rendering around the inventory core.

pub mod config;
pub mod input;
pub mod menu;
pub mod render;

pub use config::AppConfig;
pub use menu::Session;

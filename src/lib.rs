pub mod app;
pub mod cli;
pub mod clipboard;
pub mod collection;
pub mod config;
pub mod events;
pub mod record;
pub mod theme;
pub mod ui;

pub use app::App;

// Terminal UI implementation using ratatui
// The portfolio page, one section per tab

pub mod app;
pub mod runner;
pub mod ui;

pub use app::{App, InputMode, LinkKind, Section};
pub use runner::run_tui;

// Terminal UI implementation using ratatui
// The pretty face of the start page

pub mod app;
pub mod editor;
pub mod runner;
pub mod ui;

pub use app::{App, ConfirmAction, InputMode, Pane};
pub use editor::{NoteEditor, ToolbarCommand};
pub use runner::run_tui;

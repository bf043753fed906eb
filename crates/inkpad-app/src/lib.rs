//! InkPad Application
//!
//! The application shell: owns the canvas engine and renderer, maps
//! keyboard shortcuts and UI actions to engine commands, and exports
//! snapshots.

mod app;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError};
pub use shortcuts::{Shortcut, ShortcutCommand, ShortcutRegistry};
pub use ui::UiAction;

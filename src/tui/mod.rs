mod app;
pub mod colors;
mod mouse;
pub mod state;
mod ui;
pub mod widgets;

pub use app::run_tui;

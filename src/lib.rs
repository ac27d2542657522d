pub mod catalog;
pub mod cli;
pub mod document;
pub mod gallery;
pub mod logging;
pub mod tui;

//! Semantic color constants for consistent TUI styling.

use ratatui::prelude::*;

pub const CATEGORY_COLOR: Color = Color::Blue;
pub const FOCUS_COLOR: Color = Color::Cyan;
pub const UNFOCUS_COLOR: Color = Color::DarkGray;
pub const HEADER_COLOR: Color = Color::White;
pub const HELP_TEXT: Color = Color::DarkGray;
pub const ACTIVE_FILTER_BG: Color = Color::Cyan;
pub const SEARCH_COLOR: Color = Color::Yellow;
pub const STATUS_BAR_BG: Color = Color::DarkGray;
pub const STATUS_BAR_FG: Color = Color::White;

/// Create a styled span for a category label (blue with # prefix).
/// Cards without a category render nothing.
pub fn styled_category(category: &str) -> Span<'_> {
    if category.is_empty() {
        Span::raw("")
    } else {
        Span::styled(format!("#{}", category), Style::default().fg(CATEGORY_COLOR))
    }
}

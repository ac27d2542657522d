use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::colors::{HEADER_COLOR, HELP_TEXT};
use super::state::AppState;
use super::widgets::{render_card_grid, render_filter_bar, render_lightbox, render_status_bar};
use crate::logging::log_file_path;

/// Main render function
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let size = frame.area();

    // Filter bar on top, grid in the middle, status bar at bottom
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    render_filter_bar(frame, chunks[0], state);
    render_card_grid(frame, chunks[1], state);
    render_status_bar(frame, chunks[2], state);

    if state.lightbox_open() {
        render_lightbox(frame, size, state);
    }

    if state.show_help {
        render_help_overlay(frame, size);
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = r#"
  Grid:
    h/l ←/→   Previous / next card
    j/k ↓/↑   Move one row
    Enter     Open lightbox
    Tab       Next filter
    S-Tab     Previous filter
    1-9       Pick filter button
    /         Search (Enter/Esc to leave)
    ?         Toggle help
    q         Quit

  Lightbox:
    ←/→ h/l   Previous / next image
    Esc / q   Close

  Mouse:
    Click filter  Apply category
    Click card    Open lightbox
    Click ✕ or outside the panel to close
"#;

    let log_line = match log_file_path() {
        Some(path) => format!("  Log: {}", path.display()),
        None => String::new(),
    };

    let mut lines: Vec<Line> = help_text.lines().map(Line::from).collect();
    lines.push(Line::from(Span::styled(log_line, Style::default().fg(HELP_TEXT))));

    let help_width = 46.min(area.width);
    let help_height = (lines.len() as u16 + 2).min(area.height);
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, help_area);

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .title_style(Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD)),
    );

    frame.render_widget(help, help_area);
}

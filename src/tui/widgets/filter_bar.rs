use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::colors::{ACTIVE_FILTER_BG, FOCUS_COLOR, HELP_TEXT, SEARCH_COLOR, UNFOCUS_COLOR};
use crate::tui::state::AppState;

/// Render the filter buttons and the search field; records button hit areas.
pub fn render_filter_bar(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let border_style = if state.search_active {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default().fg(UNFOCUS_COLOR)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Filter ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        state.hit_areas.buttons.clear();
        return;
    }

    let filters = state.filters();
    let active = state.active_filter_index();

    // Row 1: buttons laid out left to right
    let mut spans = Vec::new();
    let mut buttons = Vec::new();
    let mut x = inner.x;
    let right_edge = inner.x + inner.width;
    for (i, filter) in filters.iter().enumerate() {
        let label = format!(" {} ", filter);
        let width = label.chars().count() as u16;
        if x + width > right_edge {
            break;
        }
        let style = if Some(i) == active {
            Style::default().bg(ACTIVE_FILTER_BG).fg(Color::Black).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        buttons.push((Rect::new(x, inner.y, width, 1), filter.clone()));
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
        x += width + 1;
    }
    state.hit_areas.buttons = buttons;

    frame.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    // Row 2: search field
    if inner.height < 2 {
        return;
    }
    let query = state.search_query();
    let search_line = if state.search_active {
        Line::from(vec![
            Span::styled("/", Style::default().fg(SEARCH_COLOR)),
            Span::raw(query.to_string()),
            Span::styled("▏", Style::default().fg(SEARCH_COLOR)),
        ])
    } else if query.is_empty() {
        Line::from(Span::styled("/ to search", Style::default().fg(HELP_TEXT)))
    } else {
        Line::from(vec![
            Span::styled("/", Style::default().fg(HELP_TEXT)),
            Span::styled(query.to_string(), Style::default().fg(SEARCH_COLOR)),
        ])
    };
    frame.render_widget(
        Paragraph::new(search_line),
        Rect::new(inner.x, inner.y + 1, inner.width, 1),
    );
}

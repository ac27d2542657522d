use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::colors::{styled_category, FOCUS_COLOR, HEADER_COLOR, HELP_TEXT, UNFOCUS_COLOR};
use crate::tui::state::AppState;

const CELL_WIDTH: u16 = 24;
const CELL_HEIGHT: u16 = 4;

/// Render visible cards as a grid. Hidden cards are neither drawn nor
/// recorded for hit-testing.
pub fn render_card_grid(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let cards: Vec<(usize, String, String)> = {
        let all = state.gallery.cards();
        state
            .gallery
            .visible()
            .into_iter()
            .filter_map(|card| {
                let index = all.iter().position(|c| c.node == card.node)?;
                Some((index, card.title.clone(), card.category.clone()))
            })
            .collect()
    };

    let title = format!(" Gallery ({}/{}) ", cards.len(), state.gallery.cards().len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(UNFOCUS_COLOR))
        .title(title)
        .title_style(Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    state.hit_areas.cards.clear();

    if cards.is_empty() {
        let placeholder = Paragraph::new("No cards match the current filter")
            .style(Style::default().fg(HELP_TEXT))
            .alignment(Alignment::Center);
        frame.render_widget(placeholder, inner);
        return;
    }

    let columns = usize::from((inner.width / CELL_WIDTH).max(1));
    let rows = usize::from((inner.height / CELL_HEIGHT).max(1));
    state.grid_columns = columns;
    state.grid_scroll = scroll_for_selection(state.selected / columns, state.grid_scroll, rows);

    let first = state.grid_scroll * columns;
    let last = (first + rows * columns).min(cards.len());
    for (slot, (index, title, category)) in cards[first..last].iter().enumerate() {
        let col = (slot % columns) as u16;
        let row = (slot / columns) as u16;
        let width = CELL_WIDTH.min(inner.width);
        let height = CELL_HEIGHT.min(inner.height);
        let cell = Rect::new(inner.x + col * CELL_WIDTH, inner.y + row * CELL_HEIGHT, width, height);

        let is_selected = first + slot == state.selected;
        let border_style = if is_selected {
            Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(UNFOCUS_COLOR)
        };
        let lines = vec![
            Line::from(Span::styled(title.as_str(), Style::default().fg(HEADER_COLOR))),
            Line::from(styled_category(category)),
        ];
        let widget = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).border_style(border_style));
        frame.render_widget(widget, cell);

        state.hit_areas.cards.push((cell, *index));
    }
}

/// Keep `selected_row` within `rows` rows starting at the returned offset.
fn scroll_for_selection(selected_row: usize, scroll: usize, rows: usize) -> usize {
    if selected_row < scroll {
        selected_row
    } else if selected_row >= scroll + rows {
        selected_row + 1 - rows
    } else {
        scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_keeps_selection_on_screen() {
        assert_eq!(scroll_for_selection(0, 0, 3), 0);
        assert_eq!(scroll_for_selection(2, 0, 3), 0);
        assert_eq!(scroll_for_selection(3, 0, 3), 1);
        assert_eq!(scroll_for_selection(1, 4, 3), 1);
    }
}

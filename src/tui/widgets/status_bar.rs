use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::Paragraph,
};

use crate::tui::colors::{STATUS_BAR_BG, STATUS_BAR_FG};
use crate::tui::state::AppState;

pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let parts = status_parts(state);

    let hints = if state.lightbox_open() {
        "←/→:navigate  Esc:close"
    } else if state.search_active {
        "Enter/Esc:done"
    } else {
        "Enter:open  Tab:filter  /:search  ?:help  q:quit"
    };

    let left_part = parts.join(" | ");
    let width = (area.width as usize).saturating_sub(hints.chars().count());
    let status_text = format!("{:width$}{}", left_part, hints, width = width);

    let status = Paragraph::new(status_text)
        .style(Style::default().bg(STATUS_BAR_BG).fg(STATUS_BAR_FG));

    frame.render_widget(status, area);
}

/// Mode tag, then either the status message or the card counts. Filter and
/// search are only listed while they narrow the set.
fn status_parts(state: &AppState) -> Vec<String> {
    let mode = if state.lightbox_open() {
        "Lightbox"
    } else if state.search_active {
        "Search"
    } else {
        "Grid"
    };
    let mut parts = vec![format!("[{}]", mode)];

    if let Some(ref message) = state.status_message {
        parts.push(message.clone());
        return parts;
    }

    parts.push(format!(
        "{}/{} cards",
        state.visible_count(),
        state.gallery.cards().len()
    ));
    let filter = state.gallery.filter();
    if filter.is_active() {
        parts.push(format!("filter: {}", filter.active_category));
        let query = filter.search_query.trim();
        if !query.is_empty() {
            parts.push(format!("search: \"{}\"", query));
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::GalleryEvent;
    use crate::tui::state::test_helpers::create_test_app_state;

    #[test]
    fn test_unfiltered_grid_shows_counts_only() {
        let state = create_test_app_state();
        assert_eq!(status_parts(&state), vec!["[Grid]", "4/4 cards"]);
    }

    #[test]
    fn test_active_filter_and_search_are_listed() {
        let mut state = create_test_app_state();
        state.dispatch(GalleryEvent::ActivateFilter {
            category: "art".to_string(),
        });
        state.dispatch(GalleryEvent::SearchChanged {
            query: " sun ".to_string(),
        });
        assert_eq!(
            status_parts(&state),
            vec!["[Grid]", "1/4 cards", "filter: art", "search: \"sun\""]
        );
    }

    #[test]
    fn test_status_message_replaces_counts() {
        let mut state = create_test_app_state();
        state.dispatch(GalleryEvent::ActivateCard { index: 0 });
        state.status_message = Some("No images found".to_string());
        assert_eq!(status_parts(&state), vec!["[Lightbox]", "No images found"]);
    }
}

use crate::gallery::GalleryEvent;

use super::AppState;

/// Navigation direction for wrapping list movement
#[derive(Clone, Copy)]
enum Direction {
    Back,
    Forward,
}

/// Advance an index within a wrapping list
fn wrap_index(current: usize, count: usize, direction: Direction) -> usize {
    match direction {
        Direction::Forward => {
            if current < count - 1 { current + 1 } else { 0 }
        }
        Direction::Back => {
            if current > 0 { current - 1 } else { count - 1 }
        }
    }
}

impl AppState {
    pub fn move_left(&mut self) {
        self.step_selection(Direction::Back);
    }

    pub fn move_right(&mut self) {
        self.step_selection(Direction::Forward);
    }

    /// Move one grid row up; stays put on the first row.
    pub fn move_up(&mut self) {
        let columns = self.grid_columns.max(1);
        if self.selected >= columns {
            self.selected -= columns;
        }
    }

    /// Move one grid row down; stays put on the last row.
    pub fn move_down(&mut self) {
        let columns = self.grid_columns.max(1);
        if self.selected + columns < self.visible_count() {
            self.selected += columns;
        }
    }

    fn step_selection(&mut self, direction: Direction) {
        let count = self.visible_count();
        if count > 0 {
            self.selected = wrap_index(self.selected.min(count - 1), count, direction);
        }
    }

    /// Select a visible card by its index among all cards (for mouse clicks).
    /// No-op if the card is hidden or unknown.
    pub fn select_card(&mut self, card_index: usize) {
        let Some(node) = self.gallery.cards().get(card_index).map(|c| c.node) else {
            return;
        };
        if let Some(pos) = self.gallery.visible_nodes().iter().position(|&n| n == node) {
            self.selected = pos;
        }
    }

    /// Open the lightbox on the selected card
    pub fn activate_selected(&mut self) {
        match self.selected_card_index() {
            Some(index) => {
                self.dispatch(GalleryEvent::ActivateCard { index });
            }
            None => self.status_message = Some("No cards match the current filter".to_string()),
        }
    }

    /// Activate the filter button at `index`; out of range is ignored.
    pub fn activate_filter_at(&mut self, index: usize) {
        if let Some(category) = self.filters().into_iter().nth(index) {
            self.dispatch(GalleryEvent::ActivateFilter { category });
        }
    }

    pub fn next_filter(&mut self) {
        self.cycle_filter(Direction::Forward);
    }

    pub fn previous_filter(&mut self) {
        self.cycle_filter(Direction::Back);
    }

    fn cycle_filter(&mut self, direction: Direction) {
        let count = self.filters().len();
        if count == 0 {
            return;
        }
        let next = match self.active_filter_index() {
            Some(current) => wrap_index(current, count, direction),
            None => 0,
        };
        self.activate_filter_at(next);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;
    use crate::document::Document;

    #[test]
    fn test_move_right_wraps() {
        let mut state = create_test_app_state();
        state.selected = 3;
        state.move_right();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_move_left_wraps() {
        let mut state = create_test_app_state();
        state.selected = 0;
        state.move_left();
        assert_eq!(state.selected, 3);
    }

    #[test]
    fn test_move_on_empty_grid_is_noop() {
        let mut state = create_test_app_state();
        state.dispatch(GalleryEvent::SearchChanged {
            query: "zzz".to_string(),
        });
        state.move_right();
        state.move_left();
        state.move_down();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_move_up_down_by_row() {
        let mut state = create_test_app_state();
        state.grid_columns = 2;

        state.move_down();
        assert_eq!(state.selected, 2);
        state.move_down();
        assert_eq!(state.selected, 2, "no row below");
        state.move_up();
        assert_eq!(state.selected, 0);
        state.move_up();
        assert_eq!(state.selected, 0, "no row above");
    }

    #[test]
    fn test_activate_selected_opens_lightbox() {
        let mut state = create_test_app_state();
        state.selected = 2;
        state.activate_selected();

        assert!(state.lightbox_open());
        let overlay = state.gallery.lightbox().overlay();
        assert_eq!(state.document().text(overlay.title), "Dawn");
    }

    #[test]
    fn test_activate_selected_with_nothing_visible_sets_status() {
        let mut state = create_test_app_state();
        state.dispatch(GalleryEvent::SearchChanged {
            query: "zzz".to_string(),
        });
        state.activate_selected();
        assert!(!state.lightbox_open());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_cycle_filter_wraps() {
        let mut state = create_test_app_state();
        state.previous_filter();
        assert_eq!(state.active_filter_index(), Some(3));
        assert_eq!(state.gallery.filter().active_category, "city");

        state.next_filter();
        assert_eq!(state.active_filter_index(), Some(0));
        assert_eq!(state.visible_count(), 4);
    }

    #[test]
    fn test_activate_filter_at_out_of_range_is_noop() {
        let mut state = create_test_app_state();
        state.activate_filter_at(9);
        assert_eq!(state.active_filter_index(), Some(0));
    }

    #[test]
    fn test_select_card_ignores_hidden_card() {
        let mut state = create_test_app_state();
        state.dispatch(GalleryEvent::ActivateFilter {
            category: "art".to_string(),
        });
        state.select_card(2);
        assert_eq!(state.selected, 1);
        state.select_card(1);
        assert_eq!(state.selected, 1);
    }
}

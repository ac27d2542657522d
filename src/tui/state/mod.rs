mod navigation;
mod search;

use std::path::PathBuf;

use ratatui::layout::Rect;

use crate::catalog::Catalog;
use crate::document::{Document, MemoryDocument, NodeId, ACTIVE_CLASS};
use crate::gallery::{GalleryController, GalleryEvent, Propagation};
use crate::tui::widgets::LightboxImage;

/// Screen regions saved each frame for mouse hit-testing
#[derive(Debug, Default, Clone)]
pub struct HitAreas {
    /// Filter buttons with their `data-filter` value
    pub buttons: Vec<(Rect, String)>,
    /// Rendered cards with their index among all cards
    pub cards: Vec<(Rect, usize)>,
    /// Lightbox panel; everything outside it is backdrop while open
    pub panel: Rect,
    /// Close glyph in the panel's top-right corner
    pub close: Rect,
}

/// Main application state
pub struct AppState {
    pub library_path: PathBuf,
    pub gallery: GalleryController<MemoryDocument>,
    /// Selection within the visible set
    pub selected: usize,
    /// Cards per grid row, updated on render
    pub grid_columns: usize,
    /// First grid row on screen
    pub grid_scroll: usize,
    /// Typing goes to the search field
    pub search_active: bool,
    pub show_help: bool,
    /// Status message to show temporarily
    pub status_message: Option<String>,
    /// Force a full terminal redraw on the next frame (image protocol content
    /// under a closed overlay has to be re-sent).
    pub force_redraw: bool,
    pub hit_areas: HitAreas,
    /// Decoded image for the lightbox, keyed by source
    pub lightbox_image: Option<LightboxImage>,
}

impl AppState {
    pub fn new(library_path: PathBuf, catalog: &Catalog) -> Self {
        let gallery = GalleryController::new(MemoryDocument::from_catalog(catalog));
        Self {
            library_path,
            gallery,
            selected: 0,
            grid_columns: 1,
            grid_scroll: 0,
            search_active: false,
            show_help: false,
            status_message: None,
            force_redraw: false,
            hit_areas: HitAreas::default(),
            lightbox_image: None,
        }
    }

    /// Forward an event to the gallery and keep the grid selection valid.
    pub fn dispatch(&mut self, event: GalleryEvent) -> Propagation {
        let was_open = self.lightbox_open();
        let propagation = self.gallery.dispatch(event);
        if was_open && !self.lightbox_open() {
            self.force_redraw = true;
        }
        self.sync_selection_with_lightbox();
        self.clamp_selection();
        propagation
    }

    pub fn document(&self) -> &MemoryDocument {
        self.gallery.document()
    }

    pub fn lightbox_open(&self) -> bool {
        self.gallery.lightbox().is_open()
    }

    pub fn visible_count(&self) -> usize {
        self.gallery.visible().len()
    }

    /// Index (among all cards) of the selected visible card
    pub fn selected_card_index(&self) -> Option<usize> {
        let node = self.gallery.visible().get(self.selected)?.node;
        self.card_index(node)
    }

    fn card_index(&self, node: NodeId) -> Option<usize> {
        self.gallery.cards().iter().position(|c| c.node == node)
    }

    /// `data-filter` values of the filter buttons, in order
    pub fn filters(&self) -> Vec<String> {
        let doc = self.document();
        self.gallery
            .buttons()
            .iter()
            .map(|&b| doc.data(b, "filter").unwrap_or_default())
            .collect()
    }

    pub fn active_filter_index(&self) -> Option<usize> {
        let doc = self.document();
        self.gallery
            .buttons()
            .iter()
            .position(|&b| doc.has_class(b, ACTIVE_CLASS))
    }

    /// Keep the grid selection on the card shown in the lightbox.
    fn sync_selection_with_lightbox(&mut self) {
        let Some(current) = self.gallery.lightbox().current() else {
            return;
        };
        if let Some(pos) = self.gallery.visible_nodes().iter().position(|&n| n == current) {
            self.selected = pos;
        }
    }

    pub(super) fn clamp_selection(&mut self) {
        let count = self.visible_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if !self.show_help {
            self.force_redraw = true;
        }
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }
}

/// Shared test helpers for all state sub-module tests.
#[cfg(test)]
pub(crate) mod test_helpers {
    use std::path::PathBuf;

    use super::AppState;
    use crate::catalog::{CardSpec, Catalog};

    /// Sunset (art), Sunrise (photo), Dawn (art), Harbor (city)
    pub fn create_test_catalog() -> Catalog {
        Catalog {
            cards: vec![
                CardSpec::new(Some("art"), Some("Sunset"), "art/sunset.jpg"),
                CardSpec::new(Some("photo"), Some("Sunrise"), "photo/sunrise.jpg"),
                CardSpec::new(Some("art"), Some("Dawn"), "art/dawn.jpg"),
                CardSpec::new(Some("city"), Some("Harbor"), "city/harbor.jpg"),
            ],
        }
    }

    pub fn create_test_app_state() -> AppState {
        AppState::new(PathBuf::from("/tmp/test-gallery"), &create_test_catalog())
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::gallery::Key;

    #[test]
    fn test_new_state_shows_all_cards() {
        let state = create_test_app_state();
        assert_eq!(state.visible_count(), 4);
        assert_eq!(state.filters(), vec!["all", "art", "photo", "city"]);
        assert_eq!(state.active_filter_index(), Some(0));
        assert!(!state.lightbox_open());
    }

    #[test]
    fn test_dispatch_clamps_selection_when_set_shrinks() {
        let mut state = create_test_app_state();
        state.selected = 3;
        state.dispatch(GalleryEvent::ActivateFilter {
            category: "art".to_string(),
        });
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_selection_follows_lightbox() {
        let mut state = create_test_app_state();
        state.dispatch(GalleryEvent::ActivateCard { index: 1 });
        assert_eq!(state.selected, 1);

        state.dispatch(GalleryEvent::Key(Key::ArrowRight));
        assert_eq!(state.selected, 2);
        assert_eq!(state.selected_card_index(), Some(2));
    }

    #[test]
    fn test_closing_lightbox_requests_redraw() {
        let mut state = create_test_app_state();
        state.dispatch(GalleryEvent::ActivateCard { index: 0 });
        assert!(!state.force_redraw);

        state.dispatch(GalleryEvent::Key(Key::Escape));
        assert!(!state.lightbox_open());
        assert!(state.force_redraw);
    }

    #[test]
    fn test_selected_card_index_maps_through_filter() {
        let mut state = create_test_app_state();
        state.dispatch(GalleryEvent::ActivateFilter {
            category: "art".to_string(),
        });
        state.selected = 1;
        assert_eq!(state.selected_card_index(), Some(2));
    }

    #[test]
    fn test_selected_card_index_none_when_empty() {
        let mut state = create_test_app_state();
        state.dispatch(GalleryEvent::SearchChanged {
            query: "zzz".to_string(),
        });
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_card_index(), None);
    }
}

use crate::gallery::GalleryEvent;

use super::AppState;

impl AppState {
    /// Current text of the search field
    pub fn search_query(&self) -> &str {
        &self.gallery.filter().search_query
    }

    /// Start typing into the search field; the existing query is kept.
    pub fn start_search(&mut self) {
        self.search_active = true;
    }

    /// Stop typing; the query stays applied.
    pub fn stop_search(&mut self) {
        self.search_active = false;
    }

    /// Each keystroke refilters immediately.
    pub fn search_push_char(&mut self, c: char) {
        let mut query = self.search_query().to_string();
        query.push(c);
        self.dispatch(GalleryEvent::SearchChanged { query });
    }

    pub fn search_pop_char(&mut self) {
        let mut query = self.search_query().to_string();
        if query.pop().is_some() {
            self.dispatch(GalleryEvent::SearchChanged { query });
        }
    }

    pub fn clear_search(&mut self) {
        if !self.search_query().is_empty() {
            self.dispatch(GalleryEvent::SearchChanged {
                query: String::new(),
            });
        }
    }
}

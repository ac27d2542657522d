use crate::document::{Document, NodeId};

/// Filter value that matches every category.
pub const ALL_CATEGORIES: &str = "all";

/// Immutable attributes of a gallery card, read once from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub node: NodeId,
    pub category: String,
    pub title: String,
}

impl Card {
    /// Read a card's data attributes. Missing attributes become empty strings.
    pub fn read<D: Document + ?Sized>(doc: &D, node: NodeId) -> Self {
        Self {
            node,
            category: doc.data(node, "cat").unwrap_or_default(),
            title: doc.data(node, "title").unwrap_or_default(),
        }
    }
}

/// Active category plus free-text query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub active_category: String,
    pub search_query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            active_category: ALL_CATEGORIES.to_string(),
            search_query: String::new(),
        }
    }
}

impl FilterState {
    pub fn new(category: &str, query: &str) -> Self {
        Self {
            active_category: category.to_string(),
            search_query: query.to_string(),
        }
    }

    /// A card is visible iff it passes both the category and the search predicate.
    pub fn matches(&self, card: &Card) -> bool {
        matches_category(card, &self.active_category) && matches_search(card, &self.search_query)
    }

    /// True when either predicate narrows the set.
    pub fn is_active(&self) -> bool {
        self.active_category != ALL_CATEGORIES || !self.search_query.trim().is_empty()
    }
}

/// `all` matches everything; otherwise case-insensitive equality.
pub fn matches_category(card: &Card, category: &str) -> bool {
    category == ALL_CATEGORIES || card.category.to_lowercase() == category.to_lowercase()
}

/// Case-insensitive substring match against title or category. The query is
/// trimmed first; a blank query matches everything.
pub fn matches_search(card: &Card, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    card.title.to_lowercase().contains(&query) || card.category.to_lowercase().contains(&query)
}

/// The visible set: cards passing `filter`, in original order.
pub fn compute_visible<'a>(cards: &'a [Card], filter: &FilterState) -> Vec<&'a Card> {
    cards.iter().filter(|card| filter.matches(card)).collect()
}

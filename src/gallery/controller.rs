use tracing::{debug, info, instrument, trace};

use super::filter::{compute_visible, Card, FilterState, ALL_CATEGORIES};
use super::lightbox::{Lightbox, Step};
use crate::document::{Document, NodeId, ACTIVE_CLASS};

/// Keys the gallery reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other(String),
}

/// Input events delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    /// A filter button was activated; `category` is its `data-filter` value.
    ActivateFilter { category: String },
    /// The search field now holds `query`.
    SearchChanged { query: String },
    /// The card at `index` (document order, hidden or not) was activated.
    ActivateCard { index: usize },
    Key(Key),
    /// Click landing somewhere inside the overlay; `target` is the innermost node hit.
    OverlayClick { target: NodeId },
    /// The overlay's close button was activated.
    CloseControl,
}

/// Whether the host should suppress its default handling of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    PreventDefault,
}

/// Filter, search and lightbox logic over a host document.
///
/// The controller owns the document for its whole lifetime and is the only
/// writer of card visibility and overlay content. Use [`dispose`](Self::dispose)
/// to get the document back with the overlay removed.
#[derive(Debug)]
pub struct GalleryController<D: Document> {
    doc: D,
    buttons: Vec<NodeId>,
    cards: Vec<Card>,
    search: Option<NodeId>,
    filter: FilterState,
    lightbox: Lightbox,
}

impl<D: Document> GalleryController<D> {
    /// Look up buttons, cards and the search input, build the overlay and run
    /// the initial `all` filter. Call once the host tree is complete.
    #[instrument(skip_all)]
    pub fn new(mut doc: D) -> Self {
        let buttons = doc.query_by_data("filter");
        let cards: Vec<Card> = doc
            .query_by_class("card")
            .into_iter()
            .map(|node| Card::read(&doc, node))
            .collect();
        let search = doc.element_by_id("search");
        let lightbox = Lightbox::build(&mut doc);

        info!(
            cards = cards.len(),
            buttons = buttons.len(),
            has_search = search.is_some(),
            "gallery initialized"
        );

        let mut controller = Self {
            doc,
            buttons,
            cards,
            search,
            filter: FilterState::default(),
            lightbox,
        };
        controller.filter_gallery(ALL_CATEGORIES);
        controller
    }

    /// Route one host event. Returns whether the host default must be suppressed.
    pub fn dispatch(&mut self, event: GalleryEvent) -> Propagation {
        trace!(?event, "dispatch");
        match event {
            GalleryEvent::ActivateFilter { category } => self.activate_filter(&category),
            GalleryEvent::SearchChanged { query } => self.search_changed(&query),
            GalleryEvent::ActivateCard { index } => {
                self.activate_card(index);
            }
            GalleryEvent::Key(key) => return self.handle_key(&key),
            GalleryEvent::OverlayClick { target } => {
                if target == self.lightbox.overlay().root {
                    self.close();
                }
            }
            GalleryEvent::CloseControl => self.close(),
        }
        Propagation::Continue
    }

    fn handle_key(&mut self, key: &Key) -> Propagation {
        if !self.lightbox.is_open() {
            return Propagation::Continue;
        }
        match key {
            Key::ArrowRight => {
                self.next();
                Propagation::PreventDefault
            }
            Key::ArrowLeft => {
                self.previous();
                Propagation::PreventDefault
            }
            Key::Escape => {
                self.close();
                Propagation::Continue
            }
            Key::Other(_) => Propagation::Continue,
        }
    }

    /// Mark the button for `category` as the only active one and refilter.
    /// Buttons match case-insensitively, like the category filter itself.
    pub fn activate_filter(&mut self, category: &str) {
        let wanted = category.to_lowercase();
        let selected = self.buttons.iter().copied().find(|&b| {
            self.doc
                .data(b, "filter")
                .is_some_and(|f| f.to_lowercase() == wanted)
        });
        for &button in &self.buttons {
            self.doc.remove_class(button, ACTIVE_CLASS);
        }
        if let Some(button) = selected {
            self.doc.add_class(button, ACTIVE_CLASS);
        } else {
            debug!(category, "no filter button for category");
        }
        self.filter_gallery(category);
    }

    /// Store the new query and refilter under the currently active button.
    pub fn search_changed(&mut self, query: &str) {
        match self.search {
            Some(input) => self.doc.set_value(input, query),
            None => self.filter.search_query = query.to_string(),
        }
        let category = self.active_category();
        self.filter_gallery(&category);
    }

    /// Category of the button marked active, or `all` when none is.
    pub fn active_category(&self) -> String {
        self.buttons
            .iter()
            .find(|&&b| self.doc.has_class(b, ACTIVE_CLASS))
            .and_then(|&b| self.doc.data(b, "filter"))
            .unwrap_or_else(|| ALL_CATEGORIES.to_string())
    }

    /// Recompute every card's hidden flag for `category` and the current query.
    pub fn filter_gallery(&mut self, category: &str) {
        let query = match self.search {
            Some(input) => self.doc.value(input),
            None => self.filter.search_query.clone(),
        };
        self.filter = FilterState::new(category, &query);

        let mut visible = 0;
        for card in &self.cards {
            let show = self.filter.matches(card);
            self.doc.set_hidden(card.node, !show);
            visible += usize::from(show);
        }
        debug!(category, query = %query.trim(), visible, total = self.cards.len(), "filtered gallery");
    }

    /// Open the lightbox on the card at `index` within the live visible set.
    /// Hidden or unknown cards are ignored.
    pub fn activate_card(&mut self, index: usize) -> bool {
        let Some(node) = self.cards.get(index).map(|c| c.node) else {
            debug!(index, "activated card does not exist");
            return false;
        };
        let visible = self.visible_nodes();
        let Some(position) = visible.iter().position(|&n| n == node) else {
            debug!(index, "activated card is hidden");
            return false;
        };
        self.lightbox.open(&mut self.doc, visible, position)
    }

    /// Show `snapshot[index]` in the lightbox; out of range is a no-op.
    pub fn open(&mut self, snapshot: Vec<NodeId>, index: usize) -> bool {
        self.lightbox.open(&mut self.doc, snapshot, index)
    }

    pub fn close(&mut self) {
        self.lightbox.close(&mut self.doc);
    }

    /// Advance to the next visible card, wrapping. No-op while closed or empty.
    pub fn next(&mut self) -> bool {
        self.navigate(Step::Next)
    }

    /// Go back to the previous visible card, wrapping. No-op while closed or empty.
    pub fn previous(&mut self) -> bool {
        self.navigate(Step::Previous)
    }

    fn navigate(&mut self, step: Step) -> bool {
        if !self.lightbox.is_open() {
            return false;
        }
        let visible = self.visible_nodes();
        self.lightbox.step(&mut self.doc, visible, step)
    }

    /// Cards passing the current filter, in document order.
    pub fn visible(&self) -> Vec<&Card> {
        compute_visible(&self.cards, &self.filter)
    }

    pub fn visible_nodes(&self) -> Vec<NodeId> {
        self.visible().into_iter().map(|c| c.node).collect()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn buttons(&self) -> &[NodeId] {
        &self.buttons
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Tear down: remove the overlay and hand the document back.
    pub fn dispose(mut self) -> D {
        self.lightbox.remove(&mut self.doc);
        info!("gallery disposed");
        self.doc
    }
}

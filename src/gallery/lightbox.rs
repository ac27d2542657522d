use tracing::debug;

use crate::document::{Document, NodeId};

/// Class present on the overlay while it is shown.
pub const OPEN_CLASS: &str = "open";

/// Static instructions rendered below the caption.
pub const HINT_TEXT: &str = "Use ← / → keys to navigate or Esc to close.";

/// Navigation direction through the visible set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

/// Advance `current` by one step, wrapping within `count`.
/// `current` may exceed `count` when the set shrank since it was taken.
fn wrap_index(current: usize, count: usize, step: Step) -> usize {
    debug_assert!(count > 0);
    match step {
        Step::Next => (current % count + 1) % count,
        Step::Previous => (current % count + count - 1) % count,
    }
}

/// Handles to the overlay nodes created by [`Lightbox::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    /// Full-screen backdrop; clicks landing directly on it dismiss.
    pub root: NodeId,
    pub panel: NodeId,
    pub close: NodeId,
    pub image: NodeId,
    pub title: NodeId,
    pub category: NodeId,
}

/// Modal viewer over a snapshot of the visible cards.
#[derive(Debug)]
pub struct Lightbox {
    overlay: Overlay,
    is_open: bool,
    cursor: usize,
    snapshot: Vec<NodeId>,
}

impl Lightbox {
    /// Create the overlay markup, append it to the body and return it closed.
    pub fn build<D: Document + ?Sized>(doc: &mut D) -> Self {
        let root = doc.create_element("div");
        doc.add_class(root, "lightbox");
        doc.set_attribute(root, "aria-hidden", "true");

        let panel = doc.create_element("div");
        doc.add_class(panel, "panel");
        doc.set_attribute(panel, "role", "dialog");
        doc.set_attribute(panel, "aria-label", "Image preview");
        doc.append_child(root, panel);

        let close = doc.create_element("button");
        doc.add_class(close, "close");
        doc.set_attribute(close, "id", "lb-close");
        doc.set_attribute(close, "aria-label", "Close");
        doc.set_text(close, "✕");
        doc.append_child(panel, close);

        let image = doc.create_element("img");
        doc.set_attribute(image, "id", "lb-img");
        doc.set_attribute(image, "src", "");
        doc.set_attribute(image, "alt", "Preview");
        doc.set_attribute(image, "tabindex", "0");
        doc.append_child(panel, image);

        let side = doc.create_element("div");
        doc.add_class(side, "side");
        doc.append_child(panel, side);

        let title = doc.create_element("h3");
        doc.set_attribute(title, "id", "lb-title");
        doc.append_child(side, title);

        let category = doc.create_element("p");
        doc.set_attribute(category, "id", "lb-cat");
        doc.append_child(side, category);

        let hint = doc.create_element("p");
        doc.add_class(hint, "hint");
        doc.set_text(hint, HINT_TEXT);
        doc.append_child(side, hint);

        let body = doc.body();
        doc.append_child(body, root);

        Self {
            overlay: Overlay {
                root,
                panel,
                close,
                image,
                title,
                category,
            },
            is_open: false,
            cursor: 0,
            snapshot: Vec::new(),
        }
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Cursor into the snapshot, only meaningful while open.
    pub fn cursor(&self) -> Option<usize> {
        self.is_open.then_some(self.cursor)
    }

    pub fn snapshot(&self) -> &[NodeId] {
        &self.snapshot
    }

    /// Card currently on display.
    pub fn current(&self) -> Option<NodeId> {
        self.cursor().and_then(|i| self.snapshot.get(i).copied())
    }

    /// Show `snapshot[index]`. Out-of-range indices (including any index into
    /// an empty snapshot) leave the lightbox untouched and return false.
    pub fn open<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        snapshot: Vec<NodeId>,
        index: usize,
    ) -> bool {
        let Some(&card) = snapshot.get(index) else {
            debug!(index, len = snapshot.len(), "lightbox open out of range, ignoring");
            return false;
        };

        let src = doc
            .first_descendant_by_tag(card, "img")
            .and_then(|img| doc.attribute(img, "src"))
            .unwrap_or_default();
        let title = doc.data(card, "title").unwrap_or_default();
        let category = doc.data(card, "cat").unwrap_or_default().to_uppercase();

        let overlay = self.overlay;
        doc.set_attribute(overlay.image, "src", &src);
        doc.set_text(overlay.title, &title);
        doc.set_text(overlay.category, &category);
        doc.add_class(overlay.root, OPEN_CLASS);
        doc.set_attribute(overlay.root, "aria-hidden", "false");
        doc.focus(overlay.image);

        self.snapshot = snapshot;
        self.cursor = index;
        self.is_open = true;
        true
    }

    /// Hide the overlay. Content stays until the next open overwrites it.
    pub fn close<D: Document + ?Sized>(&mut self, doc: &mut D) {
        doc.remove_class(self.overlay.root, OPEN_CLASS);
        doc.set_attribute(self.overlay.root, "aria-hidden", "true");
        self.is_open = false;
    }

    /// Move one step through `visible`, a freshly derived visible set.
    /// An empty set is a no-op.
    pub fn step<D: Document + ?Sized>(&mut self, doc: &mut D, visible: Vec<NodeId>, step: Step) -> bool {
        if visible.is_empty() {
            debug!(?step, "no visible cards, navigation ignored");
            return false;
        }
        let index = wrap_index(self.cursor, visible.len(), step);
        self.open(doc, visible, index)
    }

    /// Remove the overlay from the document.
    pub fn remove<D: Document + ?Sized>(self, doc: &mut D) {
        doc.detach(self.overlay.root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;

    fn doc_with_cards() -> (MemoryDocument, Vec<NodeId>) {
        let mut doc = MemoryDocument::new();
        let cards = vec![
            doc.add_card(Some("art"), Some("A"), "a.jpg"),
            doc.add_card(Some("photo"), Some("B"), "b.jpg"),
            doc.add_card(Some("art"), Some("C"), "c.jpg"),
        ];
        (doc, cards)
    }

    #[test]
    fn test_wrap_index_wraps_both_ways() {
        assert_eq!(wrap_index(2, 3, Step::Next), 0);
        assert_eq!(wrap_index(0, 3, Step::Previous), 2);
        assert_eq!(wrap_index(1, 3, Step::Next), 2);
        assert_eq!(wrap_index(0, 1, Step::Next), 0);
        assert_eq!(wrap_index(0, 1, Step::Previous), 0);
    }

    #[test]
    fn test_wrap_index_with_stale_cursor_stays_in_range() {
        // cursor from a longer snapshot
        assert!(wrap_index(7, 2, Step::Next) < 2);
        assert!(wrap_index(7, 2, Step::Previous) < 2);
    }

    #[test]
    fn test_build_creates_closed_overlay() {
        let mut doc = MemoryDocument::new();
        let lightbox = Lightbox::build(&mut doc);
        let overlay = lightbox.overlay();

        assert!(!lightbox.is_open());
        assert_eq!(doc.attribute(overlay.root, "aria-hidden").as_deref(), Some("true"));
        assert_eq!(doc.element_by_id("lb-img"), Some(overlay.image));
        assert_eq!(doc.element_by_id("lb-close"), Some(overlay.close));
        assert_eq!(doc.attribute(overlay.image, "tabindex").as_deref(), Some("0"));
        assert_eq!(doc.query_by_class("lightbox"), vec![overlay.root]);
    }

    #[test]
    fn test_open_fills_content_and_focuses_image() {
        let (mut doc, cards) = doc_with_cards();
        let mut lightbox = Lightbox::build(&mut doc);
        let overlay = lightbox.overlay();

        assert!(lightbox.open(&mut doc, cards.clone(), 1));
        assert!(lightbox.is_open());
        assert_eq!(lightbox.cursor(), Some(1));
        assert_eq!(doc.attribute(overlay.image, "src").as_deref(), Some("b.jpg"));
        assert_eq!(doc.text(overlay.title), "B");
        assert_eq!(doc.text(overlay.category), "PHOTO");
        assert!(doc.has_class(overlay.root, OPEN_CLASS));
        assert_eq!(doc.attribute(overlay.root, "aria-hidden").as_deref(), Some("false"));
        assert_eq!(doc.focused(), Some(overlay.image));
    }

    #[test]
    fn test_open_out_of_range_is_noop() {
        let (mut doc, cards) = doc_with_cards();
        let mut lightbox = Lightbox::build(&mut doc);

        assert!(!lightbox.open(&mut doc, Vec::new(), 0));
        assert!(!lightbox.open(&mut doc, cards, 3));
        assert!(!lightbox.is_open());
        assert_eq!(lightbox.cursor(), None);
    }

    #[test]
    fn test_close_keeps_content() {
        let (mut doc, cards) = doc_with_cards();
        let mut lightbox = Lightbox::build(&mut doc);
        let overlay = lightbox.overlay();

        lightbox.open(&mut doc, cards, 2);
        lightbox.close(&mut doc);

        assert!(!lightbox.is_open());
        assert!(!doc.has_class(overlay.root, OPEN_CLASS));
        assert_eq!(doc.attribute(overlay.root, "aria-hidden").as_deref(), Some("true"));
        assert_eq!(doc.text(overlay.title), "C");
        assert_eq!(doc.attribute(overlay.image, "src").as_deref(), Some("c.jpg"));
    }

    #[test]
    fn test_step_on_empty_set_is_noop() {
        let (mut doc, cards) = doc_with_cards();
        let mut lightbox = Lightbox::build(&mut doc);
        lightbox.open(&mut doc, cards, 1);

        assert!(!lightbox.step(&mut doc, Vec::new(), Step::Next));
        assert!(!lightbox.step(&mut doc, Vec::new(), Step::Previous));
        assert_eq!(lightbox.cursor(), Some(1));
    }

    #[test]
    fn test_remove_detaches_overlay() {
        let mut doc = MemoryDocument::new();
        let lightbox = Lightbox::build(&mut doc);
        lightbox.remove(&mut doc);
        assert!(doc.query_by_class("lightbox").is_empty());
        assert_eq!(doc.element_by_id("lb-img"), None);
    }
}

//! Host document abstraction.
//!
//! The gallery controller never talks to a concrete UI toolkit. Everything it
//! needs from the host is expressed by the [`Document`] trait: look elements up,
//! read their data attributes, flip their visibility and write overlay content.
//! [`MemoryDocument`] is the in-process implementation used by the terminal
//! host, the headless `list` command and the tests.

mod memory;

pub use memory::MemoryDocument;

/// Handle to an element inside a [`Document`].
pub type NodeId = usize;

/// Class toggled on cards that fail the active filter.
pub const HIDDEN_CLASS: &str = "hidden";

/// Class marking the selected filter button.
pub const ACTIVE_CLASS: &str = "active";

/// Minimal capability set the gallery controller requires from its host.
pub trait Document {
    /// Root element that owned overlays are appended to.
    fn body(&self) -> NodeId;

    /// Elements carrying `data-{key}`, in document order.
    fn query_by_data(&self, key: &str) -> Vec<NodeId>;

    /// Elements with the given class, in document order.
    fn query_by_class(&self, class: &str) -> Vec<NodeId>;

    /// Element with the given id, if any.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// First descendant of `node` with the given tag name.
    fn first_descendant_by_tag(&self, node: NodeId, tag: &str) -> Option<NodeId>;

    /// Value of `data-{key}` on `node`.
    fn data(&self, node: NodeId, key: &str) -> Option<String>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);

    fn text(&self, node: NodeId) -> String;
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Current value of a text input.
    fn value(&self, node: NodeId) -> String;
    fn set_value(&mut self, node: NodeId, value: &str);

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;
    fn append_child(&mut self, parent: NodeId, child: NodeId);
    /// Detach `node` (and its subtree) from its parent.
    fn detach(&mut self, node: NodeId);

    fn focus(&mut self, node: NodeId);
    fn focused(&self) -> Option<NodeId>;

    /// Whether `node` is excluded from display and hit-testing.
    fn is_hidden(&self, node: NodeId) -> bool {
        self.has_class(node, HIDDEN_CLASS)
    }

    fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if hidden {
            self.add_class(node, HIDDEN_CLASS);
        } else {
            self.remove_class(node, HIDDEN_CLASS);
        }
    }
}

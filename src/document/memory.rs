use std::collections::{BTreeMap, BTreeSet};

use super::{Document, NodeId, ACTIVE_CLASS};
use crate::catalog::Catalog;

/// A single node of a [`MemoryDocument`].
#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }
}

/// Arena-backed document tree.
///
/// Node `0` is the body. Detached nodes stay in the arena but are skipped by
/// every query, so handles held elsewhere never dangle.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Element>,
    focused: Option<NodeId>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    const BODY: NodeId = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body")],
            focused: None,
        }
    }

    /// Build the gallery markup for a catalog: search input, one filter button
    /// per category (after an active `all` button), then one card per entry.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut doc = Self::new();
        doc.add_search_input();

        let all = doc.add_filter_button("all");
        doc.add_class(all, ACTIVE_CLASS);
        for category in catalog.categories() {
            doc.add_filter_button(&category);
        }

        for card in &catalog.cards {
            doc.add_card(card.category.as_deref(), card.title.as_deref(), &card.image);
        }
        doc
    }

    /// Append a `button.btn[data-filter]` to the body.
    pub fn add_filter_button(&mut self, filter: &str) -> NodeId {
        let button = self.create_element("button");
        self.add_class(button, "btn");
        self.set_attribute(button, "data-filter", filter);
        self.set_text(button, filter);
        self.append_child(Self::BODY, button);
        button
    }

    /// Append the `input#search` text field to the body.
    pub fn add_search_input(&mut self) -> NodeId {
        let input = self.create_element("input");
        self.set_attribute(input, "id", "search");
        self.set_attribute(input, "type", "search");
        self.append_child(Self::BODY, input);
        input
    }

    /// Append a `div.card` with its `img` child. Absent data stays absent.
    pub fn add_card(&mut self, category: Option<&str>, title: Option<&str>, src: &str) -> NodeId {
        let card = self.create_element("div");
        self.add_class(card, "card");
        if let Some(category) = category {
            self.set_attribute(card, "data-cat", category);
        }
        if let Some(title) = title {
            self.set_attribute(card, "data-title", title);
        }
        let img = self.create_element("img");
        self.set_attribute(img, "src", src);
        self.set_attribute(img, "alt", title.unwrap_or_default());
        self.append_child(card, img);
        self.append_child(Self::BODY, card);
        card
    }

    /// Attached nodes in document (pre-)order, starting at `root`.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            order.push(node);
            if let Some(element) = self.nodes.get(node) {
                stack.extend(element.children.iter().rev().copied());
            }
        }
        order
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == Self::BODY {
                return true;
            }
            current = self.nodes.get(id).and_then(|e| e.parent);
        }
        false
    }
}

impl Document for MemoryDocument {
    fn body(&self) -> NodeId {
        Self::BODY
    }

    fn query_by_data(&self, key: &str) -> Vec<NodeId> {
        let name = format!("data-{}", key);
        self.descendants(Self::BODY)
            .into_iter()
            .filter(|&n| self.nodes[n].attributes.contains_key(&name))
            .collect()
    }

    fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(Self::BODY)
            .into_iter()
            .filter(|&n| self.nodes[n].classes.contains(class))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(Self::BODY)
            .into_iter()
            .find(|&n| self.nodes[n].attributes.get("id").is_some_and(|v| v == id))
    }

    fn first_descendant_by_tag(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(node)
            .into_iter()
            .skip(1)
            .find(|&n| self.nodes[n].tag == tag)
    }

    fn data(&self, node: NodeId, key: &str) -> Option<String> {
        self.attribute(node, &format!("data-{}", key))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes.get(node)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.nodes.get_mut(node) {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes.get(node).is_some_and(|e| e.classes.contains(class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.nodes.get_mut(node) {
            element.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.nodes.get_mut(node) {
            element.classes.remove(class);
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.nodes.get(node).map(|e| e.text.clone()).unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.nodes.get_mut(node) {
            element.text = text.to_string();
        }
    }

    fn value(&self, node: NodeId) -> String {
        self.nodes.get(node).map(|e| e.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(element) = self.nodes.get_mut(node) {
            element.value = value.to_string();
        }
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Element::new(tag));
        self.nodes.len() - 1
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent >= self.nodes.len() || child >= self.nodes.len() || child == Self::BODY {
            return;
        }
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(node).and_then(|e| e.parent) else {
            return;
        };
        self.nodes[parent].children.retain(|&c| c != node);
        self.nodes[node].parent = None;
        if self.focused.is_some_and(|f| !self.is_attached(f)) {
            self.focused = None;
        }
    }

    fn focus(&mut self, node: NodeId) {
        if self.is_attached(node) {
            self.focused = Some(node);
        }
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused
    }
}

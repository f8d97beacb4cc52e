//! Document tree management
//!
//! Nodes live in a slotmap arena owned by [`Document`]; a [`NodeId`] is a
//! cheap copyable handle. Structural operations (`append_child`,
//! `insert_before`, `remove_child`, `clear_children`) keep parent links
//! consistent, and removal frees the whole subtree along with its listener
//! side-table entries.
//!
//! Bound nodes are patched in place by the reactive layer: the handle a
//! caller holds stays valid across updates, only attributes and children
//! change underneath it.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

use crate::events::{EventCallback, Listener};
use crate::value::Value;

new_key_type! {
    /// Handle to a node in a [`Document`]
    pub struct NodeId;
}

/// Shared handle to a document.
///
/// The view layer is single-threaded and synchronous: mutations patch the
/// tree inline before the mutating call returns, so `Rc<RefCell<..>>` is the
/// right ownership shape (no locks, no scheduling).
pub type SharedDocument = Rc<RefCell<Document>>;

/// What a node is: an element with a tag, or a leaf text run.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Element { tag: String },
    Text(String),
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    attrs: IndexMap<String, String>,
    props: FxHashMap<String, Value>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl NodeData {
    fn element(tag: String) -> Self {
        Self {
            kind: NodeKind::Element { tag },
            attrs: IndexMap::new(),
            props: FxHashMap::default(),
            children: Vec::new(),
            parent: None,
        }
    }

    fn text(content: String) -> Self {
        Self {
            kind: NodeKind::Text(content),
            attrs: IndexMap::new(),
            props: FxHashMap::default(),
            children: Vec::new(),
            parent: None,
        }
    }
}

/// Tags serialized without a closing tag and never given children.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "source", "track", "wbr",
];

/// Arena of UI nodes plus the listener side-table.
#[derive(Default)]
pub struct Document {
    nodes: SlotMap<NodeId, NodeData>,
    listeners: SecondaryMap<NodeId, SmallVec<[Listener; 2]>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the document for shared single-threaded access.
    pub fn into_shared(self) -> SharedDocument {
        Rc::new(RefCell::new(self))
    }

    // =========================================================================
    // Node creation and identity
    // =========================================================================

    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.nodes.insert(NodeData::element(tag.into()))
    }

    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.nodes.insert(NodeData::text(content.into()))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id).map(|n| &n.kind)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(id).map(|n| &n.kind) {
            Some(NodeKind::Element { tag }) => Some(tag),
            _ => None,
        }
    }

    /// Text content of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(id).map(|n| &n.kind) {
            Some(NodeKind::Text(content)) => Some(content),
            _ => None,
        }
    }

    /// Replace a text node's content in place.
    pub fn set_text(&mut self, id: NodeId, content: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            if let NodeKind::Text(ref mut current) = node.kind {
                *current = content.into();
            }
        }
    }

    /// Replace an element's children with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, content: impl Into<String>) {
        self.clear_children(id);
        let text = self.create_text(content);
        self.append_child(id, text);
    }

    // =========================================================================
    // Structure
    // =========================================================================

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }
        self.detach(child);
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
    }

    /// Insert `child` immediately before `reference` among `parent`'s
    /// children. With no reference (or a reference that is not a child of
    /// `parent`) the child is appended.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }
        self.detach(child);
        let position = reference
            .and_then(|r| self.nodes[parent].children.iter().position(|&c| c == r));
        match position {
            Some(index) => self.nodes[parent].children.insert(index, child),
            None => self.nodes[parent].children.push(child),
        }
        self.nodes[child].parent = Some(parent);
    }

    /// Remove `child` from `parent` and free its subtree.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.parent(child) != Some(parent) {
            return;
        }
        self.detach(child);
        self.free_subtree(child);
    }

    /// Remove and free every child of `parent`.
    pub fn clear_children(&mut self, parent: NodeId) {
        let children = match self.nodes.get_mut(parent) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = None;
            }
            self.free_subtree(child);
        }
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.parent(child) {
            self.nodes[parent].children.retain(|&c| c != child);
            self.nodes[child].parent = None;
        }
    }

    /// Free a detached node and everything below it, including listener
    /// side-table entries.
    fn free_subtree(&mut self, root: NodeId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(id) {
                stack.extend(node.children);
            }
            self.listeners.remove(id);
        }
    }

    // =========================================================================
    // Attributes and properties
    // =========================================================================

    pub fn set_attr(&mut self, id: NodeId, key: impl Into<String>, value: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.attrs.insert(key.into(), value.into());
        }
    }

    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.attrs.get(key)).map(String::as_str)
    }

    pub fn remove_attr(&mut self, id: NodeId, key: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.attrs.shift_remove(key);
        }
    }

    /// Set an element property. Properties live on the node but are never
    /// serialized - the counterpart of setting a field on a live element
    /// rather than writing markup.
    pub fn set_prop(&mut self, id: NodeId, key: impl Into<String>, value: Value) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.props.insert(key.into(), value);
        }
    }

    pub fn prop(&self, id: NodeId, key: &str) -> Option<&Value> {
        self.nodes.get(id).and_then(|n| n.props.get(key))
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Register an event listener on a node. Listeners are tracked in a
    /// side-table keyed by node identity and dropped when the node is freed
    /// or rebuilt.
    pub fn add_listener(
        &mut self,
        id: NodeId,
        event_type: impl Into<String>,
        callback: EventCallback,
    ) {
        if !self.nodes.contains_key(id) {
            return;
        }
        let listener = Listener {
            event_type: event_type.into(),
            callback,
        };
        if let Some(list) = self.listeners.get_mut(id) {
            list.push(listener);
        } else {
            let mut list = SmallVec::new();
            list.push(listener);
            self.listeners.insert(id, list);
        }
    }

    /// Drop every listener attached to a node.
    pub fn remove_listeners(&mut self, id: NodeId) {
        self.listeners.remove(id);
    }

    pub fn listener_count(&self, id: NodeId) -> usize {
        self.listeners.get(id).map(|l| l.len()).unwrap_or(0)
    }

    pub(crate) fn listeners_for(&self, id: NodeId, event_type: &str) -> Vec<EventCallback> {
        self.listeners
            .get(id)
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|l| l.event_type == event_type)
                    .map(|l| l.callback.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Serialize a subtree as HTML text. Attribute order follows insertion
    /// order; empty attribute values render bare.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(content) => out.push_str(content),
            NodeKind::Element { tag } => {
                out.push('<');
                out.push_str(tag);
                for (key, value) in &node.attrs {
                    out.push(' ');
                    out.push_str(key);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(value);
                        out.push('"');
                    }
                }
                out.push('>');
                if VOID_TAGS.contains(&tag.as_str()) {
                    return;
                }
                for &child in &node.children {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_serialize() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let text = doc.create_text("Meow");
        doc.append_child(div, text);
        assert_eq!(doc.outer_html(div), "<div>Meow</div>");
    }

    #[test]
    fn attrs_serialize_in_insertion_order() {
        let mut doc = Document::new();
        let span = doc.create_element("span");
        doc.set_attr(span, "id", "malicia");
        doc.set_attr(span, "class", "cat");
        assert_eq!(doc.outer_html(span), "<span id=\"malicia\" class=\"cat\"></span>");

        doc.remove_attr(span, "id");
        assert_eq!(doc.outer_html(span), "<span class=\"cat\"></span>");
    }

    #[test]
    fn bare_attribute_and_void_tag() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        doc.set_attr(input, "disabled", "");
        assert_eq!(doc.outer_html(input), "<input disabled>");
    }

    #[test]
    fn insert_before_and_ordering() {
        let mut doc = Document::new();
        let ul = doc.create_element("ul");
        let a = doc.create_element("li");
        let b = doc.create_element("li");
        let c = doc.create_element("li");
        doc.append_child(ul, a);
        doc.append_child(ul, c);
        doc.insert_before(ul, b, Some(c));
        assert_eq!(doc.children(ul), &[a, b, c]);

        // No reference appends
        let d = doc.create_element("li");
        doc.insert_before(ul, d, None);
        assert_eq!(doc.children(ul), &[a, b, c, d]);
    }

    #[test]
    fn remove_child_frees_subtree_and_listeners() {
        let mut doc = Document::new();
        let ul = doc.create_element("ul");
        let li = doc.create_element("li");
        let text = doc.create_text("Guppy");
        doc.append_child(ul, li);
        doc.append_child(li, text);
        doc.add_listener(li, "click", Rc::new(|_| {}));

        doc.remove_child(ul, li);
        assert!(!doc.contains(li));
        assert!(!doc.contains(text));
        assert_eq!(doc.listener_count(li), 0);
        assert_eq!(doc.child_count(ul), 0);
    }

    #[test]
    fn clear_children() {
        let mut doc = Document::new();
        let ul = doc.create_element("ul");
        for _ in 0..3 {
            let li = doc.create_element("li");
            doc.append_child(ul, li);
        }
        assert_eq!(doc.child_count(ul), 3);
        doc.clear_children(ul);
        assert_eq!(doc.child_count(ul), 0);
        assert_eq!(doc.outer_html(ul), "<ul></ul>");
    }

    #[test]
    fn set_text_content_replaces_children() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_text_content(div, "Meow");
        assert_eq!(doc.outer_html(div), "<div>Meow</div>");
        doc.set_text_content(div, "Purr");
        assert_eq!(doc.outer_html(div), "<div>Purr</div>");
        assert_eq!(doc.child_count(div), 1);
    }

    #[test]
    fn props_are_not_serialized() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        doc.set_prop(input, "value", Value::from("Not in DOM"));
        assert_eq!(doc.outer_html(input), "<input>");
        assert_eq!(doc.prop(input, "value"), Some(&Value::from("Not in DOM")));
    }

    #[test]
    fn append_child_reparents() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let child = doc.create_element("span");
        doc.append_child(a, child);
        doc.append_child(b, child);
        assert_eq!(doc.child_count(a), 0);
        assert_eq!(doc.parent(child), Some(b));
    }
}

//! Fluent element builder
//!
//! Builds a node in one expression, or re-applies onto an existing node so a
//! render callback can patch in place instead of recreating:
//!
//! ```
//! use whisk_dom::{el, Document};
//!
//! let mut doc = Document::new();
//! let title = el("h1").text("Whiskers").build(&mut doc);
//! let app = el("main")
//!     .attr("class", "app")
//!     .child(title)
//!     .build(&mut doc);
//! assert_eq!(doc.outer_html(app), "<main class=\"app\"><h1>Whiskers</h1></main>");
//! ```
//!
//! Rebuilding via [`ElementBuilder::reuse`] clears the node's children and
//! listeners first, then applies the builder's content - the node handle
//! itself survives.

use crate::document::{Document, NodeId};
use crate::events::EventCallback;
use crate::value::Value;

enum Target {
    Tag(String),
    Existing(NodeId),
}

enum Child {
    Node(NodeId),
    Text(String),
}

/// Builder for a single element and its immediate content.
pub struct ElementBuilder {
    target: Target,
    attrs: Vec<(String, Value)>,
    props: Vec<(String, Value)>,
    listeners: Vec<(String, EventCallback)>,
    children: Vec<Child>,
}

/// Start building an element with the given tag.
pub fn el(tag: impl Into<String>) -> ElementBuilder {
    ElementBuilder {
        target: Target::Tag(tag.into()),
        attrs: Vec::new(),
        props: Vec::new(),
        listeners: Vec::new(),
        children: Vec::new(),
    }
}

/// Start building a `div` (the default container).
pub fn div() -> ElementBuilder {
    el("div")
}

impl ElementBuilder {
    /// Re-apply onto an existing node instead of creating a new one.
    pub fn reuse(node: NodeId) -> Self {
        ElementBuilder {
            target: Target::Existing(node),
            attrs: Vec::new(),
            props: Vec::new(),
            listeners: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute. Truthiness rules: `true` writes a bare attribute,
    /// falsy values (`false`, `Null`, `0`) remove the attribute, strings are
    /// written verbatim (the empty string included), anything else is
    /// stringified.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    /// Set an element property (live value on the node, never serialized).
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.push((key.into(), value.into()));
        self
    }

    /// Register an event listener.
    pub fn on(mut self, event_type: impl Into<String>, callback: EventCallback) -> Self {
        self.listeners.push((event_type.into(), callback));
        self
    }

    /// Append a text child.
    pub fn text(mut self, content: impl ToString) -> Self {
        self.children.push(Child::Text(content.to_string()));
        self
    }

    /// Append an existing node as a child.
    pub fn child(mut self, node: NodeId) -> Self {
        self.children.push(Child::Node(node));
        self
    }

    /// Append several existing nodes as children, in order.
    pub fn children(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.children
            .extend(nodes.into_iter().map(Child::Node));
        self
    }

    /// Realize the builder against a document, returning the node handle.
    pub fn build(self, doc: &mut Document) -> NodeId {
        let id = match self.target {
            Target::Tag(tag) => doc.create_element(tag),
            Target::Existing(id) => {
                doc.clear_children(id);
                doc.remove_listeners(id);
                id
            }
        };

        for (key, value) in self.attrs {
            match value {
                Value::Bool(true) => doc.set_attr(id, key, ""),
                Value::Str(s) => doc.set_attr(id, key, s),
                v if v.is_falsy() => doc.remove_attr(id, &key),
                v => doc.set_attr(id, key, v.to_string()),
            }
        }
        for (key, value) in self.props {
            doc.set_prop(id, key, value);
        }
        for (event_type, callback) in self.listeners {
            doc.add_listener(id, event_type, callback);
        }
        for child in self.children {
            match child {
                Child::Node(node) => doc.append_child(id, node),
                Child::Text(content) => {
                    let text = doc.create_text(content);
                    doc.append_child(id, text);
                }
            }
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn default_container() {
        let mut doc = Document::new();
        let app = div().build(&mut doc);
        assert_eq!(doc.outer_html(app), "<div></div>");
    }

    #[test]
    fn optional_props() {
        let mut doc = Document::new();
        let no_props = el("span").text("Lazy cat").build(&mut doc);
        assert_eq!(doc.outer_html(no_props), "<span>Lazy cat</span>");

        let with_props = el("span").attr("id", "malicia").build(&mut doc);
        assert_eq!(doc.outer_html(with_props), "<span id=\"malicia\"></span>");
    }

    #[test]
    fn attr_truthiness() {
        let mut doc = Document::new();
        let node = el("input")
            .attr("disabled", true)
            .attr("alt", "")
            .attr("tabindex", 0)
            .build(&mut doc);
        assert_eq!(doc.outer_html(node), "<input disabled alt>");

        // false removes a previously written attribute on rebuild
        let node = ElementBuilder::reuse(node)
            .attr("disabled", true)
            .attr("disabled", false)
            .build(&mut doc);
        assert_eq!(doc.outer_html(node), "<input alt>");
    }

    #[test]
    fn nested_elements() {
        let mut doc = Document::new();
        let h1 = el("h1").text("Whiskers").build(&mut doc);
        let p = el("p").text("Minimalist reactive view layer").build(&mut doc);
        let app = el("main").child(h1).child(p).build(&mut doc);
        assert_eq!(
            doc.outer_html(app),
            "<main><h1>Whiskers</h1><p>Minimalist reactive view layer</p></main>"
        );
    }

    #[test]
    fn property_is_live_but_not_markup() {
        let mut doc = Document::new();
        let input = el("input").prop("value", "Not in DOM").build(&mut doc);
        assert_eq!(doc.outer_html(input), "<input>");
        assert_eq!(doc.prop(input, "value"), Some(&Value::from("Not in DOM")));
    }

    #[test]
    fn reuse_clears_content_and_listeners() {
        let mut doc = Document::new();
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let node = el("div")
            .text("old")
            .on("click", Rc::new(move |_| counter.set(counter.get() + 1)))
            .build(&mut doc);
        assert_eq!(doc.listener_count(node), 1);

        let rebuilt = ElementBuilder::reuse(node).text("new").build(&mut doc);
        assert_eq!(rebuilt, node);
        assert_eq!(doc.outer_html(node), "<div>new</div>");
        assert_eq!(doc.listener_count(node), 0);
    }

    #[test]
    fn children_in_order() {
        let mut doc = Document::new();
        let items: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|s| el("li").text(s).build(&mut doc))
            .collect();
        let ul = el("ul").children(items).build(&mut doc);
        assert_eq!(doc.outer_html(ul), "<ul><li>a</li><li>b</li><li>c</li></ul>");
    }
}

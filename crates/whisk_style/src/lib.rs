//! Whisk stylesheet generator
//!
//! Turns a nested style definition into CSS text, and optionally into a
//! `<style>` node. A [`StyleSheet`] is an insertion-ordered list of
//! `property: value` declarations and nested `selector { .. }` blocks; the
//! generator is a pure tree-to-text transform with no state.
//!
//! ```
//! use whisk_style::{style_text, StyleSheet};
//!
//! let css = style_text(
//!     &StyleSheet::new().nested(
//!         "body",
//!         StyleSheet::new().prop("margin", 0).prop("padding", "12px"),
//!     ),
//! );
//! assert_eq!(css, "body {\n    margin: 0;\n    padding: 12px;\n}");
//! ```

use std::fmt;

use whisk_dom::{Document, NodeId};

/// A declaration value or a nested rule block.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Text(String),
    Number(f64),
    Nested(StyleSheet),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Text(s) => f.write_str(s),
            StyleValue::Number(n) => write!(f, "{n}"),
            StyleValue::Nested(_) => Ok(()),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Number(n as f64)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<StyleSheet> for StyleValue {
    fn from(sheet: StyleSheet) -> Self {
        StyleValue::Nested(sheet)
    }
}

/// A nested style definition: declarations and blocks in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    entries: Vec<(String, StyleValue)>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `property: value` declaration.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Add a nested `selector { .. }` block.
    pub fn nested(mut self, selector: impl Into<String>, sheet: StyleSheet) -> Self {
        self.entries
            .push((selector.into(), StyleValue::Nested(sheet)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Render a style definition as CSS text.
///
/// Four spaces of indentation per nesting level; a blank line separates a
/// block from whatever precedes it; trailing whitespace is trimmed at every
/// level.
pub fn style_text(sheet: &StyleSheet) -> String {
    block_text(sheet, 0)
}

fn block_text(sheet: &StyleSheet, depth: usize) -> String {
    let indent = "    ".repeat(depth);
    let mut style = String::new();
    for (key, value) in &sheet.entries {
        match value {
            StyleValue::Nested(inner) => {
                if !style.is_empty() {
                    style.push_str("\n\n");
                }
                style.push_str(&indent);
                style.push_str(key);
                style.push_str(" {");
                style.push_str(&block_text(inner, depth + 1));
                style.push('\n');
                style.push_str(&indent);
                style.push('}');
            }
            scalar => {
                style.push('\n');
                style.push_str(&indent);
                style.push_str(key);
                style.push_str(": ");
                style.push_str(&scalar.to_string());
                style.push(';');
            }
        }
    }
    style.trim_end().to_string()
}

/// Build a `<style>` node holding the generated CSS.
pub fn render_style(doc: &mut Document, sheet: &StyleSheet) -> NodeId {
    render_style_text(doc, &style_text(sheet))
}

/// Build a `<style>` node from already-written CSS text.
pub fn render_style_text(doc: &mut Document, css: &str) -> NodeId {
    let style = doc.create_element("style");
    let text = doc.create_text(css);
    doc.append_child(style, text);
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_style() {
        let sheet = StyleSheet::new().nested(
            "body",
            StyleSheet::new()
                .prop("margin", 0)
                .prop("padding", "12px")
                .nested(
                    "#app",
                    StyleSheet::new().prop("background-color", "#123456"),
                ),
        );

        assert_eq!(
            style_text(&sheet),
            "body {\n    margin: 0;\n    padding: 12px;\n\n    #app {\n        background-color: #123456;\n    }\n}"
        );
    }

    #[test]
    fn sibling_blocks_are_separated_by_a_blank_line() {
        let sheet = StyleSheet::new()
            .nested("h1", StyleSheet::new().prop("color", "red"))
            .nested("p", StyleSheet::new().prop("color", "blue"));

        assert_eq!(
            style_text(&sheet),
            "h1 {\n    color: red;\n}\n\np {\n    color: blue;\n}"
        );
    }

    #[test]
    fn numbers_format_without_trailing_zeroes() {
        let sheet =
            StyleSheet::new().nested("div", StyleSheet::new().prop("opacity", 0.5).prop("z-index", 10));
        assert_eq!(
            style_text(&sheet),
            "div {\n    opacity: 0.5;\n    z-index: 10;\n}"
        );
    }

    #[test]
    fn empty_block_renders_bare_braces() {
        let sheet = StyleSheet::new().nested("div", StyleSheet::new());
        assert_eq!(style_text(&sheet), "div {\n}");
    }

    #[test]
    fn style_node() {
        let mut doc = Document::new();
        let sheet = StyleSheet::new().nested("body", StyleSheet::new().prop("margin", 0));
        let style = render_style(&mut doc, &sheet);
        assert_eq!(
            doc.outer_html(style),
            "<style>body {\n    margin: 0;\n}</style>"
        );
    }

    #[test]
    fn raw_css_passthrough() {
        let mut doc = Document::new();
        let style = render_style_text(&mut doc, "body { margin: 0 }");
        assert_eq!(doc.outer_html(style), "<style>body { margin: 0 }</style>");
    }
}

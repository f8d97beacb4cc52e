//! Whisk - a minimal reactive view layer
//!
//! Whisk keeps a tree of UI nodes synchronized with plain data fields:
//!
//! - [`whisk_dom`]: arena-backed document tree, fluent element builders,
//!   event listeners
//! - [`whisk_reactive`]: observable collections, store field bindings, and
//!   incremental list reconciliation
//! - [`whisk_style`]: nested style definitions to CSS text
//!
//! # Example
//!
//! ```rust
//! use whisk::prelude::*;
//!
//! let doc = Document::new().into_shared();
//! let mut store = Store::new("AppData");
//! store.insert("cats", Value::list(["Guppy", "Puss in Boots"]));
//!
//! let list = bind_list(
//!     &mut store,
//!     "cats",
//!     &doc,
//!     |d, _cats, _prev| el("ul").build(d),
//!     |d, name| el("li").text(name).build(d),
//! )
//! .unwrap();
//!
//! store.vec_mut("cats").unwrap().push(Value::from("Garfield"));
//! assert_eq!(
//!     doc.borrow().outer_html(list),
//!     "<ul><li>Guppy</li><li>Puss in Boots</li><li>Garfield</li></ul>"
//! );
//! ```

pub use whisk_dom as dom;
pub use whisk_reactive as reactive;
pub use whisk_style as style;

/// Everything needed for a typical Whisk application.
pub mod prelude {
    pub use whisk_dom::{
        dispatch, div, el, Document, ElementBuilder, Event, EventCallback, NodeId, NodeKind,
        SharedDocument, Value,
    };
    pub use whisk_reactive::{
        bind, bind_list, BindError, ObservableVec, Store, VecChange,
    };
    pub use whisk_style::{render_style, render_style_text, style_text, StyleSheet, StyleValue};
}

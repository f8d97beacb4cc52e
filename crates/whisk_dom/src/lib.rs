//! Whisk document tree
//!
//! This crate provides the view-side foundation for the Whisk reactive
//! layer:
//!
//! - **Document**: arena-backed node tree with cheap copyable handles
//! - **Element builder**: fluent construction and in-place rebuild
//! - **Events**: listener side-table and synchronous dispatch
//! - **Value**: the dynamic value type shared with the reactive layer
//!
//! # Example
//!
//! ```rust
//! use whisk_dom::{el, Document};
//!
//! let mut doc = Document::new();
//! let app = el("main")
//!     .attr("class", "app")
//!     .text("Whiskers")
//!     .build(&mut doc);
//!
//! assert_eq!(doc.outer_html(app), "<main class=\"app\">Whiskers</main>");
//! ```

pub mod builder;
pub mod document;
pub mod events;
pub mod value;

pub use builder::{div, el, ElementBuilder};
pub use document::{Document, NodeId, NodeKind, SharedDocument};
pub use events::{dispatch, Event, EventCallback};
pub use value::Value;

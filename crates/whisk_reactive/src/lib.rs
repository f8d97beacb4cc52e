//! Whisk reactive core
//!
//! This crate provides the reactivity primitives of the Whisk view layer:
//!
//! - **ObservableVec**: an ordered collection reporting every mutation to a
//!   single change callback
//! - **Store + bind**: keyed records whose fields can be tied to render
//!   callbacks, with scalar and sequence strategies picked by value shape
//! - **Reconciler**: mutation-to-child-patch mapping that keeps a wrapper
//!   node's children in step with a bound sequence
//!
//! Updates are single-threaded and synchronous: every field write or
//! sequence mutation patches its UI node inline, before the mutating call
//! returns. There is no batching and no scheduling - N mutations produce N
//! patch passes.
//!
//! # Example
//!
//! ```rust
//! use whisk_dom::{el, Document, Value};
//! use whisk_reactive::{bind_list, Store};
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

pub mod bind;
pub mod error;
mod reconcile;
pub mod sequence;
pub mod store;

pub use bind::{bind, bind_list, ItemRenderFn, RenderFn};
pub use error::{BindError, Result};
pub use sequence::{ChangeCallback, ObservableVec, VecChange};
pub use store::Store;

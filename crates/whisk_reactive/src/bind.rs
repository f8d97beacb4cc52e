//! Reactive field binding
//!
//! [`bind`] ties a store field to a render callback: the current value is
//! rendered once, then the field is swapped for an accessor pair so that
//! every subsequent write re-renders the same UI node in place. Strategy is
//! picked once at bind time on the value's shape - list values get the
//! sequence strategy, everything else the scalar strategy - and only a
//! wholesale reassignment re-evaluates it.
//!
//! ```
//! use whisk_dom::{el, Document, Value};
//! use whisk_reactive::{bind, Store};
//!
//! let doc = Document::new().into_shared();
//! let mut store = Store::new("AppData");
//! store.insert("content", "Meow");
//!
//! let app = bind(&mut store, "content", &doc, |d, value, prev| match prev {
//!     Some(node) => {
//!         d.set_text_content(node, value.to_string());
//!         node
//!     }
//!     None => el("div").text(value).build(d),
//! })
//! .unwrap();
//!
//! store.set("content", "Purr").unwrap();
//! assert_eq!(doc.borrow().outer_html(app), "<div>Purr</div>");
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use whisk_dom::{Document, NodeId, SharedDocument, Value};

use crate::error::Result;
use crate::reconcile;
use crate::sequence::{ObservableVec, VecChange};
use crate::store::{ListBinding, ScalarBinding, Store};

/// Primary render callback: `(document, value, previous_node) -> node`.
///
/// The initial call receives `None`; later calls receive the node returned
/// by the previous render so it can be patched instead of recreated.
pub type RenderFn = dyn FnMut(&mut Document, &Value, Option<NodeId>) -> NodeId;

/// Per-item render callback for sequence fields.
pub type ItemRenderFn = dyn FnMut(&mut Document, &Value) -> NodeId;

pub(crate) type SharedRenderFn = Rc<RefCell<RenderFn>>;
pub(crate) type SharedItemRenderFn = Rc<RefCell<ItemRenderFn>>;

/// Bind a store field to a render callback, returning the rendered node.
///
/// Fails with [`crate::BindError::MissingField`] when the field was never
/// seeded and [`crate::BindError::AlreadyBound`] when a binding is already
/// active; in both cases nothing is installed.
pub fn bind<R>(store: &mut Store, field: &str, doc: &SharedDocument, render: R) -> Result<NodeId>
where
    R: FnMut(&mut Document, &Value, Option<NodeId>) -> NodeId + 'static,
{
    let render: SharedRenderFn = Rc::new(RefCell::new(render));
    bind_impl(store, field, doc, render, None)
}

/// Bind a store field with a per-item render callback for sequence values.
///
/// The primary callback renders only the wrapper node; the per-item callback
/// renders one child per element and the reconciler keeps the wrapper's
/// children in step with every sequence mutation. On a scalar field the
/// per-item callback is ignored and the scalar strategy applies.
pub fn bind_list<R, I>(
    store: &mut Store,
    field: &str,
    doc: &SharedDocument,
    render: R,
    render_item: I,
) -> Result<NodeId>
where
    R: FnMut(&mut Document, &Value, Option<NodeId>) -> NodeId + 'static,
    I: FnMut(&mut Document, &Value) -> NodeId + 'static,
{
    let render: SharedRenderFn = Rc::new(RefCell::new(render));
    let render_item: SharedItemRenderFn = Rc::new(RefCell::new(render_item));
    bind_impl(store, field, doc, render, Some(render_item))
}

fn bind_impl(
    store: &mut Store,
    field: &str,
    doc: &SharedDocument,
    render: SharedRenderFn,
    render_item: Option<SharedItemRenderFn>,
) -> Result<NodeId> {
    let value = store.take_for_binding(field)?;

    if let Value::List(values) = value {
        debug!(field, len = values.len(), "binding sequence field");
        let wrapper = {
            let snapshot = Value::List(values.clone());
            (&mut *render.borrow_mut())(&mut doc.borrow_mut(), &snapshot, None)
        };

        let mut seq = ObservableVec::new(values);
        register_list_callback(&mut seq, doc, wrapper, render.clone(), render_item.clone());
        if let Some(item) = &render_item {
            reconcile::apply(
                &mut doc.borrow_mut(),
                wrapper,
                &mut *item.borrow_mut(),
                VecChange::Reset,
                &seq,
            );
        }

        store.install_list(
            field,
            ListBinding {
                seq,
                wrapper,
                doc: doc.clone(),
                render,
                render_item,
            },
        );
        Ok(wrapper)
    } else {
        debug!(field, "binding scalar field");
        let node = (&mut *render.borrow_mut())(&mut doc.borrow_mut(), &value, None);
        store.install_scalar(
            field,
            ScalarBinding {
                value,
                node,
                doc: doc.clone(),
                render,
            },
        );
        Ok(node)
    }
}

/// Register the change callback appropriate for a sequence binding: the
/// incremental reconciler when a per-item renderer exists, otherwise a
/// callback that hands the whole sequence back to the primary renderer.
pub(crate) fn register_list_callback(
    seq: &mut ObservableVec<Value>,
    doc: &SharedDocument,
    wrapper: NodeId,
    render: SharedRenderFn,
    render_item: Option<SharedItemRenderFn>,
) {
    match render_item {
        Some(item) => {
            let doc = doc.clone();
            seq.set_on_change(move |change, items| {
                reconcile::apply(
                    &mut doc.borrow_mut(),
                    wrapper,
                    &mut *item.borrow_mut(),
                    change,
                    items,
                );
            });
        }
        None => {
            let doc = doc.clone();
            seq.set_on_change(move |_change, items| {
                let snapshot = Value::List(items.to_vec());
                (&mut *render.borrow_mut())(&mut doc.borrow_mut(), &snapshot, None);
            });
        }
    }
}

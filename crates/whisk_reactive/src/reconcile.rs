//! Incremental list reconciliation
//!
//! Maps each sequence mutation onto the minimal structural change against a
//! wrapper node's children, using the per-item render callback for anything
//! newly inserted. Rendered item nodes are opaque: nothing here recurses
//! into them, and removal frees the whole item subtree.
//!
//! Reorders (`Sort`, `Reverse`) and `Reset` rebuild the wrapper's children
//! from the sequence's current order - a reconciliation pass - since the
//! mutation record carries no per-element movement information.

use tracing::trace;
use whisk_dom::{Document, NodeId, Value};

use crate::bind::ItemRenderFn;
use crate::sequence::VecChange;

/// Apply one mutation to a wrapper's children.
pub(crate) fn apply(
    doc: &mut Document,
    wrapper: NodeId,
    render_item: &mut ItemRenderFn,
    change: VecChange<'_, Value>,
    items: &[Value],
) {
    trace!(kind = change.kind(), "reconciling wrapper children");
    match change {
        VecChange::Push(added) => {
            for item in added {
                let node = render_item(doc, item);
                doc.append_child(wrapper, node);
            }
        }
        VecChange::Pop => {
            if let Some(last) = doc.last_child(wrapper) {
                doc.remove_child(wrapper, last);
            }
        }
        VecChange::PopFront => {
            if let Some(first) = doc.first_child(wrapper) {
                doc.remove_child(wrapper, first);
            }
        }
        VecChange::Splice {
            index,
            removed,
            inserted,
        } => {
            for _ in 0..removed {
                match doc.child_at(wrapper, index) {
                    Some(child) => doc.remove_child(wrapper, child),
                    None => break,
                }
            }
            if !inserted.is_empty() {
                // Pivot is whatever now sits at the splice position; absent
                // pivot means insertion at the end.
                let pivot = doc.child_at(wrapper, index);
                for item in inserted {
                    let node = render_item(doc, item);
                    doc.insert_before(wrapper, node, pivot);
                }
            }
        }
        VecChange::PushFront(added) => {
            // Insert every new node before the child that was first prior to
            // this batch, so the batch keeps its relative order.
            let pivot = doc.first_child(wrapper);
            for item in added {
                let node = render_item(doc, item);
                doc.insert_before(wrapper, node, pivot);
            }
        }
        VecChange::Sort | VecChange::Reverse | VecChange::Reset => {
            doc.clear_children(wrapper);
            for item in items {
                let node = render_item(doc, item);
                doc.append_child(wrapper, node);
            }
        }
    }
}

//! Event listeners and dispatch
//!
//! Listeners are plain callbacks stored in the document's side-table, keyed
//! by node identity (inserted on attach, dropped on detach or rebuild).
//! Dispatch clones the matching callbacks out of a short borrow and invokes
//! them after the borrow is released, so a handler is free to re-enter the
//! document or mutate a bound store.
//!
//! Uses `Rc` since the view layer is single-threaded.

use std::rc::Rc;

use tracing::trace;

use crate::document::{NodeId, SharedDocument};
use crate::value::Value;

/// Callback invoked when an event reaches a node it is registered on.
pub type EventCallback = Rc<dyn Fn(&Event)>;

/// An event delivered to listeners.
#[derive(Debug, Clone)]
pub struct Event {
    /// Event type, e.g. `"click"` or `"input"`
    pub event_type: String,
    /// The node the event was dispatched on
    pub target: NodeId,
    /// For `input` events, the target's `value` (or `checked`) property
    pub value: Option<Value>,
}

/// A registered listener; lives in the document's side-table.
pub(crate) struct Listener {
    pub(crate) event_type: String,
    pub(crate) callback: EventCallback,
}

/// Dispatch an event to every listener of `event_type` registered on `node`.
///
/// For `input` events the node's `value` property (falling back to `checked`)
/// rides along on the event, so form handlers get the current value without
/// reaching back into the tree.
pub fn dispatch(doc: &SharedDocument, node: NodeId, event_type: &str) {
    let (callbacks, value) = {
        let d = doc.borrow();
        let callbacks = d.listeners_for(node, event_type);
        let value = if event_type == "input" {
            d.prop(node, "value")
                .or_else(|| d.prop(node, "checked"))
                .cloned()
        } else {
            None
        };
        (callbacks, value)
    };
    if callbacks.is_empty() {
        return;
    }
    trace!(event_type, listeners = callbacks.len(), "dispatching event");
    let event = Event {
        event_type: event_type.to_string(),
        target: node,
        value,
    };
    for callback in callbacks {
        callback(&event);
    }
}

//! Keyed record with reactive fields
//!
//! A [`Store`] is a plain bag of named [`Value`]s. Binding a field (via
//! [`crate::bind`]) swaps the plain slot for an accessor pair: reads return
//! the private current value, writes run the field's strategy - scalar
//! re-render, or sequence replacement with validation. Unbound fields behave
//! like ordinary record fields.
//!
//! The store never owns UI nodes; it holds the handles its bindings patch.

use rustc_hash::FxHashMap;

use tracing::{debug, warn};
use whisk_dom::{NodeId, SharedDocument, Value};

use crate::bind::{register_list_callback, SharedItemRenderFn, SharedRenderFn};
use crate::error::{BindError, Result};
use crate::reconcile;
use crate::sequence::{ObservableVec, VecChange};

/// Active scalar binding: private value plus the node the renderer returned
/// last.
pub(crate) struct ScalarBinding {
    pub(crate) value: Value,
    pub(crate) node: NodeId,
    pub(crate) doc: SharedDocument,
    pub(crate) render: SharedRenderFn,
}

/// Active sequence binding: the live observable vec and the wrapper node
/// whose children mirror it.
pub(crate) struct ListBinding {
    pub(crate) seq: ObservableVec<Value>,
    pub(crate) wrapper: NodeId,
    pub(crate) doc: SharedDocument,
    pub(crate) render: SharedRenderFn,
    pub(crate) render_item: Option<SharedItemRenderFn>,
}

enum Field {
    Plain(Value),
    Scalar(ScalarBinding),
    List(ListBinding),
}

/// A keyed record whose fields may become reactive.
pub struct Store {
    name: String,
    fields: FxHashMap<String, Field>,
}

impl Store {
    /// Create an empty store. The name identifies the store in error
    /// messages.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seed an unbound field with a value. Bound fields must be written
    /// through [`Store::set`]; seeding one is ignored.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        match self.fields.get(&field) {
            Some(Field::Plain(_)) | None => {
                self.fields.insert(field, Field::Plain(value.into()));
            }
            Some(_) => {
                warn!(field = %field, "insert ignored: field is bound, use set instead");
            }
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_bound(&self, field: &str) -> bool {
        matches!(
            self.fields.get(field),
            Some(Field::Scalar(_)) | Some(Field::List(_))
        )
    }

    /// Snapshot of a field's current value. Bound scalar fields return the
    /// private current value; bound sequence fields a copy of the live
    /// contents.
    pub fn get(&self, field: &str) -> Option<Value> {
        match self.fields.get(field)? {
            Field::Plain(value) => Some(value.clone()),
            Field::Scalar(binding) => Some(binding.value.clone()),
            Field::List(binding) => Some(Value::List(binding.seq.to_vec())),
        }
    }

    /// The live observable sequence of a bound sequence field.
    pub fn vec(&self, field: &str) -> Option<&ObservableVec<Value>> {
        match self.fields.get(field)? {
            Field::List(binding) => Some(&binding.seq),
            _ => None,
        }
    }

    /// Mutable access to the live observable sequence of a bound sequence
    /// field. Mutations patch the bound wrapper inline, before the call
    /// returns.
    pub fn vec_mut(&mut self, field: &str) -> Option<&mut ObservableVec<Value>> {
        match self.fields.get_mut(field)? {
            Field::List(binding) => Some(&mut binding.seq),
            _ => None,
        }
    }

    /// Write a field. Unbound (or missing) fields are plain assignments.
    /// A bound scalar field stores the value and re-renders its node in
    /// place. A bound sequence field requires a list value - anything else
    /// is rejected with [`BindError::NotASequence`] before any state
    /// changes - and is then replaced wholesale: fresh observable vec, the
    /// appropriate callback re-registered, and (with a per-item renderer)
    /// the wrapper rebuilt from scratch.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        match self.fields.get_mut(field) {
            None => {
                self.fields.insert(field.to_string(), Field::Plain(value));
                Ok(())
            }
            Some(Field::Plain(current)) => {
                *current = value;
                Ok(())
            }
            Some(Field::Scalar(binding)) => {
                binding.value = value;
                let previous = binding.node;
                let node = (&mut *binding.render.borrow_mut())(
                    &mut binding.doc.borrow_mut(),
                    &binding.value,
                    Some(previous),
                );
                binding.node = node;
                Ok(())
            }
            Some(Field::List(binding)) => {
                let Value::List(values) = value else {
                    return Err(BindError::NotASequence {
                        field: field.to_string(),
                    });
                };
                debug!(field, len = values.len(), "sequence field reassigned");
                let mut seq = ObservableVec::new(values);
                register_list_callback(
                    &mut seq,
                    &binding.doc,
                    binding.wrapper,
                    binding.render.clone(),
                    binding.render_item.clone(),
                );
                if let Some(item) = &binding.render_item {
                    reconcile::apply(
                        &mut binding.doc.borrow_mut(),
                        binding.wrapper,
                        &mut *item.borrow_mut(),
                        VecChange::Reset,
                        &seq,
                    );
                }
                binding.seq = seq;
                Ok(())
            }
        }
    }

    /// Remove and return a field's plain value so a binding can take over
    /// the slot. Enforces the bind preconditions.
    pub(crate) fn take_for_binding(&mut self, field: &str) -> Result<Value> {
        match self.fields.remove(field) {
            None => Err(BindError::MissingField {
                field: field.to_string(),
                store: self.name.clone(),
            }),
            Some(Field::Plain(value)) => Ok(value),
            Some(bound) => {
                self.fields.insert(field.to_string(), bound);
                Err(BindError::AlreadyBound {
                    field: field.to_string(),
                })
            }
        }
    }

    pub(crate) fn install_scalar(&mut self, field: &str, binding: ScalarBinding) {
        self.fields
            .insert(field.to_string(), Field::Scalar(binding));
    }

    pub(crate) fn install_list(&mut self, field: &str, binding: ListBinding) {
        self.fields.insert(field.to_string(), Field::List(binding));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_behave_like_a_record() {
        let mut store = Store::new("TestData");
        store.insert("count", 0);
        assert_eq!(store.get("count"), Some(Value::Int(0)));
        assert!(store.contains("count"));
        assert!(!store.is_bound("count"));

        store.set("count", 42).unwrap();
        assert_eq!(store.get("count"), Some(Value::Int(42)));

        // Writing a missing field creates it
        store.set("fresh", "hi").unwrap();
        assert_eq!(store.get("fresh"), Some(Value::from("hi")));
    }

    #[test]
    fn unbound_list_field_accepts_any_value() {
        let mut store = Store::new("TestData");
        store.insert("items", Value::list([1, 2]));
        store.set("items", Value::Null).unwrap();
        assert_eq!(store.get("items"), Some(Value::Null));
    }

    #[test]
    fn take_for_binding_preconditions() {
        let mut store = Store::new("TestData");
        assert!(matches!(
            store.take_for_binding("missing"),
            Err(BindError::MissingField { .. })
        ));

        store.insert("content", "Meow");
        assert_eq!(
            store.take_for_binding("content").unwrap(),
            Value::from("Meow")
        );
    }

    #[test]
    fn missing_field_error_names_field_and_store() {
        let mut store = Store::new("AppData");
        let err = store.take_for_binding("unknown").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknown"));
        assert!(message.contains("AppData"));
    }

    #[test]
    fn vec_accessors_require_a_bound_list() {
        let mut store = Store::new("TestData");
        store.insert("items", Value::list([1]));
        assert!(store.vec("items").is_none());
        assert!(store.vec_mut("items").is_none());
    }
}

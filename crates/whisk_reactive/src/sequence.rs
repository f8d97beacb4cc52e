//! Observable ordered collection
//!
//! [`ObservableVec`] owns a plain `Vec<T>` and re-exposes its mutating
//! operations; after each mutation has taken effect it invokes the single
//! registered change callback with a [`VecChange`] describing what happened
//! plus the current contents. Exactly one callback fires per public mutation
//! (zero when none is registered).
//!
//! The change record borrows the affected elements in place, is consumed
//! synchronously, and is never stored.

use std::fmt;
use std::ops::Deref;

use tracing::trace;

/// What a mutation did, with its positional arguments.
///
/// Slices borrow the backing vec after the mutation: `Push` and `PushFront`
/// carry the newly added tail/head, `Splice` the elements just inserted.
#[derive(Debug, PartialEq)]
pub enum VecChange<'a, T> {
    /// Elements added at the end
    Push(&'a [T]),
    /// Last element dropped (reported even when the vec was already empty)
    Pop,
    /// First element dropped (reported even when the vec was already empty)
    PopFront,
    /// Elements added at the start, in the given order
    PushFront(&'a [T]),
    /// `removed` elements replaced by `inserted` starting at `index`
    Splice {
        index: usize,
        removed: usize,
        inserted: &'a [T],
    },
    /// In-place reorder by comparison
    Sort,
    /// In-place reversal
    Reverse,
    /// Wholesale rebuild request (no incremental information)
    Reset,
}

impl<T> VecChange<'_, T> {
    /// Short name of the mutation kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            VecChange::Push(_) => "push",
            VecChange::Pop => "pop",
            VecChange::PopFront => "pop_front",
            VecChange::PushFront(_) => "push_front",
            VecChange::Splice { .. } => "splice",
            VecChange::Sort => "sort",
            VecChange::Reverse => "reverse",
            VecChange::Reset => "reset",
        }
    }
}

/// Change callback: the mutation record plus the contents after it applied.
pub type ChangeCallback<T> = Box<dyn FnMut(VecChange<'_, T>, &[T])>;

/// An ordered, index-addressable collection that reports every mutation to a
/// single registered callback.
///
/// Composition, not inheritance: the backing vec is private and only the
/// operations below mutate it, so no change can slip past the callback.
/// Reads go through `Deref<Target = [T]>`.
#[derive(Default)]
pub struct ObservableVec<T> {
    items: Vec<T>,
    on_change: Option<ChangeCallback<T>>,
}

impl<T> ObservableVec<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            on_change: None,
        }
    }

    /// Replace the registered change callback (at most one at a time; last
    /// write wins).
    pub fn set_on_change<F>(&mut self, callback: F)
    where
        F: FnMut(VecChange<'_, T>, &[T]) + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    /// Drop the registered callback; further mutations report nothing.
    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    pub fn has_on_change(&self) -> bool {
        self.on_change.is_some()
    }

    /// Append one element at the end.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        let start = self.items.len() - 1;
        if let Some(cb) = self.on_change.as_mut() {
            trace!(kind = "push", "sequence mutated");
            cb(VecChange::Push(&self.items[start..]), &self.items);
        }
    }

    /// Append several elements at the end, reported as a single change.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        let start = self.items.len();
        self.items.extend(items);
        if let Some(cb) = self.on_change.as_mut() {
            trace!(kind = "push", count = self.items.len() - start, "sequence mutated");
            cb(VecChange::Push(&self.items[start..]), &self.items);
        }
    }

    /// Drop and return the last element. The change is reported even when
    /// the vec is empty, so a bound view still gets its (no-op) pass.
    pub fn pop(&mut self) -> Option<T> {
        let out = self.items.pop();
        if let Some(cb) = self.on_change.as_mut() {
            trace!(kind = "pop", "sequence mutated");
            cb(VecChange::Pop, &self.items);
        }
        out
    }

    /// Drop and return the first element; a safe no-op on an empty vec, with
    /// the change still reported.
    pub fn pop_front(&mut self) -> Option<T> {
        let out = if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        };
        if let Some(cb) = self.on_change.as_mut() {
            trace!(kind = "pop_front", "sequence mutated");
            cb(VecChange::PopFront, &self.items);
        }
        out
    }

    /// Insert one element at the start.
    pub fn push_front(&mut self, item: T) {
        self.items.insert(0, item);
        if let Some(cb) = self.on_change.as_mut() {
            trace!(kind = "push_front", "sequence mutated");
            cb(VecChange::PushFront(&self.items[..1]), &self.items);
        }
    }

    /// Insert several elements at the start, keeping their relative order,
    /// reported as a single change.
    pub fn prepend(&mut self, items: Vec<T>) {
        let count = items.len();
        self.items.splice(0..0, items);
        if let Some(cb) = self.on_change.as_mut() {
            trace!(kind = "push_front", count, "sequence mutated");
            cb(VecChange::PushFront(&self.items[..count]), &self.items);
        }
    }

    /// Remove up to `remove_count` elements starting at `index` and insert
    /// `items` in their place. Out-of-range arguments are clamped the way a
    /// splice conventionally clamps. Returns the removed elements.
    pub fn splice(&mut self, index: usize, remove_count: usize, items: Vec<T>) -> Vec<T> {
        let index = index.min(self.items.len());
        let removed = remove_count.min(self.items.len() - index);
        let inserted = items.len();
        let out: Vec<T> = self.items.splice(index..index + removed, items).collect();
        if let Some(cb) = self.on_change.as_mut() {
            trace!(kind = "splice", index, removed, inserted, "sequence mutated");
            cb(
                VecChange::Splice {
                    index,
                    removed,
                    inserted: &self.items[index..index + inserted],
                },
                &self.items,
            );
        }
        out
    }

    /// Sort in place by a comparator.
    pub fn sort_by(&mut self, compare: impl FnMut(&T, &T) -> std::cmp::Ordering) {
        self.items.sort_by(compare);
        if let Some(cb) = self.on_change.as_mut() {
            trace!(kind = "sort", "sequence mutated");
            cb(VecChange::Sort, &self.items);
        }
    }

    /// Reverse in place.
    pub fn reverse(&mut self) {
        self.items.reverse();
        if let Some(cb) = self.on_change.as_mut() {
            trace!(kind = "reverse", "sequence mutated");
            cb(VecChange::Reverse, &self.items);
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }
}

impl<T: Ord> ObservableVec<T> {
    /// Sort in place by the natural order.
    pub fn sort(&mut self) {
        self.items.sort();
        if let Some(cb) = self.on_change.as_mut() {
            trace!(kind = "sort", "sequence mutated");
            cb(VecChange::Sort, &self.items);
        }
    }
}

impl<T> Deref for ObservableVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for ObservableVec<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

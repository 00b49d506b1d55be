//! Per-node sharing table
//!
//! Every stack value owns a table from element value to sub-stack. `push`
//! records exactly one entry in the new node's table: the pushed value mapped
//! to the stack it was pushed onto. `pop` removes the popped value's entry
//! from the table of the stack it uncovers.
//!
//! The table is a shared handle: cloning a `Stack` (including the clone that
//! `push` stores in the parent's table) clones the handle, not the map. A
//! removal made through one copy is therefore seen through every copy.
//!
//! Borrows of the inner map never escape these methods, so user callbacks
//! that run during dispatch can freely touch tables again.

use crate::stack::Stack;
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

pub struct SharingTable<T> {
    entries: Rc<RefCell<HashMap<T, Stack<T>>>>,
}

impl<T> SharingTable<T> {
    pub(crate) fn new() -> Self {
        SharingTable {
            entries: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// True if both handles refer to the same underlying map
    pub fn ptr_eq(&self, other: &SharingTable<T>) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }

    /// Move every entry's stack into `out` if this is the last handle
    ///
    /// Used by `Stack::drop` to tear tables down without recursing.
    pub(crate) fn drain_if_unique(&mut self, out: &mut Vec<Stack<T>>) {
        if let Some(cell) = Rc::get_mut(&mut self.entries) {
            out.extend(cell.get_mut().drain().map(|(_, stack)| stack));
        }
    }
}

impl<T: Eq + Hash + Clone> SharingTable<T> {
    pub(crate) fn insert(&self, key: T, stack: Stack<T>) {
        self.entries.borrow_mut().insert(key, stack);
    }

    /// Returns whether an entry was present
    pub(crate) fn remove(&self, key: &T) -> bool {
        self.entries.borrow_mut().remove(key).is_some()
    }

    pub fn get(&self, key: &T) -> Option<Stack<T>> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn contains_key(&self, key: &T) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn keys(&self) -> Vec<T> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl<T> Clone for SharingTable<T> {
    fn clone(&self) -> Self {
        SharingTable {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<T> Default for SharingTable<T> {
    fn default() -> Self {
        SharingTable::new()
    }
}

impl<T> std::fmt::Debug for SharingTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharingTable")
            .field("len", &self.len())
            .finish()
    }
}

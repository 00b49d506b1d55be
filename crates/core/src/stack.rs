//! Persistent stack
//!
//! A `Stack<T>` is either `Empty` or a node holding one element over the
//! stack beneath it. Every operation goes through a single dispatch primitive
//! (`dispatch`) that picks the empty or the node continuation, and returns a
//! new value: `push` and `pop_or_else` never change the stack they are called
//! on.
//!
//! ```
//! use pstack_core::Stack;
//!
//! let hello = Stack::new_empty().push("Hello".to_string());
//! let world = hello.push("World".to_string());
//! assert_eq!(world.render(), "[WorldHello]");
//! assert_eq!(hello.render(), "[Hello]");
//!
//! let popped = world.pop_or_else(|| "empty").found().unwrap();
//! assert_eq!(popped.render(), "[Hello]");
//! ```
//!
//! # Sharing table
//!
//! Each stack value also carries a [`SharingTable`]. `push(elem)` gives the
//! new node a fresh table holding the single entry `elem -> self`, and
//! `pop_or_else` removes the popped value's entry from the table of the stack
//! it returns. No other entries are ever written, so two nodes never actually
//! share a sub-stack through their tables.
//!
//! [`Stack::sharing_entry`] exposes the table for inspection. A key with no
//! entry yields a *vacant* stack: a stand-in with no variant at all.
//! Vacant is not `Empty`. Any dispatching operation on it (`is_empty`,
//! `render`, `read_top_or_else`, `pop_or_else`, `dispatch`) panics, since
//! reaching it means internal bookkeeping was read in a way the stack
//! operations themselves never do. Only [`Stack::is_vacant`] is safe on it.
//!
//! # Threading
//!
//! Stacks and their tables are reference counted without atomics, so a
//! `Stack<T>` is neither `Send` nor `Sync`.

use crate::or_else::OrElse;
use crate::render::Render;
use crate::table::SharingTable;
use std::hash::Hash;
use std::rc::Rc;
use tracing::{debug, trace};

/// Persistent LIFO stack
pub struct Stack<T> {
    repr: Repr<T>,
    table: SharingTable<T>,
}

enum Repr<T> {
    Empty,
    Node(Rc<Node<T>>),
    /// Missing sharing-table entry; has no dispatch
    Vacant,
}

struct Node<T> {
    value: T,
    rest: Stack<T>,
}

impl<T> Stack<T> {
    /// Create an empty stack with an empty sharing table
    pub fn new_empty() -> Self {
        Stack {
            repr: Repr::Empty,
            table: SharingTable::new(),
        }
    }

    fn vacant() -> Self {
        Stack {
            repr: Repr::Vacant,
            table: SharingTable::new(),
        }
    }

    /// Two-way variant dispatch
    ///
    /// Calls `on_empty` for an empty stack, or `on_node` with the top element
    /// and the stack beneath it.
    ///
    /// # Panics
    /// If this is a vacant sharing-table entry.
    pub fn dispatch<'a, R>(
        &'a self,
        on_empty: impl FnOnce() -> R,
        on_node: impl FnOnce(&'a T, &'a Stack<T>) -> R,
    ) -> R {
        self.dispatch_in("dispatch", on_empty, on_node)
    }

    /// Three-way dispatch separating the bottom-most node
    ///
    /// `on_last` receives a node whose rest is empty; `on_node` receives every
    /// other node.
    ///
    /// # Panics
    /// If this is a vacant sharing-table entry.
    pub fn dispatch_last<'a, R>(
        &'a self,
        on_empty: impl FnOnce() -> R,
        on_last: impl FnOnce(&'a T) -> R,
        on_node: impl FnOnce(&'a T, &'a Stack<T>) -> R,
    ) -> R {
        self.dispatch_last_in("dispatch_last", on_empty, on_last, on_node)
    }

    fn dispatch_in<'a, R>(
        &'a self,
        op: &'static str,
        on_empty: impl FnOnce() -> R,
        on_node: impl FnOnce(&'a T, &'a Stack<T>) -> R,
    ) -> R {
        match &self.repr {
            Repr::Empty => on_empty(),
            Repr::Node(node) => on_node(&node.value, &node.rest),
            Repr::Vacant => panic!(
                "{}: vacant sharing-table entry has no variant to dispatch on",
                op
            ),
        }
    }

    fn dispatch_last_in<'a, R>(
        &'a self,
        op: &'static str,
        on_empty: impl FnOnce() -> R,
        on_last: impl FnOnce(&'a T) -> R,
        on_node: impl FnOnce(&'a T, &'a Stack<T>) -> R,
    ) -> R {
        self.dispatch_in(op, on_empty, |value, rest| {
            if rest.is_empty_in(op) {
                on_last(value)
            } else {
                on_node(value, rest)
            }
        })
    }

    /// True for the empty stack, false for a node
    ///
    /// # Panics
    /// If this is a vacant sharing-table entry.
    pub fn is_empty(&self) -> bool {
        self.is_empty_in("is_empty")
    }

    fn is_empty_in(&self, op: &'static str) -> bool {
        self.dispatch_in(op, || true, |_, _| false)
    }

    /// True if this value came from a missing sharing-table key
    ///
    /// Structural check only; never dispatches and never panics.
    pub fn is_vacant(&self) -> bool {
        matches!(self.repr, Repr::Vacant)
    }

    /// Elements from top to bottom
    ///
    /// Walks the raw structure without dispatching, so it stops quietly at
    /// the bottom of a stack that was pushed onto a vacant value.
    pub fn items(&self) -> impl Iterator<Item = &T> + '_ {
        let mut current = self;
        std::iter::from_fn(move || match &current.repr {
            Repr::Node(node) => {
                current = &node.rest;
                Some(&node.value)
            }
            Repr::Empty | Repr::Vacant => None,
        })
    }

    /// Number of elements; walks the whole stack
    pub fn len(&self) -> usize {
        self.items().count()
    }

    /// This value's sharing table
    ///
    /// Internals-inspection affordance. The handle aliases the live table, so
    /// later pops through other copies of this stack show up here.
    pub fn sharing_table(&self) -> &SharingTable<T> {
        &self.table
    }

    /// Detach everything this handle owns alone, queueing child stacks
    ///
    /// Afterwards the handle is `Empty` and dropping it is shallow.
    fn release_into(&mut self, pending: &mut Vec<Stack<T>>) {
        self.table.drain_if_unique(pending);
        if let Repr::Node(node) = std::mem::replace(&mut self.repr, Repr::Empty) {
            // A shared node only loses one reference here
            if let Ok(Node { rest, .. }) = Rc::try_unwrap(node) {
                pending.push(rest);
            }
        }
    }
}

impl<T: Eq + Hash + Clone> Stack<T> {
    /// Push `elem`, returning the new stack
    ///
    /// The new node's sharing table holds exactly one entry: `elem -> self`.
    /// Pushing onto a vacant value is structurally allowed; the result's
    /// rest is still vacant and will panic once something dispatches on it.
    #[must_use]
    pub fn push(&self, elem: T) -> Stack<T> {
        let table = SharingTable::new();
        table.insert(elem.clone(), self.clone());
        trace!("push: new node with a single sharing-table entry");
        Stack {
            repr: Repr::Node(Rc::new(Node {
                value: elem,
                rest: self.clone(),
            })),
            table,
        }
    }

    /// The top element, or whatever `on_empty` returns
    ///
    /// # Panics
    /// If this is a vacant sharing-table entry.
    pub fn read_top_or_else<R>(&self, on_empty: impl FnOnce() -> R) -> OrElse<T, R> {
        self.dispatch_in(
            "read_top_or_else",
            || OrElse::Fallback(on_empty()),
            |value, _| OrElse::Found(value.clone()),
        )
    }

    /// The stack beneath the top element, or whatever `on_empty` returns
    ///
    /// Removes the popped value's entry from the returned stack's sharing
    /// table. The returned stack's elements are untouched.
    ///
    /// # Panics
    /// If this is a vacant sharing-table entry.
    pub fn pop_or_else<R>(&self, on_empty: impl FnOnce() -> R) -> OrElse<Stack<T>, R> {
        self.dispatch_in(
            "pop_or_else",
            || OrElse::Fallback(on_empty()),
            |value, rest| {
                let pruned = rest.table.remove(value);
                debug!(pruned, "pop: removed popped value from uncovered sharing table");
                OrElse::Found(rest.clone())
            },
        )
    }

    /// Look up `key` in this value's sharing table
    ///
    /// Internals-inspection affordance, not part of the stack discipline.
    /// A missing key yields a vacant stack; see the module docs.
    pub fn sharing_entry(&self, key: &T) -> Stack<T> {
        self.table.get(key).unwrap_or_else(Stack::vacant)
    }

    /// Keys currently present in this value's sharing table
    pub fn sharing_keys(&self) -> Vec<T> {
        self.table.keys()
    }
}

impl<T: Render> Stack<T> {
    /// Text form: `[` then every element from top to bottom, then `]`
    ///
    /// Elements are concatenated with no separator, so pushing `Hello` then
    /// `World` renders as `[WorldHello]` and the empty stack as `[]`.
    ///
    /// # Panics
    /// If this is a vacant sharing-table entry.
    pub fn render(&self) -> String {
        let mut out = String::from("[");
        let mut current = self;
        loop {
            // None: empty; Some((value, None)): bottom node; otherwise inner node
            let step = current.dispatch_last_in(
                "render",
                || None,
                |value| Some((value, None)),
                |value, rest| Some((value, Some(rest))),
            );
            match step {
                None => break,
                Some((value, rest)) => {
                    out.push_str(&value.render());
                    match rest {
                        Some(rest) => current = rest,
                        None => break,
                    }
                }
            }
        }
        out.push(']');
        out
    }
}

impl<T> Clone for Stack<T> {
    fn clone(&self) -> Self {
        let repr = match &self.repr {
            Repr::Empty => Repr::Empty,
            Repr::Node(node) => Repr::Node(Rc::clone(node)),
            Repr::Vacant => Repr::Vacant,
        };
        Stack {
            repr,
            table: self.table.clone(),
        }
    }
}

// Tears the chain down iteratively; the derived drop would recurse once per
// element through both `rest` and the sharing table's copy of it.
impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.release_into(&mut pending);
        while let Some(mut stack) = pending.pop() {
            stack.release_into(&mut pending);
        }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Stack::new_empty()
    }
}

impl<T: Render> std::fmt::Display for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

// Debug never dispatches, so it is safe on vacant values
impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_vacant() {
            return f.write_str("Stack::Vacant");
        }
        f.write_str("Stack")?;
        f.debug_list().entries(self.items()).finish()
    }
}

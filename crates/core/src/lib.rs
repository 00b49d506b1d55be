//! pstack core: a persistent stack with explicit variant dispatch
//!
//! `Stack<T>` is an immutable LIFO stack. Pushing or popping returns a new
//! stack and leaves the old one valid. Reading and popping an empty stack is
//! not an error: the caller passes an `on_empty` thunk and gets its result
//! back as `OrElse::Fallback`.
//!
//! # Modules
//!
//! - `stack`: `Stack<T>`, the dispatch primitive and the stack operations
//! - `table`: per-node sharing table (value -> sub-stack)
//! - `or_else`: `OrElse<T, R>`, found value or caller fallback
//! - `render`: element text form used by `Stack::render`
//! - `error`: `StackError`, the usual fallback value for callers

pub mod error;
pub mod or_else;
pub mod render;
pub mod stack;
pub mod table;

pub use error::StackError;
pub use or_else::OrElse;
pub use render::Render;
pub use stack::Stack;
pub use table::SharingTable;

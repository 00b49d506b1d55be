//! Error values for empty-stack fallbacks
//!
//! The stack itself never returns an error: an empty stack is resolved by the
//! caller's `on_empty` thunk. `StackError` is the value callers typically
//! build inside that thunk so the condition can be propagated with `?`.
//!
//! ```
//! use pstack_core::{Stack, StackError};
//!
//! fn second(stack: &Stack<String>) -> Result<String, StackError> {
//!     let rest = stack.pop_or_else(|| StackError::empty("pop")).into_result()?;
//!     rest.read_top_or_else(|| StackError::empty("top")).into_result()
//! }
//!
//! let s = Stack::new_empty().push("a".to_string()).push("b".to_string());
//! assert_eq!(second(&s).unwrap(), "a");
//! assert!(second(&Stack::new_empty()).is_err());
//! ```

/// Error produced by an empty-stack fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    /// The named operation needed an element but the stack was empty
    Empty { op: &'static str },
    /// Free-form message supplied by the caller
    Message(String),
}

impl StackError {
    pub fn empty(op: &'static str) -> Self {
        StackError::Empty { op }
    }
}

impl std::fmt::Display for StackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackError::Empty { op } => write!(f, "{}: the stack is empty", op),
            StackError::Message(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StackError {}

impl From<String> for StackError {
    fn from(s: String) -> Self {
        StackError::Message(s)
    }
}

impl From<&str> for StackError {
    fn from(s: &str) -> Self {
        StackError::Message(s.to_string())
    }
}

//! Result of an operation that falls back to a caller-supplied thunk
//!
//! `read_top_or_else` and `pop_or_else` never fail on an empty stack.
//! Instead the caller hands in a thunk, and whatever it returns comes back
//! as `OrElse::Fallback`. The fallback type is chosen by the caller and is
//! independent of the element type, so a caller can produce an error value,
//! a default element, or anything else.

/// Either the value an operation found, or the caller's fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrElse<T, R> {
    /// The operation had something to return
    Found(T),
    /// The stack was empty; this is what `on_empty` produced
    Fallback(R),
}

impl<T, R> OrElse<T, R> {
    pub fn is_found(&self) -> bool {
        matches!(self, OrElse::Found(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, OrElse::Fallback(_))
    }

    /// The found value, discarding any fallback
    pub fn found(self) -> Option<T> {
        match self {
            OrElse::Found(t) => Some(t),
            OrElse::Fallback(_) => None,
        }
    }

    /// The fallback value, discarding any found value
    pub fn fallback(self) -> Option<R> {
        match self {
            OrElse::Found(_) => None,
            OrElse::Fallback(r) => Some(r),
        }
    }

    pub fn as_ref(&self) -> OrElse<&T, &R> {
        match self {
            OrElse::Found(t) => OrElse::Found(t),
            OrElse::Fallback(r) => OrElse::Fallback(r),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OrElse<U, R> {
        match self {
            OrElse::Found(t) => OrElse::Found(f(t)),
            OrElse::Fallback(r) => OrElse::Fallback(r),
        }
    }

    pub fn map_fallback<S>(self, f: impl FnOnce(R) -> S) -> OrElse<T, S> {
        match self {
            OrElse::Found(t) => OrElse::Found(t),
            OrElse::Fallback(r) => OrElse::Fallback(f(r)),
        }
    }

    /// Collapse into a `T`, converting the fallback with `f`
    pub fn unwrap_or_else(self, f: impl FnOnce(R) -> T) -> T {
        match self {
            OrElse::Found(t) => t,
            OrElse::Fallback(r) => f(r),
        }
    }

    /// Treat the fallback as the error channel
    ///
    /// This is the usual shape when the thunk builds an error value:
    /// `stack.pop_or_else(|| StackError::empty("pop")).into_result()?`
    pub fn into_result(self) -> Result<T, R> {
        match self {
            OrElse::Found(t) => Ok(t),
            OrElse::Fallback(r) => Err(r),
        }
    }
}

impl<T, R> From<OrElse<T, R>> for Result<T, R> {
    fn from(value: OrElse<T, R>) -> Self {
        value.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_accessors() {
        let v: OrElse<i32, &str> = OrElse::Found(7);
        assert!(v.is_found());
        assert!(!v.is_fallback());
        assert_eq!(v.as_ref().found(), Some(&7));
        assert_eq!(v.clone().fallback(), None);
        assert_eq!(v.into_result(), Ok(7));
    }

    #[test]
    fn test_fallback_accessors() {
        let v: OrElse<i32, &str> = OrElse::Fallback("empty");
        assert!(v.is_fallback());
        assert_eq!(v.clone().found(), None);
        assert_eq!(v.clone().fallback(), Some("empty"));
        assert_eq!(v.unwrap_or_else(|msg| msg.len() as i32), 5);
    }

    #[test]
    fn test_map_only_touches_its_side() {
        let found: OrElse<i32, String> = OrElse::Found(2);
        assert_eq!(found.map(|n| n * 10), OrElse::Found(20));

        let fallback: OrElse<i32, String> = OrElse::Fallback("x".to_string());
        assert_eq!(
            fallback.clone().map(|n| n * 10),
            OrElse::Fallback("x".to_string())
        );
        assert_eq!(fallback.map_fallback(|s| s.len()), OrElse::Fallback(1));
    }

    #[test]
    fn test_into_std_result() {
        let r: Result<u8, ()> = OrElse::Fallback(()).into();
        assert_eq!(r, Err(()));
    }
}

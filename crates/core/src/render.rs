//! Element text form used by `Stack::render`
//!
//! A rendered stack is the concatenation of its elements' text forms with no
//! separator, so the representation of an element is just its own text.
//! Strings render verbatim; scalars render through their `Display` text.

use std::borrow::Cow;

/// Text form of a stack element
pub trait Render {
    fn render(&self) -> Cow<'_, str>;
}

impl Render for String {
    fn render(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl Render for &str {
    fn render(&self) -> Cow<'_, str> {
        Cow::Borrowed(*self)
    }
}

impl Render for char {
    fn render(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl Render for bool {
    fn render(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "true" } else { "false" })
    }
}

macro_rules! render_via_display {
    ($($t:ty),* $(,)?) => {
        $(
            impl Render for $t {
                fn render(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

render_via_display!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

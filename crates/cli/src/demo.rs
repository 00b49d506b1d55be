//! `pstack demo`: a short walk through the stack operations

use pstack_core::{OrElse, Stack, StackError};
use std::io::{self, Write};

fn three_items() -> Stack<String> {
    Stack::new_empty()
        .push("Hello".to_string())
        .push("World".to_string())
        .push("!!!".to_string())
}

fn show<T: std::fmt::Display, E: std::fmt::Display>(value: OrElse<T, E>) -> String {
    match value {
        OrElse::Found(v) => v.to_string(),
        OrElse::Fallback(e) => e.to_string(),
    }
}

pub fn run_demo<W: Write>(out: &mut W) -> io::Result<()> {
    let se: Stack<String> = Stack::new_empty();
    let s1 = three_items();
    let s2 = three_items();

    writeln!(out, "Empty stack and two stacks with 3 items")?;
    writeln!(out, "{} {} {}", se, s1, s2)?;

    writeln!(out, "First item on the stack")?;
    let top = s1.read_top_or_else(|| StackError::from("should not throw"));
    writeln!(out, "{}", show(top))?;

    writeln!(out, "Stack after reading the top item")?;
    writeln!(out, "{}", s1)?;

    writeln!(out, "First item off the stack")?;
    let popped = s1.pop_or_else(|| StackError::from("should not throw"));
    writeln!(out, "{}", show(popped))?;

    writeln!(out, "Pop when empty")?;
    let empty_pop =
        Stack::<String>::new_empty().pop_or_else(|| StackError::from("error the stack is empty"));
    writeln!(out, "{}", show(empty_pop))?;

    Ok(())
}

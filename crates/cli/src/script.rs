//! Scripted stack operations for `pstack run`
//!
//! A script is a list of operations applied in order to a `Stack<String>`
//! that starts empty:
//!
//! | Op | Effect |
//! |----|--------|
//! | `push:<text>` | push `<text>` (may be empty, may contain `:`) |
//! | `pop` | replace the stack with the one beneath the top |
//! | `top` | print the top element |
//! | `empty` | print `true` or `false` |
//! | `show` | print the stack |
//!
//! An empty-stack `pop` or `top` prints the fallback error and leaves the
//! stack as it was, unless strict mode turns it into a `ScriptError`.

use crate::config::{EchoMode, RunConfig};
use pstack_core::{OrElse, Stack, StackError};
use std::io::Write;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Push(String),
    Pop,
    Top,
    Empty,
    Show,
}

impl Op {
    pub fn parse(token: &str) -> Result<Op, ScriptError> {
        if let Some(text) = token.strip_prefix("push:") {
            return Ok(Op::Push(text.to_string()));
        }
        match token {
            "pop" => Ok(Op::Pop),
            "top" => Ok(Op::Top),
            "empty" => Ok(Op::Empty),
            "show" => Ok(Op::Show),
            "push" => Err(ScriptError::MissingPushValue),
            other => Err(ScriptError::UnknownOp(other.to_string())),
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Push(text) => write!(f, "push:{}", text),
            Op::Pop => write!(f, "pop"),
            Op::Top => write!(f, "top"),
            Op::Empty => write!(f, "empty"),
            Op::Show => write!(f, "show"),
        }
    }
}

/// Error while parsing or running a script
#[derive(Debug)]
pub enum ScriptError {
    UnknownOp(String),
    /// `push` given without `:<text>`
    MissingPushValue,
    /// Strict mode: an operation needed an element (1-based position)
    EmptyStack { position: usize, source: StackError },
    Io(std::io::Error),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::UnknownOp(op) => write!(
                f,
                "unknown operation '{}' (expected push:<text>, pop, top, empty or show)",
                op
            ),
            ScriptError::MissingPushValue => {
                write!(f, "push needs a value: use push:<text>")
            }
            ScriptError::EmptyStack { position, source } => {
                write!(f, "operation {}: {}", position, source)
            }
            ScriptError::Io(e) => write!(f, "write error: {}", e),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::EmptyStack { source, .. } => Some(source),
            ScriptError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScriptError {
    fn from(e: std::io::Error) -> Self {
        ScriptError::Io(e)
    }
}

/// Parse every token up front so a typo aborts before any output
pub fn parse_script<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Op>, ScriptError> {
    tokens.iter().map(|t| Op::parse(t.as_ref())).collect()
}

/// Run `ops` against a fresh empty stack, writing results to `out`
///
/// Returns the final stack.
pub fn run_script<W: Write>(
    ops: &[Op],
    config: &RunConfig,
    out: &mut W,
) -> Result<Stack<String>, ScriptError> {
    let mut stack: Stack<String> = Stack::new_empty();

    for (index, op) in ops.iter().enumerate() {
        let position = index + 1;
        debug!("op {}: {}", position, op);

        match op {
            Op::Push(text) => {
                stack = stack.push(text.clone());
            }
            Op::Pop => match stack.pop_or_else(|| StackError::empty("pop")) {
                OrElse::Found(rest) => stack = rest,
                OrElse::Fallback(e) => empty_stack(position, e, config, out)?,
            },
            Op::Top => match stack.read_top_or_else(|| StackError::empty("top")) {
                OrElse::Found(top) => writeln!(out, "{}", top)?,
                OrElse::Fallback(e) => empty_stack(position, e, config, out)?,
            },
            Op::Empty => writeln!(out, "{}", stack.is_empty())?,
            Op::Show => writeln!(out, "{}", stack)?,
        }

        if config.echo == EchoMode::Each {
            writeln!(out, "{}", stack)?;
        }
    }

    if config.echo == EchoMode::Final {
        writeln!(out, "{}", stack)?;
    }

    info!("ran {} operations, final depth {}", ops.len(), stack.len());
    Ok(stack)
}

fn empty_stack<W: Write>(
    position: usize,
    source: StackError,
    config: &RunConfig,
    out: &mut W,
) -> Result<(), ScriptError> {
    if config.strict {
        return Err(ScriptError::EmptyStack { position, source });
    }
    writeln!(out, "error: {}", source)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(
        tokens: &[&str],
        config: &RunConfig,
    ) -> (Result<Stack<String>, ScriptError>, String) {
        let ops = parse_script(tokens).unwrap();
        let mut out = Vec::new();
        let result = run_script(&ops, config, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn quiet() -> RunConfig {
        RunConfig {
            echo: EchoMode::Quiet,
            strict: false,
        }
    }

    #[test]
    fn test_parse_ops() {
        assert_eq!(
            Op::parse("push:Hello").unwrap(),
            Op::Push("Hello".to_string())
        );
        assert_eq!(Op::parse("push:a:b").unwrap(), Op::Push("a:b".to_string()));
        assert_eq!(Op::parse("push:").unwrap(), Op::Push(String::new()));
        assert_eq!(Op::parse("pop").unwrap(), Op::Pop);
        assert_eq!(Op::parse("top").unwrap(), Op::Top);
        assert_eq!(Op::parse("empty").unwrap(), Op::Empty);
        assert_eq!(Op::parse("show").unwrap(), Op::Show);
    }

    #[test]
    fn test_parse_rejects_bad_ops() {
        let err = Op::parse("peek").unwrap_err();
        assert!(matches!(err, ScriptError::UnknownOp(_)));
        assert!(err.to_string().contains("unknown operation 'peek'"));

        assert!(matches!(
            Op::parse("push"),
            Err(ScriptError::MissingPushValue)
        ));

        let err = parse_script(&["push:a", "drop", "pop"]).unwrap_err();
        assert!(matches!(err, ScriptError::UnknownOp(op) if op == "drop"));
    }

    #[test]
    fn test_op_display_round_trips_through_parse() {
        for op in [Op::Push("x:y".to_string()), Op::Pop, Op::Show] {
            assert_eq!(Op::parse(&op.to_string()).unwrap(), op);
        }
    }

    #[test]
    fn test_push_pop_push() {
        let (result, out) = run(
            &["push:Hello", "push:World", "pop", "push:Daisy", "top"],
            &quiet(),
        );
        assert_eq!(result.unwrap().render(), "[DaisyHello]");
        assert_eq!(out, "Daisy\n");
    }

    #[test]
    fn test_echo_each() {
        let config = RunConfig::default();
        let (_, out) = run(&["push:Hello", "push:World", "pop"], &config);
        assert_eq!(out, "[Hello]\n[WorldHello]\n[Hello]\n");
    }

    #[test]
    fn test_echo_final() {
        let config = RunConfig {
            echo: EchoMode::Final,
            strict: false,
        };
        let (_, out) = run(&["push:Hello", "push:World", "empty"], &config);
        assert_eq!(out, "false\n[WorldHello]\n");
    }

    #[test]
    fn test_empty_pop_is_reported_and_skipped() {
        let (result, out) = run(&["pop", "top", "empty", "show"], &quiet());
        assert!(result.unwrap().is_empty());
        assert_eq!(
            out,
            "error: pop: the stack is empty\nerror: top: the stack is empty\ntrue\n[]\n"
        );
    }

    #[test]
    fn test_strict_mode_stops_at_empty_pop() {
        let config = RunConfig {
            echo: EchoMode::Quiet,
            strict: true,
        };
        let (result, out) = run(&["push:a", "pop", "show", "pop", "show"], &config);
        match result {
            Err(ScriptError::EmptyStack { position, source }) => {
                assert_eq!(position, 4);
                assert_eq!(source, StackError::empty("pop"));
            }
            other => panic!("expected EmptyStack, got {:?}", other),
        }
        // Only the first show ran
        assert_eq!(out, "[]\n");
    }

    #[test]
    fn test_strict_error_display() {
        let err = ScriptError::EmptyStack {
            position: 2,
            source: StackError::empty("top"),
        };
        assert_eq!(err.to_string(), "operation 2: top: the stack is empty");
    }
}

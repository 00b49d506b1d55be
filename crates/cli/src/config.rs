//! Driver configuration
//!
//! ## Configuration (Environment Variables)
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PSTACK_ECHO` | `each` | When `run` prints the stack: `each`, `final` or `quiet` |
//! | `PSTACK_STRICT` | `0` | `1`/`true`: abort `run` when `pop`/`top` hits an empty stack |
//!
//! Command-line flags override the environment.

use clap::ValueEnum;
use tracing::warn;

/// When the script runner prints the current stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EchoMode {
    /// After every operation
    #[default]
    Each,
    /// Once, after the last operation
    Final,
    /// Never; only `top`, `empty` and `show` print
    Quiet,
}

impl EchoMode {
    fn parse(s: &str) -> Option<EchoMode> {
        match s.trim().to_lowercase().as_str() {
            "each" => Some(EchoMode::Each),
            "final" => Some(EchoMode::Final),
            "quiet" | "none" | "off" => Some(EchoMode::Quiet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub echo: EchoMode,
    /// Treat an empty-stack `pop`/`top` as a failure
    pub strict: bool,
}

impl RunConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let echo = match std::env::var("PSTACK_ECHO") {
            Ok(raw) => EchoMode::parse(&raw).unwrap_or_else(|| {
                warn!("PSTACK_ECHO={:?} not recognized, using each", raw);
                EchoMode::Each
            }),
            Err(_) => EchoMode::Each,
        };

        let strict = match std::env::var("PSTACK_STRICT") {
            Ok(raw) => parse_flag(&raw).unwrap_or_else(|| {
                warn!("PSTACK_STRICT={:?} not recognized, using 0", raw);
                false
            }),
            Err(_) => false,
        };

        Self { echo, strict }
    }

    /// Apply command-line overrides on top of this configuration
    pub fn with_overrides(mut self, echo: Option<EchoMode>, strict: bool) -> Self {
        if let Some(echo) = echo {
            self.echo = echo;
        }
        // --strict can only switch strict mode on
        self.strict |= strict;
        self
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Helper to set env var (tests are serialized)
    unsafe fn set_env(key: &str, value: &str) {
        // SAFETY: #[serial] keeps other tests from touching the environment
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn restore_env(key: &str, orig: Option<String>) {
        // SAFETY: #[serial] keeps other tests from touching the environment
        unsafe {
            match orig {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.echo, EchoMode::Each);
        assert!(!config.strict);
    }

    #[test]
    fn test_parse_echo_mode() {
        assert_eq!(EchoMode::parse("each"), Some(EchoMode::Each));
        assert_eq!(EchoMode::parse(" FINAL "), Some(EchoMode::Final));
        assert_eq!(EchoMode::parse("off"), Some(EchoMode::Quiet));
        assert_eq!(EchoMode::parse("loud"), None);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("True"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_overrides() {
        let config = RunConfig::default().with_overrides(Some(EchoMode::Final), true);
        assert_eq!(config.echo, EchoMode::Final);
        assert!(config.strict);

        let strict_env = RunConfig {
            echo: EchoMode::Quiet,
            strict: true,
        };
        let config = strict_env.with_overrides(None, false);
        assert_eq!(config.echo, EchoMode::Quiet);
        assert!(config.strict);
    }

    #[test]
    #[serial]
    fn test_from_env_all_values() {
        let orig_echo = std::env::var("PSTACK_ECHO").ok();
        let orig_strict = std::env::var("PSTACK_STRICT").ok();

        unsafe {
            set_env("PSTACK_ECHO", "final");
            set_env("PSTACK_STRICT", "1");
        }

        let config = RunConfig::from_env();
        assert_eq!(config.echo, EchoMode::Final);
        assert!(config.strict);

        unsafe {
            restore_env("PSTACK_ECHO", orig_echo);
            restore_env("PSTACK_STRICT", orig_strict);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_values() {
        let orig_echo = std::env::var("PSTACK_ECHO").ok();
        let orig_strict = std::env::var("PSTACK_STRICT").ok();

        unsafe {
            set_env("PSTACK_ECHO", "sometimes");
            set_env("PSTACK_STRICT", "perhaps");
        }

        // Should fall back to defaults
        let config = RunConfig::from_env();
        assert_eq!(config, RunConfig::default());

        unsafe {
            restore_env("PSTACK_ECHO", orig_echo);
            restore_env("PSTACK_STRICT", orig_strict);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_unset() {
        let orig_echo = std::env::var("PSTACK_ECHO").ok();
        let orig_strict = std::env::var("PSTACK_STRICT").ok();

        unsafe {
            restore_env("PSTACK_ECHO", None);
            restore_env("PSTACK_STRICT", None);
        }

        assert_eq!(RunConfig::from_env(), RunConfig::default());

        unsafe {
            restore_env("PSTACK_ECHO", orig_echo);
            restore_env("PSTACK_STRICT", orig_strict);
        }
    }
}

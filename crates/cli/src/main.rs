//! pstack CLI
//!
//! Command-line driver for the persistent stack: a fixed demonstration and a
//! scripted mode that applies operations given on the command line.

mod config;
mod demo;
mod script;

use clap::{CommandFactory, Parser as ClapParser, Subcommand};
use clap_complete::{Shell, generate};
use config::{EchoMode, RunConfig};
use std::io;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "pstack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Persistent stack driver - run the demo or a script of stack operations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a short demonstration of push, read, pop and the empty fallback
    Demo,

    /// Apply stack operations in order to an empty stack of strings
    Run {
        /// Operations: push:<text>, pop, top, empty, show
        #[arg(required = true, value_name = "OP")]
        ops: Vec<String>,

        /// When to print the stack (overrides PSTACK_ECHO)
        #[arg(long, value_enum)]
        echo: Option<EchoMode>,

        /// Fail on pop/top of an empty stack (also PSTACK_STRICT=1)
        #[arg(long)]
        strict: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Logs go to stderr; stdout carries only stacks and results
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new("pstack=warn"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => run_demo(),
        Commands::Run { ops, echo, strict } => run_ops(&ops, echo, strict),
        Commands::Completions { shell } => run_completions(shell),
    }
}

fn run_demo() {
    if let Err(e) = demo::run_demo(&mut io::stdout().lock()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_ops(tokens: &[String], echo: Option<EchoMode>, strict: bool) {
    let ops = match script::parse_script(tokens) {
        Ok(ops) => ops,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    let config = RunConfig::from_env().with_overrides(echo, strict);
    info!("running {} operations with {:?}", ops.len(), config);

    // Usage errors already exited above; only strict-mode and write failures remain
    if let Err(e) = script::run_script(&ops, &config, &mut io::stdout().lock()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "pstack", &mut io::stdout());
}

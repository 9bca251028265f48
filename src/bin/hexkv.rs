// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hexkv`: inspect and edit a key-value store from the command line.
//!
//! ```text
//! hexkv yaml:///etc/myapp/config.yaml get database.host database.port
//! hexkv json://settings.json set server.port=8080 server.name=api
//! hexkv dict://scratch show
//! ```
//!
//! Results go to stdout as JSON; logs go to stderr.

use clap::{Parser, Subcommand};
use hexkv::domain::{KvError, Node, Result};
use hexkv::service::StoreRegistry;
use std::process::ExitCode;

/// Inspect and edit a hierarchical key-value store.
#[derive(Parser, Debug)]
#[command(name = "hexkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Store location, e.g. `yaml:///etc/myapp/config.yaml`.
    url: String,

    /// Operation to perform.
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity.
    ///
    /// -v = info, -vv = debug, -vvv = trace
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the whole document.
    Show,
    /// Print the dotted path of every leaf value.
    Keys,
    /// Print the values at the given paths as a JSON array (null when absent).
    Get {
        /// Dotted key paths
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Store values. VALUE is parsed as JSON, or taken as a plain string.
    Set {
        /// Assignments of the form KEY=VALUE
        #[arg(required = true, value_name = "KEY=VALUE")]
        pairs: Vec<String>,
    },
    /// Remove the given paths.
    Delete {
        /// Dotted key paths
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("hexkv: {} (code {})", e, e.code());
            ExitCode::from(u8::try_from(e.code()).unwrap_or(1))
        }
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // A second subscriber can only exist if something else installed one.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn run(cli: &Cli) -> Result<()> {
    let store = StoreRegistry::global().resolve(&cli.url)?;

    match &cli.command {
        Command::Show => print_json(&store.load()?),
        Command::Keys => {
            for key in store.load()?.leaf_paths() {
                println!("{}", key);
            }
            Ok(())
        }
        Command::Get { keys } => print_json(&store.get(keys)?),
        Command::Set { pairs } => {
            let (keys, vals) = parse_assignments(pairs)?;
            store.set(&keys, vals)
        }
        Command::Delete { keys } => store.delete(keys),
    }
}

fn parse_assignments(pairs: &[String]) -> Result<(Vec<String>, Vec<Node>)> {
    pairs
        .iter()
        .map(|pair| {
            let (key, raw) = pair.split_once('=').ok_or_else(|| {
                KvError::invalid_arguments(format!("Expected KEY=VALUE, got '{}'", pair))
            })?;
            Ok((key.to_string(), parse_value(raw)))
        })
        .collect::<Result<Vec<_>>>()
        .map(|assignments| assignments.into_iter().unzip())
}

fn parse_value(raw: &str) -> Node {
    serde_json::from_str(raw).unwrap_or_else(|_| Node::from(raw))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| KvError::backend("json", format!("Failed to render output: {}", e), e))?;
    println!("{}", text);
    Ok(())
}

//! mdcommand - typed command argument parsing and completion
//!
//! Developer CLI: parse or complete an argument line with any built-in
//! parameter, against server state loaded from a TOML file.

mod commands;
mod config;
mod source;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use commands::{join_words, ParameterRegistry};
use config::ServerConfig;
use mdcommand_args::CommandArgs;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Parse and complete command arguments against a configured server", long_about = None)]
struct Cli {
    /// Server state file (worlds, players, entities, catalogs, command source)
    #[arg(long, default_value = config::DEFAULT_STATE_PATH)]
    state: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an argument line and print the resulting value
    Parse {
        /// Registered parameter name (see `list`)
        parameter: String,
        /// Argument words; re-joined with quoting where needed
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Print completions for the last token of a raw argument line
    Complete {
        /// Registered parameter name (see `list`)
        parameter: String,
        /// Raw line as typed so far; a trailing space starts a new token
        #[arg(default_value = "", allow_hyphen_values = true)]
        line: String,
    },
    /// Print the usage text of a parameter
    Usage {
        /// Registered parameter name (see `list`)
        parameter: String,
        /// Key the parameter is registered under in a command (defaults to its name)
        #[arg(long)]
        key: Option<String>,
    },
    /// List registered parameters with their ids
    List,
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Starting mdcommand v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::load_from_path(&cli.state);
    let source = config
        .build()
        .with_context(|| format!("invalid server state in {}", cli.state.display()))?;
    let registry = ParameterRegistry::builtin(config.catalogs.keys().cloned().collect())?;

    match cli.command {
        Command::List => {
            for (name, parameter) in registry.iter() {
                println!("{name:<12} {:<28} {}", parameter.id(), parameter.name());
            }
        }
        Command::Parse { parameter, words } => {
            let parameter = registry.get(&parameter)?;
            let line = join_words(&words);
            let mut args = CommandArgs::parse(&line)?;
            match parameter.parse_display(&source, &mut args) {
                Ok(value) => {
                    println!("{value}");
                    if args.has_next() {
                        warn!(remaining = args.raw_remaining(), "input left unconsumed");
                    }
                }
                Err(err) => bail!("{err}\n{}", err.annotated_position()),
            }
        }
        Command::Complete { parameter, line } => {
            let parameter = registry.get(&parameter)?;
            let mut args = CommandArgs::for_completion(&line);
            for candidate in parameter.complete(&source, &mut args) {
                println!("{candidate}");
            }
        }
        Command::Usage { parameter, key } => {
            let key = key.unwrap_or_else(|| parameter.clone());
            println!("{}", registry.get(&parameter)?.usage(&key, &source));
        }
    }

    Ok(())
}

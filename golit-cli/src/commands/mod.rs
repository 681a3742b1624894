mod check;
mod completions;
mod encode;
mod helpers;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use encode::EncodeCommand;
use eyre::Result;
use golit_manifest::Manifest;
use helpers::HelpersCommand;

/// Manifest read when no --config is given, if present.
pub(crate) const DEFAULT_CONFIG: &str = "golit.toml";

/// Extension trait for exiting on diagnostics with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for golit_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for golit::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

/// Load `config`, or ./golit.toml when it exists, or the defaults.
pub(crate) fn load_manifest(config: Option<&Path>) -> golit_manifest::Result<Manifest> {
    match config {
        Some(path) => Manifest::from_file(path),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG);
            if path.is_file() {
                log::debug!("using {}", path.display());
                Manifest::from_file(path)
            } else {
                Ok(Manifest::default())
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "golit")]
#[command(version)]
#[command(about = "Print captured Go values as Go literals")]
pub(crate) struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Encode(cmd) => cmd.run(),
            Commands::Helpers(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Go literal for a value document
    Encode(EncodeCommand),

    /// Print the Go source of the Addr/AddrInterface helper package
    Helpers(HelpersCommand),

    /// Validate golit.toml
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

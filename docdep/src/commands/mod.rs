mod check;
mod completions;
mod write;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use docdep_config::Config;
use docdep_ext::Host;
use eyre::Result;
use tracing::debug;
use write::WriteCommand;

/// Config file looked up in the working directory when `--config` is absent
const DEFAULT_CONFIG: &str = "docdep.toml";

/// Extension trait for exiting on config errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for docdep_config::Result<T> {
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

#[derive(Parser)]
#[command(name = "docdep")]
#[command(version)]
#[command(about = "Write Makefile depfiles for documentation builds")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Write(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write the depfile for a finished documentation build
    Write(WriteCommand),

    /// Validate docdep.toml and show registered extensions
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Where the configuration came from.
pub(crate) enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, `docdep.toml` in the working
/// directory is used if present, and built-in defaults otherwise.
pub(crate) fn load_config(path: Option<&Path>) -> (Config, ConfigSource) {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None if Path::new(DEFAULT_CONFIG).exists() => PathBuf::from(DEFAULT_CONFIG),
        None => {
            debug!("no {} found, using defaults", DEFAULT_CONFIG);
            return (Config::new(), ConfigSource::Defaults);
        }
    };

    let config = Config::from_file(&path).unwrap_or_exit();
    (config, ConfigSource::File(path))
}

/// A host with every bundled extension registered.
pub(crate) fn host(config: Config) -> Host {
    docdep_depfile::setup(Host::new(config))
}

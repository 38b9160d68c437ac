use std::{
    io,
    path::{Path, PathBuf},
};

use clap::Args;
use docdep_core::Environment;
use docdep_depfile::{DEPFILE_CONFIG, Depfile, DepfileExtension, WriteOutcome};
use docdep_ext::Host;
use eyre::{Context, Result, eyre};

use super::load_config;

#[derive(Args)]
pub struct WriteCommand {
    /// Environment summary (JSON) produced by the documentation build
    #[arg(short, long)]
    pub env: PathBuf,

    /// Path to docdep.toml (defaults to ./docdep.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Depfile to write (overrides the `depfile` config value)
    #[arg(short, long)]
    pub depfile: Option<PathBuf>,

    /// Print the depfile to stdout instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl WriteCommand {
    /// Run the write command
    pub fn run(&self) -> Result<()> {
        let (mut config, _) = load_config(self.config.as_deref());
        if let Some(depfile) = &self.depfile {
            config.set(DEPFILE_CONFIG, depfile_value(depfile)?);
        }

        let env = Environment::from_json_file(&self.env)?;

        if self.dry_run {
            Depfile::from_env(&env, "-")
                .write_to(&mut io::stdout().lock())
                .wrap_err("Failed to print depfile")?;
            return Ok(());
        }

        let depfile = DepfileExtension::new();
        let host = Host::new(config).extension(depfile.clone());
        host.env_updated(&env).wrap_err("Failed to finalize build")?;

        match depfile.last_outcome() {
            Some(WriteOutcome::Written { path, inputs }) => {
                println!("wrote {} ({} inputs)", path.display(), inputs)
            }
            Some(WriteOutcome::Disabled) | None => {
                println!("depfile disabled (set '{}' to enable)", DEPFILE_CONFIG)
            }
        }

        Ok(())
    }
}

/// The `--depfile` path as a config value. Config values are UTF-8 strings.
fn depfile_value(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| eyre!("depfile path '{}' is not valid UTF-8", path.display()))
}

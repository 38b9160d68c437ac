use std::path::PathBuf;

use clap::Args;
use docdep_config::value_to_string;
use docdep_depfile::DEPFILE_CONFIG;
use eyre::Result;

use super::{ConfigSource, host, load_config};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to docdep.toml (defaults to ./docdep.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let (config, source) = load_config(self.config.as_deref());
        let host = host(config);

        match source {
            ConfigSource::File(path) => println!("✓ {} is valid\n", path.display()),
            ConfigSource::Defaults => println!("✓ no config file, using defaults\n"),
        }

        let count = host.extensions().count();
        println!(
            "  {} extension{}:",
            count,
            if count == 1 { "" } else { "s" }
        );
        for ext in host.extensions() {
            let meta = ext.metadata();
            println!(
                "    {} v{} (parallel read: {}, parallel write: {})",
                ext.name(),
                meta.version,
                yes_no(meta.parallel_read_safe),
                yes_no(meta.parallel_write_safe)
            );
        }

        println!("\n  config values:");
        for value in host.config_values() {
            match host.config().get(value.name) {
                Some(v) => println!(
                    "    {} = {} [rebuild: {}]",
                    value.name,
                    value_to_string(v),
                    value.rebuild
                ),
                None => println!("    {} (unset) [rebuild: {}]", value.name, value.rebuild),
            }
        }

        match host.config().path(DEPFILE_CONFIG) {
            Some(path) => println!("\n  depfile: {}", path.display()),
            None => println!("\n  depfile: disabled"),
        }

        Ok(())
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

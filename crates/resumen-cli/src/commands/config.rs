//! Config command - inspect and scaffold the pipeline configuration.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use resumen_core::models::config::ResumenConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the active configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Destination path (default: standard config location)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the default configuration file path
    Path,
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("resumen")
        .join("config.json")
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = super::process::load_config(config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Init { path, force } => {
            let dest = path.unwrap_or_else(default_config_path);

            if dest.exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {} (use --force to overwrite)",
                    dest.display()
                );
            }

            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }

            ResumenConfig::default().save(&dest)?;
            println!(
                "{} Wrote default config to {}",
                style("✓").green(),
                dest.display()
            );
        }
        ConfigCommand::Path => {
            println!("{}", default_config_path().display());
        }
    }

    Ok(())
}

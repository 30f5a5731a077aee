//! Init command implementation.
//!
//! This module implements the `init` command for explicitly creating
//! the frontdesk data directory and database.

use std::path::PathBuf;

use clap::Args;
use frontdesk::{Config, Database, DatabaseConfig};

use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Initialize the frontdesk data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Write a default configuration file alongside the database
    #[arg(long)]
    with_config: bool,
}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Priority: command flag > global flag > default
        let data_dir = match self.data_dir.or_else(|| global.data_dir.clone()) {
            Some(dir) => dir,
            None => Config::default_data_dir().map_err(|e| CliError::Config(e.to_string()))?,
        };

        let db_path = data_dir.join("frontdesk.db");
        let db = Database::open(DatabaseConfig::new(&db_path))?;
        drop(db);

        if self.with_config {
            let config_path = data_dir.join("config.yaml");
            if !config_path.exists() {
                std::fs::write(&config_path, default_config_yaml())?;
                if !global.quiet {
                    println!("Created configuration file: {}", config_path.display());
                }
            } else if !global.quiet {
                println!(
                    "Configuration file already exists: {}",
                    config_path.display()
                );
            }
        }

        if !global.quiet {
            println!("Initialized frontdesk database: {}", db_path.display());
        }
        Ok(())
    }
}

/// Renders the default configuration as YAML.
fn default_config_yaml() -> String {
    let config = Config::default();
    format!(
        "busy_timeout_seconds: {}\nsweep:\n  no_show_grace_hours: {}\n",
        config.busy_timeout_seconds, config.sweep.no_show_grace_hours
    )
}

//! Config command handlers

use std::path::PathBuf;

use anyhow::{Context, Result};

use linkhub_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
///
/// The admin password itself is never printed.
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    let password_state = if config.uses_default_password() {
        "default"
    } else {
        "custom"
    };

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_file": config.data_file,
                    "bind": config.bind,
                    "admin_password": password_state,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_file.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_file:      {}", config.data_file.display());
            println!("  bind:           {}", config.bind);
            println!("  admin_password: ({})", password_state);
            println!(
                "  log_file:       {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
            if config.uses_default_password() {
                println!();
                println!("Set LINKHUB_ADMIN_PASSWORD (or admin_password in the config file)");
                println!("before exposing the server.");
            }
        }
    }

    Ok(())
}

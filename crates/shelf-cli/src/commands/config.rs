//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use shelf_core::{Config, Theme};

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "catalog_path": config.catalog_path,
                    "page_size": config.page_size,
                    "theme": config.theme,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.catalog_source());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:     {}", config.data_dir.display());
            println!("  catalog_path: {}", config.catalog_source());
            println!(
                "  page_size:    {}",
                config
                    .page_size
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "(from catalog)".to_string())
            );
            println!("  theme:        {}", config.theme);
            println!(
                "  log_file:     {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply_setting(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Update one key on a loaded configuration
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let cleared = value.is_empty() || value == "none";

    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "catalog_path" => {
            config.catalog_path = if cleared { None } else { Some(value.into()) };
        }
        "page_size" => {
            config.page_size = if cleared {
                None
            } else {
                let n: usize = value
                    .parse()
                    .context("Invalid value for page_size. Use a positive number or 'none'.")?;
                if n == 0 {
                    bail!("Invalid value for page_size. Use a positive number or 'none'.");
                }
                Some(n)
            };
        }
        "theme" => {
            config.theme = value.parse::<Theme>()?;
        }
        "log_file" => {
            config.log_file = if cleared { None } else { Some(value.into()) };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, catalog_path, page_size, theme, log_file",
                key
            );
        }
    }

    Ok(())
}

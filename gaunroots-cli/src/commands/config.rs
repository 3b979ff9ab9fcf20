use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use shared::config::client::ClientConfig;

/// Writes a configuration file holding the defaults.
///
/// # Errors
/// Returns an error if the format is unsupported or if writing the file fails.
pub fn generate_config(format: &str, output: Option<PathBuf>) -> Result<()> {
    let config = ClientConfig::with_defaults();
    let serialized = match format {
        "yaml" => serde_yml::to_string(&config)?,
        "json" => serde_json::to_string_pretty(&config)?,
        _ => bail!("Unsupported format. Use 'yaml' or 'json'."),
    };

    let path = output.unwrap_or_else(|| PathBuf::from(format!("config.{format}")));
    fs::write(&path, serialized)
        .with_context(|| format!("failed to write configuration to {}", path.display()))?;

    println!("Configuration file '{}' generated successfully.", path.display());
    Ok(())
}

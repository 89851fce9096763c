use std::path::Path;

use anyhow::{Context, Result};

use super::types::SlicerConfig;

/// Save a config to a JSON file with pretty formatting.
pub fn save_config(config: &SlicerConfig, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(config)
        .with_context(|| "failed to serialize config to JSON")?;

    std::fs::write(path, content)
        .with_context(|| format!("failed to write config file: {}", path.display()))?;

    Ok(())
}

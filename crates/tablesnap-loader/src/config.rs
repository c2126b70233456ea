use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tablesnap_config::{CONFIG_FILE_NAME, SnapConfig};

/// Load config from a specific path.
pub fn load_config_from_path(path: PathBuf) -> Result<SnapConfig> {
    if !path.exists() {
        anyhow::bail!("{} not found at: {}", CONFIG_FILE_NAME, path.display());
    }

    let content = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let config: SnapConfig =
        serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))?;
    Ok(config)
}

/// Load config from project root, with fallback to defaults.
pub fn load_config_or_default(project_root: &Path) -> Result<SnapConfig> {
    let config_path = project_root.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        load_config_from_path(config_path)
    } else {
        tracing::debug!(root = %project_root.display(), "no config file, using defaults");
        Ok(SnapConfig::default())
    }
}

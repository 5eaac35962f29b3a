//! Node launch config loading from YAML or JSON files

use crate::{
    config::types::NodeLaunchConfig,
    error::{LaunchError, Result},
};
use std::{fs, path::Path};

/// Load a node launch config, picking the format from the file extension
pub fn load_config(path: &Path) -> Result<NodeLaunchConfig> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let config = match extension.as_deref() {
        Some("yaml") | Some("yml") => {
            let content = fs::read_to_string(path)?;
            serde_yaml::from_str(&content)?
        }
        Some("json") => {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content)
                .map_err(|e| LaunchError::json(path.display().to_string(), e))?
        }
        _ => {
            return Err(LaunchError::UnsupportedConfigFormat {
                path: path.display().to_string(),
            })
        }
    };

    log::debug!("Loaded node launch config from {}", path.display());
    Ok(config)
}

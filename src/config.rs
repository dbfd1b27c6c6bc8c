//! Loading SSH properties from JSON or YAML configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::properties::SshUriProperties;

/// Parse properties from a YAML document.
pub fn from_yaml_str(content: &str) -> Result<SshUriProperties> {
    serde_yaml_ng::from_str(content).context("Failed to parse SSH properties as YAML")
}

/// Parse properties from a JSON document.
pub fn from_json_str(content: &str) -> Result<SshUriProperties> {
    serde_json::from_str(content).context("Failed to parse SSH properties as JSON")
}

/// Load properties from a file.
///
/// `.json` files are parsed as JSON and `.yaml`/`.yml` as YAML. Anything
/// else is tried as JSON first, then YAML.
pub fn load_from_path(path: &Path) -> Result<SshUriProperties> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str());
    let parsed = match ext {
        Some("json") => from_json_str(&content),
        Some("yaml") | Some("yml") => from_yaml_str(&content),
        _ => from_json_str(&content).or_else(|_| from_yaml_str(&content)),
    };
    parsed.with_context(|| format!("Invalid SSH properties in {}", path.display()))
}

/// Default location of the properties file: `~/.config/git-ssh-keys/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("git-ssh-keys").join("config.yaml"))
}

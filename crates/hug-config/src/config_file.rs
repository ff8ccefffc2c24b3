use anyhow::{Context, Result};
use std::path::Path;

/// On-disk format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension; anything but `.json` is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Load config file content from the given path
///
/// Unlike a lookup with fallbacks, the path is mandatory: a missing or
/// unreadable file is an error.
pub fn load_config_file(path: &Path) -> Result<(String, ConfigFormat)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok((content, ConfigFormat::from_path(path)))
}

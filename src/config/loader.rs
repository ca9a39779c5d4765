use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::types::ConfigFile;

/// Checked in order when `--config` is not given.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["volley.toml", "volley.json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn detect(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some(ext) => Err(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }),
            None => Err(ConfigError::MissingExtension),
        }
    }
}

impl ConfigFile {
    /// Reads and parses one config file; the format follows its extension.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown extension, an unreadable file, or
    /// content that does not match the expected keys.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::detect(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        match format {
            ConfigFormat::Toml => {
                toml::from_str(&content).map_err(|source| ConfigError::ParseToml {
                    path: path.to_path_buf(),
                    source,
                })
            }
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|source| ConfigError::ParseJson {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
}

/// Loads the explicit config file, or the first default file that exists.
///
/// # Errors
///
/// Returns an error when the chosen file cannot be read or parsed. A
/// missing default file is not an error.
pub fn load_config(path: Option<&str>) -> Result<Option<ConfigFile>, ConfigError> {
    let chosen = path.map(PathBuf::from).or_else(|| {
        DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists())
    });
    chosen.map(|path| ConfigFile::read(&path)).transpose()
}

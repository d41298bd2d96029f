//! Folder backup config
//!

use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CompressionLevel;

/// The default config file, relative to the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "folder-backup.toml";

/// The backup config.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How much effort to spend compressing.
    pub compression_level: CompressionLevel,

    /// The directory to write archives to, the current directory if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,
}

impl Config {
    /// Tries to load a config from a toml file.
    pub fn load_toml(file_path: PathBuf) -> Result<Self, LoadConfigError> {
        if !file_path.exists() {
            return Err(LoadConfigError::NoFile);
        }

        let contents = fs::read_to_string(file_path).map_err(LoadConfigError::Read)?;
        let config = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Write this config to a toml file, replacing any existing file.
    pub fn save_toml(&self, file_path: PathBuf) -> Result<(), SaveConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(file_path, contents).map_err(SaveConfigError::Write)?;

        Ok(())
    }
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("The file does not exist.")]
    NoFile,

    #[error("Failed to read the file:\n{0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to deserialize the file:\n{0}")]
    Deserialize(#[from] toml::de::Error),
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum SaveConfigError {
    #[error("Failed to serialize the config:\n{0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write the file:\n{0}")]
    Write(#[source] std::io::Error),
}

//! Map tunables, stored as TOML.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;
use tracing::warn;

/// Errors raised while reading or writing map settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read or written.
    #[error("failed to access map settings at {path}: {source}")]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The settings file is not valid TOML for [`MapSettings`].
    #[error("failed to parse map settings: {0}")]
    Parse(#[from] toml::de::Error),
    /// The settings could not be encoded.
    #[error("failed to encode map settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Tunables consumed by the sampling paths.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MapSettings {
    /// Height difference at which relief shading saturates. Zero is rejected.
    pub max_difference: NonZeroU32,
    /// Cave scans starting at or above this y sample the top view instead.
    pub sky_threshold: i32,
    /// Whether the top view computes the relief overlay.
    pub shading: bool,
}

const DEFAULT_MAX_DIFFERENCE: NonZeroU32 = match NonZeroU32::new(10) {
    Some(value) => value,
    None => unreachable!(),
};

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            max_difference: DEFAULT_MAX_DIFFERENCE,
            sky_threshold: 128,
            shading: true,
        }
    }
}

impl MapSettings {
    /// Parse settings, reporting malformed input.
    pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse settings from `path`.
    pub fn load_strict(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load settings from `path`, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match Self::load_strict(path) {
            Ok(settings) => settings,
            Err(SettingsError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "Map settings not found at {}. Using defaults",
                    path.display()
                );
                Self::default()
            }
            Err(err) => {
                warn!("{err}. Using defaults");
                Self::default()
            }
        }
    }

    /// Save settings to `path`, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<(), SettingsError> {
        let toml = toml::to_string_pretty(self)?;
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, toml).map_err(io_err)
    }
}

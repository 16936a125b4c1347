use anyhow::Result;
use mappy_core::DimensionId;
use mappy_map::MapSettings;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/mappy.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    pub world_seed: u64,
    pub dimension: DimensionId,
    /// Chunks painted on each side of the origin chunk.
    pub radius: u32,
    /// Height cave scans start from in roofed dimensions.
    pub viewer_y: i32,
    pub map: MapSettings,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            world_seed: 2024,
            dimension: DimensionId::Overworld,
            radius: 4,
            viewer_y: 64,
            map: MapSettings::default(),
        }
    }
}

impl RenderConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<RenderConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    RenderConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH) {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                RenderConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}

use crate::catalog::{self, CatalogError, MenuRule, RuleCatalog};
use crate::engine::MatchEngine;
use crate::labels::{self, LabelTable};
use crate::normalize::DEFAULT_FLOOR;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Static configuration for the matching engine: confidence floor, overlay
/// preferences, label table, and the menu catalog. Loaded once at startup;
/// the engine built from it is immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub confidence_floor: f32,
    pub overlay: OverlayConfig,
    pub labels: LabelTable,
    pub menus: Vec<MenuRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Draw translated display names instead of raw class ids.
    pub display_names: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            display_names: true,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_floor: DEFAULT_FLOOR,
            overlay: OverlayConfig::default(),
            labels: labels::builtin_labels(),
            menus: catalog::builtin_menus(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl EngineConfig {
    /// Load from the user config file, falling back to the builtin defaults.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_file_path()
            && let Ok(content) = std::fs::read_to_string(config_path)
            && let Ok(config) = toml::from_str(&content)
        {
            return config;
        }
        Self::default()
    }

    /// Load an explicit config file. Unlike [`EngineConfig::load`], read and
    /// parse failures are reported rather than swallowed.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse an in-memory TOML document.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(config_path) = Self::config_file_path() {
            self.save_to(&config_path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("menusense");
            path.push("config.toml");
            path
        })
    }

    /// Validate the catalog and build the immutable engine. Catalog problems
    /// (duplicate names, empty must_have, must/optional overlap) are rejected
    /// here, before any request is served.
    pub fn into_engine(self) -> Result<MatchEngine, CatalogError> {
        let catalog = RuleCatalog::new(self.menus)?;
        Ok(
            MatchEngine::new(catalog, self.labels, self.confidence_floor)
                .overlay_display_names(self.overlay.display_names),
        )
    }
}

//! Configuration management for matcache

pub mod schema;

pub use schema::{Config, MatrixFormat, OutputConfig, SolverConfig};

use crate::error::{MatcacheError, MatcacheResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// File name of the project-local config override
pub const LOCAL_CONFIG_NAME: &str = ".matcache.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("matcache")
            .join("config.toml")
    }

    /// Walk up from `start` looking for a `.matcache.toml`
    pub fn find_local_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load configuration, falling back to defaults if not present
    pub async fn load(&self) -> MatcacheResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> MatcacheResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| MatcacheError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| MatcacheError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load the global config with an optional local file layered on top
    ///
    /// Keys present in the local file win; everything else comes from the
    /// global file or defaults. Each file is validated on its own so errors
    /// name the file that holds the bad key.
    pub async fn load_merged(&self, local: Option<&Path>) -> MatcacheResult<Config> {
        let mut merged = if self.config_path.exists() {
            Self::read_layer(&self.config_path).await?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        if let Some(local) = local {
            debug!("Merging local config {}", local.display());
            let overlay = Self::read_layer(local).await?;
            merge_values(&mut merged, overlay);
        }

        let source = local.unwrap_or(self.config_path.as_path());
        into_config(merged, source)
    }

    /// Read one config file as a TOML tree, rejecting it if it does not
    /// deserialize into [`Config`] by itself
    async fn read_layer(path: &Path) -> MatcacheResult<toml::Value> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| MatcacheError::io(format!("reading config from {}", path.display()), e))?;

        let table: toml::Value = content
            .parse()
            .map_err(|e: toml::de::Error| MatcacheError::ConfigInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        into_config(table.clone(), path)?;
        Ok(table)
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> MatcacheResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            MatcacheError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> MatcacheResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| MatcacheError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn into_config(value: toml::Value, source: &Path) -> MatcacheResult<Config> {
    value
        .try_into()
        .map_err(|e: toml::de::Error| MatcacheError::ConfigInvalid {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Recursively merge `overlay` into `base`; tables merge, everything else replaces
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

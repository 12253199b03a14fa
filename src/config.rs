use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "POKEMUNDO_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Remote service locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Creature catalog API root.
    pub catalog_url: String,
    /// Directory of `{id}.png` thumbnails.
    pub sprite_host: String,
    /// 3D model catalog API root.
    pub models_url: String,
    /// Trainer persistence API root.
    pub trainers_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// How much of the catalog to list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub list_limit: u32,
    pub list_offset: u32,
}

/// Log file location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Override the default log directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            catalog_url: "https://pokeapi.co/api/v2".to_string(),
            sprite_host: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon"
                .to_string(),
            models_url: "https://pokemon-3d-api.onrender.com/v1".to_string(),
            trainers_url: "https://694ad9fb26e870772066bff3.mockapi.io/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            list_limit: 1025,
            list_offset: 0,
        }
    }
}

impl AppConfig {
    /// Load configuration from `$POKEMUNDO_CONFIG` or
    /// `~/.config/pokemundo/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &std::path::Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}; using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}; using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved log directory (override or XDG data default).
    pub fn log_dir(&self) -> PathBuf {
        self.logging.log_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("pokemundo").join("logs"))
                .unwrap_or_else(|| PathBuf::from("logs"))
        })
    }

    fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|d| d.join("pokemundo").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_API_BASE_URL: &str = "https://ems-api-data.onrender.com";

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_sync_interval() -> u64 {
    30
}

fn default_rollover_interval() -> u64 {
    60
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the EMS REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Identity the attendance records are filed under.
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: String,
    /// Path of the local SQLite state database.
    pub state_db: String,
    /// Seconds between reconcile passes in watch mode.
    #[serde(default = "default_sync_interval")]
    pub sync_interval_secs: u64,
    /// Seconds between day-rollover checks in watch mode.
    #[serde(default = "default_rollover_interval")]
    pub rollover_interval_secs: u64,
}

/// Employee identity resolved from the configuration.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: String,
    pub name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            employee_id: String::new(),
            employee_name: String::new(),
            state_db: Self::state_file().to_string_lossy().to_string(),
            sync_interval_secs: default_sync_interval(),
            rollover_interval_secs: default_rollover_interval(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("emsclock")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".emsclock")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("emsclock.conf")
    }

    /// Return the full path of the SQLite state database
    pub fn state_file() -> PathBuf {
        Self::config_dir().join("emsclock.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// A file that cannot be read or parsed is treated as absent.
    pub fn load() -> Self {
        let path = Self::config_file();
        if !path.exists() {
            return Config::default();
        }
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(err) => {
                warn!("could not read {}: {err}, using defaults", path.display());
                return Config::default();
            }
        };
        match serde_yaml::from_str(&content) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("could not parse {}: {err}, using defaults", path.display());
                Config::default()
            }
        }
    }

    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Employee identity, required by every command that touches records.
    pub fn identity(&self) -> AppResult<Identity> {
        if self.employee_id.trim().is_empty() {
            return Err(AppError::NoEmployee);
        }
        Ok(Identity {
            id: self.employee_id.clone(),
            name: self.employee_name.clone(),
        })
    }

    /// Initialize the configuration file and return the resulting config.
    pub fn init_all(
        api: Option<String>,
        employee_id: Option<String>,
        employee_name: Option<String>,
        custom_db: Option<String>,
    ) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB path: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::state_file()
        };

        let config = Config {
            api_base_url: api.unwrap_or_else(default_api_base_url),
            employee_id: employee_id.unwrap_or_default(),
            employee_name: employee_name.unwrap_or_default(),
            state_db: db_path.to_string_lossy().to_string(),
            sync_interval_secs: default_sync_interval(),
            rollover_interval_secs: default_rollover_interval(),
        };
        config.save()?;
        Ok(config)
    }
}

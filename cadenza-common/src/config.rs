//! Configuration loading and data folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the data folder
pub const DATA_FOLDER_ENV: &str = "CADENZA_DATA_FOLDER";

/// Default HTTP port for the Composer Registry service (cadenza-cr)
pub const DEFAULT_PORT: u16 = 5727;

/// Bootstrap configuration loaded from the optional TOML file
///
/// These settings cannot change while the service runs; restart to pick up
/// edits.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Folder holding composers.json and pieces.json
    #[serde(default)]
    pub data_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log filter used when RUST_LOG is unset (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub data_folder: PathBuf,
    pub port: u16,
    pub log_level: String,
}

impl Config {
    /// Resolve the service configuration from all layered sources.
    ///
    /// Priority order for each value:
    /// 1. Command-line argument (or its environment fallback via clap)
    /// 2. `CADENZA_DATA_FOLDER` environment variable (data folder only)
    /// 3. TOML config file
    /// 4. Compiled default
    pub fn resolve(
        cli_data_folder: Option<PathBuf>,
        cli_port: Option<u16>,
        config_path: Option<&Path>,
    ) -> Result<Self> {
        let toml_config = load_toml_config(config_path)?;

        let data_folder = resolve_data_folder(cli_data_folder.as_deref(), &toml_config);
        let port = cli_port.or(toml_config.port).unwrap_or(DEFAULT_PORT);
        let log_level = toml_config.logging.level;

        Ok(Config {
            data_folder,
            port,
            log_level,
        })
    }
}

/// Load the TOML config file.
///
/// With an explicit path the file must exist and parse. Otherwise the
/// platform locations are probed, and a missing file simply means defaults;
/// absent configuration never stops startup.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match find_config_file() {
            Some(path) => path,
            None => return Ok(TomlConfig::default()),
        },
    };

    let text = std::fs::read_to_string(&path)?;
    toml::from_str(&text)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Locate the config file in the platform locations.
///
/// The user config directory is checked first, then `/etc/cadenza` on Linux.
fn find_config_file() -> Option<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("cadenza").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/cadenza/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Resolve the data folder from the layered sources
pub fn resolve_data_folder(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    // Priority 1: command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: environment variable
    if let Ok(path) = std::env::var(DATA_FOLDER_ENV) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml_config.data_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_data_folder()
}

/// OS-dependent default data folder
pub fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("cadenza"))
        .unwrap_or_else(|| PathBuf::from("./cadenza_data"))
}

/// Create the data folder when it does not exist yet
pub fn ensure_data_folder(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

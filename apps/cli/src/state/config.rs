//! # Configuration State
//!
//! Resolves where the session database lives and where exports go.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`)
//! 2. Environment variables (`KASSA_DB_PATH`, `KASSA_EXPORT_DIR`)
//! 3. Config file (`config.toml` in the platform config dir)
//! 4. Defaults (this file)
//!
//! ## Example config.toml
//! ```toml
//! database_path = "/srv/kassa/kassa.db"
//! export_dir = "/home/anna/Dokument/kassa"
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const DB_FILE_NAME: &str = "kassa.db";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the database path.
pub const ENV_DB_PATH: &str = "KASSA_DB_PATH";

/// Environment variable overriding the export directory.
pub const ENV_EXPORT_DIR: &str = "KASSA_EXPORT_DIR";

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`FileConfig`].
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// No platform data directory and no explicit database path.
    #[error("Could not determine app data directory")]
    NoDataDir,
}

/// What `config.toml` may contain. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub database_path: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Reads a config file. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(FileConfig::default());
        }

        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved application configuration.
///
/// Read-only after startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// SQLite file holding the session slot.
    pub database_path: PathBuf,

    /// Directory `kassa export` writes into when `--out` is not given.
    pub export_dir: PathBuf,
}

/// Explicit overrides, highest priority. Filled from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database_path: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

/// Environment values, split out so tests never touch the process env.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub database_path: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

impl EnvConfig {
    /// Reads `KASSA_*` variables. Empty values count as unset.
    pub fn from_env() -> Self {
        let var = |name: &str| {
            std::env::var_os(name)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };

        EnvConfig {
            database_path: var(ENV_DB_PATH),
            export_dir: var(ENV_EXPORT_DIR),
        }
    }
}

impl ConfigState {
    /// Loads configuration from flags, environment, config file and defaults.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let dirs = project_dirs();
        let config_path = overrides
            .config_file
            .clone()
            .or_else(|| dirs.as_ref().map(|d| d.config_dir().join(CONFIG_FILE_NAME)));

        let file = match config_path {
            Some(path) => FileConfig::load(&path)?,
            None => FileConfig::default(),
        };

        let default_db = dirs.map(|d| d.data_dir().join(DB_FILE_NAME));
        Self::resolve(overrides, EnvConfig::from_env(), file, default_db)
    }

    /// Merges the sources in priority order.
    pub fn resolve(
        overrides: ConfigOverrides,
        env: EnvConfig,
        file: FileConfig,
        default_db: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let database_path = overrides
            .database_path
            .or(env.database_path)
            .or(file.database_path)
            .or(default_db)
            .ok_or(ConfigError::NoDataDir)?;

        let export_dir = env
            .export_dir
            .or(file.export_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        debug!(
            database_path = %database_path.display(),
            export_dir = %export_dir.display(),
            "Configuration resolved"
        );

        Ok(ConfigState {
            database_path,
            export_dir,
        })
    }
}

/// Platform-specific project directories.
///
/// - **macOS**: `~/Library/Application Support/se.svensk-kassa.kassa`
/// - **Windows**: `%APPDATA%\svensk-kassa\kassa`
/// - **Linux**: `~/.local/share/kassa`, `~/.config/kassa`
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("se", "svensk-kassa", "kassa")
}

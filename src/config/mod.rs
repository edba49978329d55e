use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_WIDTH: f64 = 393.0;
pub const DEFAULT_BASE_HEIGHT: f64 = 852.0;

const DIMENSIONS_CONFIG_FILE: &str = "dimensions.json";

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to read dimensions config: {path}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse dimensions config")]
    ParseConfig(#[from] serde_json::Error),
}

/// Design-time canvas size that responsive scale factors are computed against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseReference {
    #[serde(default = "default_base_width")]
    pub base_width: f64,
    #[serde(default = "default_base_height")]
    pub base_height: f64,
}

impl BaseReference {
    pub const fn new(base_width: f64, base_height: f64) -> Self {
        Self {
            base_width,
            base_height,
        }
    }

    pub fn from_json_str(serialized: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(serialized)?)
    }
}

impl Default for BaseReference {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_WIDTH, DEFAULT_BASE_HEIGHT)
    }
}

fn default_base_width() -> f64 {
    DEFAULT_BASE_WIDTH
}

fn default_base_height() -> f64 {
    DEFAULT_BASE_HEIGHT
}

/// Loads `dimensions.json` for `app_dir`, falling back to the defaults on any failure.
pub fn load_base_reference(app_dir: &str) -> BaseReference {
    let (xdg_config_home, home) = config_env_dirs();
    load_base_reference_or_default(app_dir, xdg_config_home.as_deref(), home.as_deref())
}

fn load_base_reference_or_default(
    app_dir: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> BaseReference {
    load_base_reference_with(app_dir, xdg_config_home, home).unwrap_or_else(|err| {
        tracing::warn!(?err, app_dir, "failed to load dimensions config; using defaults");
        BaseReference::default()
    })
}

pub fn try_load_base_reference(app_dir: &str) -> ConfigResult<BaseReference> {
    let (xdg_config_home, home) = config_env_dirs();
    load_base_reference_with(app_dir, xdg_config_home.as_deref(), home.as_deref())
}

fn load_base_reference_with(
    app_dir: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> ConfigResult<BaseReference> {
    let path = app_config_path(app_dir, DIMENSIONS_CONFIG_FILE, xdg_config_home, home)?;
    if !path.exists() {
        tracing::debug!(?path, "no dimensions config; using defaults");
        return Ok(BaseReference::default());
    }

    let serialized = fs::read_to_string(&path).map_err(|source| ConfigError::ReadConfig {
        path: path.clone(),
        source,
    })?;
    BaseReference::from_json_str(&serialized)
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> ConfigResult<PathBuf> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(xdg_config_home: Option<&Path>, home: Option<&Path>) -> ConfigResult<PathBuf> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_FILE_NAME: &str = "fleetdesk.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    /// Unset means requests never time out.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Command-line values win over the file.
    pub fn with_overrides(mut self, api_url: Option<String>, log_level: Option<String>) -> Self {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        if let Some(log_level) = log_level {
            self.log_level = log_level;
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| data_dir().map(|dir| dir.join(LOG_FILE_NAME)))
    }
}

/// Loads from `explicit` if given, else from the usual config location.
/// A missing file means defaults; a broken one is an error.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str::<Config>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn config_path() -> Option<PathBuf> {
    config_path_with(|key| std::env::var_os(key))
}

fn config_path_with(env: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    if let Some(path) = env("FLEETDESK_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = env("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("fleetdesk").join("config.toml"));
    }
    if let Some(home) = env("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("fleetdesk").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "fleetdesk", "fleetdesk")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("fleetdesk"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("fleetdesk"));
    }
    directories::ProjectDirs::from("io", "fleetdesk", "fleetdesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

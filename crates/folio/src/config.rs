use crate::carousel::{NARROW_BREAKPOINT, NARROW_RADIUS, Tuning, ViewportTier, WIDE_RADIUS};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/folio.sock";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub breakpoint: f64,
    pub narrow_radius: f64,
    pub wide_radius: f64,
    /// Pins the tier regardless of width.
    pub tier: Option<ViewportTier>,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            breakpoint: NARROW_BREAKPOINT,
            narrow_radius: NARROW_RADIUS,
            wide_radius: WIDE_RADIUS,
            tier: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub front: [f64; 4],
    pub back: [f64; 4],
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            front: [1.0, 1.0, 1.0, 1.0],
            back: [0.15, 0.15, 0.2, 0.6],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    pub manifest: PathBuf,
    pub url_prefix: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("public/content.json"),
            url_prefix: "/content".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub socket: PathBuf,
    pub frame_interval_ms: u64,
    pub viewport_width: f64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            socket: PathBuf::from(SOCKET_PATH),
            frame_interval_ms: 16,
            viewport_width: 1920.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub carousel: Tuning,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub daemon: DaemonConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "folio", "folio").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

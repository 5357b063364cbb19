//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::chart::ChartConfig;
use crate::dataset::{
    DatasetError, DatasetSpec, ValueRange, DEFAULT_DEPARTMENTS, DEFAULT_SEED, DEFAULT_YEAR,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Synthetic dataset configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_year")]
    pub year: i32,

    #[serde(default = "default_departments")]
    pub departments: Vec<String>,

    /// Revenue range `[min, max)`
    #[serde(default = "default_revenue")]
    pub revenue: [u32; 2],

    /// Margin percent range `[min, max)`
    #[serde(default = "default_margin")]
    pub margin_percent: [f64; 2],

    /// Headcount range `[min, max)`
    #[serde(default = "default_headcount")]
    pub headcount: [u32; 2],
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_year() -> i32 {
    DEFAULT_YEAR
}

fn default_departments() -> Vec<String> {
    DEFAULT_DEPARTMENTS.iter().map(|d| d.to_string()).collect()
}

fn default_revenue() -> [u32; 2] {
    [100, 1000]
}

fn default_margin() -> [f64; 2] {
    [5.0, 25.0]
}

fn default_headcount() -> [u32; 2] {
    [50, 500]
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            year: default_year(),
            departments: default_departments(),
            revenue: default_revenue(),
            margin_percent: default_margin(),
            headcount: default_headcount(),
        }
    }
}

impl DatasetConfig {
    /// Validate into a generator spec
    pub fn to_spec(&self) -> Result<DatasetSpec, DatasetError> {
        DatasetSpec::new(
            self.seed,
            self.year,
            self.departments.clone(),
            ValueRange::new(self.revenue[0], self.revenue[1]),
            ValueRange::new(self.margin_percent[0], self.margin_percent[1]),
            ValueRange::new(self.headcount[0], self.headcount[1]),
        )
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Browser tab title
    #[serde(default = "default_page_title")]
    pub page_title: String,

    /// URL of the plotly.js bundle loaded by the dashboard page
    #[serde(default = "default_plotly_url")]
    pub plotly_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_page_title() -> String {
    "Proof of concept animated scatter chart".to_string()
}

fn default_plotly_url() -> String {
    "https://cdn.plot.ly/plotly-2.35.2.min.js".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            page_title: default_page_title(),
            plotly_url: default_plotly_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Default config file locations, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("scatterboard").join("config.toml")),
            Some(PathBuf::from("/etc/scatterboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    ///
    /// Returns the file that was used, if any. A file that exists but
    /// cannot be read or parsed is an error, not a fallback to defaults.
    pub fn load_default() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first existing file among `paths`, else env-only defaults
    pub fn load_first(paths: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match paths.iter().find(|p| p.exists()) {
            Some(path) => Ok((Self::load_with_env(path)?, Some(path.clone()))),
            None => Ok((Self::from_env(), None)),
        }
    }

    /// Validate the dataset section
    pub fn dataset_spec(&self) -> Result<DatasetSpec, ConfigError> {
        self.dataset.to_spec().map_err(ConfigError::Invalid)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("SCATTERBOARD_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SCATTERBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Ok(seed) = std::env::var("SCATTERBOARD_SEED") {
            if let Ok(s) = seed.parse() {
                self.dataset.seed = s;
            }
        }

        if let Ok(level) = std::env::var("SCATTERBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SCATTERBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid dataset configuration: {0}")]
    Invalid(#[from] DatasetError),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Scatterboard Configuration
#
# Environment variables override these settings:
# - SCATTERBOARD_HOST
# - SCATTERBOARD_PORT
# - SCATTERBOARD_SEED
# - SCATTERBOARD_LOG_LEVEL
# - SCATTERBOARD_LOG_FORMAT

[dataset]
# Seed for the random generator; the same seed always yields the same data
seed = 42

# Year whose twelve months make up the dataset
year = 2023

# Department labels, one row per department and month
departments = ["HR", "BU2", "BU3", "Finance", "IT", "Sales"]

# Value ranges, lower bound inclusive, upper bound exclusive
revenue = [100, 1000]
margin_percent = [5.0, 25.0]
headcount = [50, 500]

[chart]
title = "Animated Scatter Plot: Revenue vs Margin by Department"

# Fixed axis ranges keep bubbles comparable between frames
x_range = [0.0, 30.0]
y_range = [0.0, 1500.0]

# Playback timing
frame_duration_ms = 1000
transition_duration_ms = 300
easing = "quadratic-in-out"

# Diameter of the largest bubble in pixels
max_marker_px = 20.0

height = 600

[server]
host = "0.0.0.0"
port = 8501
page_title = "Proof of concept animated scatter chart"
plotly_url = "https://cdn.plot.ly/plotly-2.35.2.min.js"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

//! Application State
//!
//! Shared state accessible by all handlers.
//! Read-only and wrapped in Arc for sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::pipeline::Pipeline;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Generate/filter/chart pipeline, run fresh on every request
    pub pipeline: Arc<Pipeline>,
    /// Server configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(pipeline: Pipeline, config: ApiConfig) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Browser tab title of the dashboard
    pub page_title: String,
    /// plotly.js bundle URL
    pub plotly_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ServerConfig::default().into()
    }
}

impl From<ServerConfig> for ApiConfig {
    fn from(config: ServerConfig) -> Self {
        Self {
            host: config.host,
            port: config.port,
            page_title: config.page_title,
            plotly_url: config.plotly_url,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

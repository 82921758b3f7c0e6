use std::env;

use mind_rs::StoreConfig;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Bind address (0.0.0.0 for LAN, 127.0.0.1 for localhost)
    pub bind_addr: String,
    /// CORS allowed origins (comma-separated in env var, "*" for any)
    pub cors_origins: Vec<String>,
    /// Maximum upload body size in bytes
    pub max_upload_size: usize,
    /// Live window length in seconds
    pub window_length: f64,
    /// Cursor step per live poll in seconds
    pub scroll_step: f64,
    /// Default trend decimation bound
    pub trend_points: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: "127.0.0.1".to_string(),
            cors_origins: vec!["*".to_string()],
            max_upload_size: 64 * 1024 * 1024,
            window_length: 10.0,
            scroll_step: 0.5,
            trend_points: 200,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let config = Self {
            port: match env::var("MINDVIEW_PORT") {
                Ok(v) => v.parse().map_err(|_| ConfigError::InvalidPort)?,
                Err(_) => defaults.port,
            },
            bind_addr: env::var("MINDVIEW_BIND_ADDR").unwrap_or(defaults.bind_addr),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_upload_size),
            window_length: env::var("LIVE_WINDOW_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.window_length),
            scroll_step: env::var("LIVE_SCROLL_STEP_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.scroll_step),
            trend_points: env::var("TREND_POINTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.trend_points),
        };

        if !config.window_length.is_finite() || config.window_length <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "LIVE_WINDOW_SECONDS must be positive".to_string(),
            ));
        }
        if !config.scroll_step.is_finite() || config.scroll_step <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "LIVE_SCROLL_STEP_SECONDS must be positive".to_string(),
            ));
        }
        if config.trend_points == 0 {
            return Err(ConfigError::InvalidValue(
                "TREND_POINTS must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }

    /// Get the full bind address (addr:port)
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Engine knobs derived from this configuration
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            window_length: self.window_length,
            scroll_step: self.scroll_step,
            trend_points: self.trend_points,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

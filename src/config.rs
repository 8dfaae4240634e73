use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// PostgreSQL URL of the trip/photo store; the in-memory store is used when unset
    #[serde(default)]
    pub database_url: Option<String>,

    /// JSON seed for the in-memory store
    #[serde(default)]
    pub travel_data_path: Option<PathBuf>,

    /// Replaces the built-in destination catalog
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Upper bound on photos returned by a single nearby query
    #[serde(default = "default_max_nearby_results")]
    pub max_nearby_results: usize,

    /// `tracing_subscriber` filter directive, e.g. `info,trip_insights_api=debug`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_nearby_results() -> usize {
    500
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            travel_data_path: None,
            catalog_path: None,
            max_nearby_results: default_max_nearby_results(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.max_nearby_results == 0 {
            anyhow::bail!("MAX_NEARBY_RESULTS must be at least 1");
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

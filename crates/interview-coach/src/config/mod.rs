use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_CRITIQUE_MODEL: &str = "gpt-4o-mini";
const DEFAULT_CRITIQUE_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_CRITIQUE_TIMEOUT_SECS: u64 = 30;

/// Deployment stage, read from `APP_ENV`. Unknown values fall back to development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Development;
        };
        match raw.to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Everything the coach needs at startup, resolved from the process
/// environment (and a `.env` file when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub catalog: CatalogConfig,
    pub critique: CritiqueConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: AppEnvironment::parse(non_empty_var("APP_ENV").as_deref()),
            server: ServerConfig::from_env()?,
            telemetry: TelemetryConfig {
                log_level: non_empty_var("APP_LOG_LEVEL")
                    .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            },
            catalog: CatalogConfig {
                path: non_empty_var("QUESTION_CATALOG_PATH").map(PathBuf::from),
            },
            critique: CritiqueConfig::from_env()?,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let port = match non_empty_var("APP_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort)?,
            None => DEFAULT_PORT,
        };
        Ok(Self {
            host: non_empty_var("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse::<IpAddr>()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where to read the question catalog from. `None` selects the built-in catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

/// Connection settings for the external critique service.
#[derive(Clone)]
pub struct CritiqueConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl CritiqueConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = match non_empty_var("CRITIQUE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout)?,
            None => DEFAULT_CRITIQUE_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key: non_empty_var("OPENAI_API_KEY"),
            model: non_empty_var("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_CRITIQUE_MODEL.to_string()),
            base_url: non_empty_var("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_CRITIQUE_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for CritiqueConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_CRITIQUE_MODEL.to_string(),
            base_url: DEFAULT_CRITIQUE_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_CRITIQUE_TIMEOUT_SECS),
        }
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for CritiqueConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CritiqueConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "CRITIQUE_TIMEOUT_SECS must be a positive number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTimeout => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

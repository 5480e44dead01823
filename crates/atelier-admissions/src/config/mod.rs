use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the admissions service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub narrative: NarrativeConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let model = NarrativeModel::parse(
            &env::var("NARRATIVE_MODEL").unwrap_or_else(|_| "template".to_string()),
        )?;
        let max_chunk_chars = match env::var("NARRATIVE_MAX_CHUNK") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidChunkSize { value: raw })?,
            Err(_) => DEFAULT_MAX_CHUNK_CHARS,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            narrative: NarrativeConfig {
                model,
                max_chunk_chars,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

pub const DEFAULT_MAX_CHUNK_CHARS: usize = 80;

/// Narrative backends the service knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeModel {
    /// Deterministic offline narrator.
    Template,
}

impl NarrativeModel {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "template" | "offline" => Ok(Self::Template),
            other => Err(ConfigError::UnsupportedNarrativeModel {
                value: other.to_string(),
            }),
        }
    }
}

/// Commentary backend selection and chat streaming granularity.
#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    pub model: NarrativeModel,
    pub max_chunk_chars: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    UnsupportedNarrativeModel { value: String },
    InvalidChunkSize { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::UnsupportedNarrativeModel { value } => {
                write!(f, "NARRATIVE_MODEL '{value}' is not supported")
            }
            ConfigError::InvalidChunkSize { value } => {
                write!(f, "NARRATIVE_MAX_CHUNK must be a positive integer, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::UnsupportedNarrativeModel { .. }
            | ConfigError::InvalidChunkSize { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("NARRATIVE_MODEL");
        env::remove_var("NARRATIVE_MAX_CHUNK");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.narrative.model, NarrativeModel::Template);
        assert_eq!(config.narrative.max_chunk_chars, DEFAULT_MAX_CHUNK_CHARS);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "seventy");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));
        reset_env();
    }

    #[test]
    fn rejects_unknown_narrative_model() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("NARRATIVE_MODEL", "oracle");
        match AppConfig::load() {
            Err(ConfigError::UnsupportedNarrativeModel { value }) => assert_eq!(value, "oracle"),
            other => panic!("expected unsupported model, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn rejects_zero_chunk_size() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("NARRATIVE_MAX_CHUNK", "0");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidChunkSize { .. })
        ));
        env::set_var("NARRATIVE_MAX_CHUNK", "120");
        let config = AppConfig::load().expect("chunk size parses");
        assert_eq!(config.narrative.max_chunk_chars, 120);
        reset_env();
    }
}

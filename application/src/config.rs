//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: Server,

    /// Service configuration.
    #[serde(default)]
    pub service: Service,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Service {
    /// Artificial latency of the service operations.
    pub latency: Latency,

    /// Mock data seeding configuration.
    pub seed: Seed,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            latency: Latency { list, read, write },
            seed: _,
        } = value;
        Self {
            latency: service::Latency { list, read, write },
        }
    }
}

/// Artificial latency configuration, imitating a remote API.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Latency {
    /// Latency of listing users.
    #[default(time::Duration::from_millis(500))]
    #[serde(with = "humantime_serde")]
    pub list: time::Duration,

    /// Latency of reading a single user.
    #[default(time::Duration::from_millis(200))]
    #[serde(with = "humantime_serde")]
    pub read: time::Duration,

    /// Latency of modifying users.
    #[default(time::Duration::from_millis(300))]
    #[serde(with = "humantime_serde")]
    pub write: time::Duration,
}

/// Mock data seeding configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Seed {
    /// Number of mock users to generate on startup.
    #[default(100)]
    pub users: u64,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::Config;

    #[test]
    fn defaults_imitate_remote_api() {
        let config = Config::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cors.origins, ["*"]);
        assert_eq!(config.service.seed.users, 100);

        let service = service::Config::from(config.service);
        assert_eq!(service.latency.list, Duration::from_millis(500));
        assert_eq!(service.latency.read, Duration::from_millis(200));
        assert_eq!(service.latency.write, Duration::from_millis(300));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::new("definitely/not/existing.toml").unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.service.seed.users, 100);
    }
}

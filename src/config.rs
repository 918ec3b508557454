//! Process configuration, resolved once at startup from the environment.

use std::env;

use thiserror::Error;
use tracing::info;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "word_game";

/// Errors raised while interpreting configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A port variable was set but does not hold a valid TCP port.
    #[error("invalid port `{value}` in `{var}`")]
    InvalidPort {
        /// Variable that held the value.
        var: &'static str,
        /// Raw value found.
        value: String,
    },
    /// `GAME_STORE` names a backend this binary does not know.
    #[error("unknown storage backend `{0}` (expected `mongo` or `memory`)")]
    UnknownBackend(String),
}

/// Which persistence backend the server should use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// MongoDB reachable through a connection string.
    Mongo {
        /// Connection string.
        uri: String,
        /// Database holding the games collection.
        database: String,
    },
    /// Process-local store; data is lost on restart.
    Memory,
}

/// Immutable runtime configuration handed to the server bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// TCP port the HTTP server binds to.
    pub port: u16,
    /// Storage backend selection and its connection settings.
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            port = config.port,
            backend = config.storage.backend_name(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_of = |keys: &[&'static str]| {
            keys.iter().find_map(|key| {
                lookup(key)
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| (*key, value))
            })
        };

        let port = match first_of(&["PORT", "SERVER_PORT"]) {
            Some((var, value)) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { var, value })?,
            None => DEFAULT_PORT,
        };

        let backend = first_of(&["GAME_STORE"])
            .map(|(_, value)| value.trim().to_ascii_lowercase())
            .unwrap_or_else(|| "mongo".into());

        let storage = match backend.as_str() {
            "mongo" | "mongodb" => StorageConfig::Mongo {
                uri: first_of(&["DB_CONNECTION", "MONGO_URI"])
                    .map(|(_, value)| value)
                    .unwrap_or_else(|| DEFAULT_MONGO_URI.into()),
                database: first_of(&["DB_NAME", "MONGO_DB"])
                    .map(|(_, value)| value)
                    .unwrap_or_else(|| DEFAULT_DATABASE.into()),
            },
            "memory" => StorageConfig::Memory,
            _ => return Err(ConfigError::UnknownBackend(backend)),
        };

        Ok(Self { port, storage })
    }
}

impl StorageConfig {
    fn backend_name(&self) -> &'static str {
        match self {
            StorageConfig::Mongo { .. } => "mongo",
            StorageConfig::Memory => "memory",
        }
    }
}

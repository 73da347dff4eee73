use std::env;

use sqlx::mysql::MySqlConnectOptions;

use crate::store::StoreError;

pub mod cors;

pub use cors::create_cors_layer;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_PORT: u16 = 3306;

/// Environment keys the database connection cannot do without, in reporting order.
pub const REQUIRED_DB_VARS: [&str; 4] = ["DB_HOST", "DB_USER", "DB_PASSWORD", "DB_NAME"];

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid PORT '{}', falling back to {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            port,
            database: DatabaseConfig::from_lookup(lookup),
        }
    }
}

/// Raw database settings. Nothing is validated until a connection is requested,
/// so the server can come up (and answer `/health`) without them.
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub host: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub port: u16,
}

impl DatabaseConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let port = non_empty("DB_PORT")
            .and_then(|raw| match raw.trim().parse() {
                Ok(port) => Some(port),
                Err(_) => {
                    tracing::warn!("Invalid DB_PORT '{}', using {}", raw, DEFAULT_DB_PORT);
                    None
                }
            })
            .unwrap_or(DEFAULT_DB_PORT);

        Self {
            host: non_empty("DB_HOST"),
            user: non_empty("DB_USER"),
            password: non_empty("DB_PASSWORD"),
            name: non_empty("DB_NAME"),
            port,
        }
    }

    pub fn missing_keys(&self) -> Vec<&'static str> {
        let values = [&self.host, &self.user, &self.password, &self.name];
        REQUIRED_DB_VARS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.is_none())
            .map(|(key, _)| *key)
            .collect()
    }

    pub fn connect_options(&self) -> Result<MySqlConnectOptions, StoreError> {
        match (&self.host, &self.user, &self.password, &self.name) {
            (Some(host), Some(user), Some(password), Some(name)) => Ok(MySqlConnectOptions::new()
                .host(host)
                .port(self.port)
                .username(user)
                .password(password)
                .database(name)),
            _ => {
                let missing = self.missing_keys();
                tracing::error!("Missing environment variables: {}", missing.join(", "));
                Err(StoreError::Configuration { missing })
            }
        }
    }
}

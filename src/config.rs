use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};
use std::{env, fmt};

const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
/// One year. Longer lifetimes are rejected at startup.
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Signing secret for access tokens. Redacted in `Debug` output.
    pub jwt_secret: SecretString,
    pub token_ttl: Duration,
    pub database_url: Option<String>,
    pub server_port: u16,
    pub server_host: String,
    pub cors_allowed_origin: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is absent or empty.
    Missing(&'static str),
    /// A variable is present but cannot be parsed.
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => write!(f, "{} has invalid value {:?}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// A missing `JWT_SECRET` is an error; the caller is expected to abort startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let jwt_secret = non_empty("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_ttl_hours = match non_empty("JWT_EXPIRATION_HOURS") {
            Some(value) => match value.parse::<i64>() {
                Ok(hours) if (1..=MAX_TOKEN_TTL_HOURS).contains(&hours) => hours,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "JWT_EXPIRATION_HOURS",
                        value,
                    })
                }
            },
            None => DEFAULT_TOKEN_TTL_HOURS,
        };

        let server_port = match non_empty("SERVER_PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "SERVER_PORT",
                value,
            })?,
            None => 8080,
        };

        Ok(Self {
            jwt_secret: SecretString::from(jwt_secret),
            token_ttl: Duration::hours(token_ttl_hours),
            database_url: non_empty("DATABASE_URL"),
            server_port,
            server_host: non_empty("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            cors_allowed_origin: non_empty("CORS_ALLOWED_ORIGIN"),
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn jwt_secret(&self) -> &str {
        self.jwt_secret.expose_secret()
    }
}

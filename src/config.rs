//! Server configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). The CORS allow-list is configuration
//! input too and is validated here, so a bad origin stops the process
//! before the database is ever contacted.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 4000;

/// Origins allowed when `CORS_ALLOWED_ORIGINS` is not set.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://localhost:5174",
    "https://techsnacc-client.vercel.app",
    "https://techsnacc-admin-five.vercel.app",
];

/// Configuration errors detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// An allow-list entry is not a bare `http`/`https` origin.
    #[error("invalid CORS origin {origin:?}: {reason}")]
    InvalidOrigin {
        /// The offending entry.
        origin: String,
        /// Why the entry was rejected.
        reason: String,
    },
}

/// Top-level server configuration.
///
/// Loaded once at startup via [`ServerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind the listener to.
    pub bind_host: IpAddr,

    /// Listener port.
    pub port: u16,

    /// Document store settings.
    pub database: DatabaseConfig,

    /// Cross-origin policy.
    pub cors: CorsConfig,

    /// Maximum accepted request body size in bytes.
    pub body_limit_bytes: usize,

    /// Per-request processing timeout.
    pub request_timeout: Duration,
}

/// Document store connection settings.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Connection URI. May carry credentials, so it is never logged.
    pub url: String,

    /// Maximum number of pooled connections.
    pub max_connections: u32,

    /// Upper bound for the single startup connection attempt.
    pub connect_timeout: Duration,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Cross-origin allow-list, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Validated origins (`scheme://host[:port]`).
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| (*o).to_string())
                .collect(),
        }
    }
}

impl CorsConfig {
    /// Parses a comma-separated allow-list, validating every entry.
    ///
    /// Blank entries are skipped and duplicates collapse onto their first
    /// occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOrigin`] for an entry that is not a
    /// bare origin, or [`ConfigError::Invalid`] when the list is empty.
    pub fn parse_list(raw: &str) -> Result<Self, ConfigError> {
        let mut allowed_origins: Vec<String> = Vec::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let origin = validate_origin(entry)?;
            if !allowed_origins.contains(&origin) {
                allowed_origins.push(origin);
            }
        }
        if allowed_origins.is_empty() {
            return Err(ConfigError::Invalid {
                key: "CORS_ALLOWED_ORIGINS",
                reason: "allow-list is empty".to_string(),
            });
        }
        Ok(Self { allowed_origins })
    }

    /// Returns `true` if `origin` is on the allow-list.
    #[must_use]
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }
}

/// Checks that `entry` is exactly an origin and returns its canonical form.
fn validate_origin(entry: &str) -> Result<String, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidOrigin {
        origin: entry.to_string(),
        reason: reason.to_string(),
    };

    let url = url::Url::parse(entry).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not carry a path, query or fragment"));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid("must not carry credentials"));
    }
    // Browsers send the origin without a trailing slash.
    let canonical = url.origin().ascii_serialization();
    if canonical != entry.trim_end_matches('/') {
        return Err(invalid(&format!("not in canonical form, expected {canonical}")));
    }
    Ok(canonical)
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `DATABASE_URL` is missing or any value
    /// fails to parse or validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_host = parse_var(&lookup, "BIND_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port = parse_var(&lookup, "PORT", DEFAULT_PORT)?;

        let url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let max_connections = parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", 10_u32)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                reason: "must be at least 1".to_string(),
            });
        }
        let connect_timeout_secs = parse_var(&lookup, "DATABASE_CONNECT_TIMEOUT_SECS", 10_u64)?;

        let cors = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => CorsConfig::parse_list(&raw)?,
            None => CorsConfig::default(),
        };

        let body_limit_bytes = parse_var(&lookup, "BODY_LIMIT_BYTES", 100 * 1024_usize)?;
        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30_u64)?;

        Ok(Self {
            bind_host,
            port,
            database: DatabaseConfig {
                url,
                max_connections,
                connect_timeout: Duration::from_secs(connect_timeout_secs),
            },
            cors,
            body_limit_bytes,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    /// Socket address the listener binds to.
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_host, self.port)
    }
}

/// Parses an optional variable as `T`, returning `default` when unset or
/// blank.
fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: format!("{raw:?}: {e}"),
        }),
    }
}

//! Environment-driven configuration.
//!
//! | Variable | Default |
//! |---|---|
//! | `SERVER_HOST` | `0.0.0.0` |
//! | `SERVER_PORT` | `8080` |
//! | `DATABASE_URL` | required |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |
//! | `REQUEST_TIMEOUT_SECS` | `10` (`0` disables the deadline) |

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

#[derive(Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests do not have to touch
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = parse_or(&lookup, "SERVER_HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_or(&lookup, "SERVER_PORT", 8080)?;
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Config("missing environment variable `DATABASE_URL`".into()))?;
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;
        let timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 10)?;

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            request_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("invalid `{key}` value `{raw}`: {e}"))),
        None => Ok(default),
    }
}

// The connection string carries credentials.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

//! Service settings loaded via OrthoConfig.
//!
//! Values come from `CARS_*` environment variables, CLI flags or a config
//! file. Database credentials have no built-in defaults.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Car store selected at start-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local map; contents vanish on restart.
    #[default]
    Memory,
    /// Hand-written SQL over the synchronous `postgres` driver.
    Postgres,
    /// Diesel query builder over an async connection pool.
    Diesel,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
            Self::Diesel => "diesel",
        }
    }

}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "sql" => Ok(Self::Postgres),
            "diesel" | "orm" => Ok(Self::Diesel),
            _ => Err(SettingsError::UnknownStore {
                value: value.to_owned(),
            }),
        }
    }
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown car store `{value}`; expected memory, postgres or diesel")]
    UnknownStore { value: String },
    #[error("missing setting `{name}` required by the {store} store")]
    Missing { name: &'static str, store: StoreBackend },
    #[error("`{value}` is not an IP address")]
    InvalidHost { value: String },
    #[error("invalid database url: {message}")]
    InvalidDatabaseUrl { message: String },
    #[error("`{name}` must be greater than zero")]
    Zero { name: &'static str },
}

/// Configuration values for the car service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CARS")]
pub struct CarServiceSettings {
    /// Address the HTTP listener binds to.
    pub host: Option<String>,
    /// Port the HTTP listener binds to.
    pub port: Option<u16>,
    /// Store backend: `memory`, `postgres` or `diesel`.
    pub store: Option<String>,
    /// Start the memory store without the demo fleet.
    #[ortho_config(default = false)]
    pub empty_store: bool,
    /// Full connection URL; overrides the `db_*` parts.
    pub database_url: Option<String>,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_name: Option<String>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    /// Deadline for a single store call, in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Maximum connections held by the Diesel pool.
    pub pool_max_size: Option<u32>,
}

impl CarServiceSettings {
    /// Socket address for the HTTP listener.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref() {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| SettingsError::InvalidHost {
                    value: raw.to_owned(),
                })?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Parse the configured store, defaulting to memory.
    pub fn store(&self) -> Result<StoreBackend, SettingsError> {
        self.store
            .as_deref()
            .map_or(Ok(StoreBackend::default()), StoreBackend::from_str)
    }

    /// Whether the memory store starts with the demo fleet.
    pub fn seed_fleet(&self) -> bool {
        !self.empty_store
    }

    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS) {
            0 => Err(SettingsError::Zero {
                name: "request_timeout_ms",
            }),
            millis => Ok(Duration::from_millis(millis)),
        }
    }

    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE) {
            0 => Err(SettingsError::Zero {
                name: "pool_max_size",
            }),
            size => Ok(size),
        }
    }

    /// Return the connection URL for `store`.
    ///
    /// `database_url` wins when set. Otherwise the URL is assembled from the
    /// `db_*` parts with user and password percent-encoded.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Missing`] when neither a URL nor `db_name` and
    /// `db_user` are configured.
    pub fn database_url(&self, store: StoreBackend) -> Result<String, SettingsError> {
        if let Some(url) = self.database_url.as_deref() {
            return Url::parse(url)
                .map(String::from)
                .map_err(|err| SettingsError::InvalidDatabaseUrl {
                    message: err.to_string(),
                });
        }

        let name = self
            .db_name
            .as_deref()
            .ok_or(SettingsError::Missing {
                name: "db_name",
                store,
            })?;
        let user = self
            .db_user
            .as_deref()
            .ok_or(SettingsError::Missing {
                name: "db_user",
                store,
            })?;
        let host = self.db_host.as_deref().unwrap_or(DEFAULT_DB_HOST);

        let invalid = |message: String| SettingsError::InvalidDatabaseUrl { message };
        let mut url = Url::parse("postgres://localhost").map_err(|err| invalid(err.to_string()))?;
        url.set_host(Some(host))
            .map_err(|err| invalid(format!("host `{host}`: {err}")))?;
        url.set_port(Some(self.db_port.unwrap_or(DEFAULT_DB_PORT)))
            .map_err(|()| invalid("port rejected".to_owned()))?;
        url.set_username(user)
            .map_err(|()| invalid("user rejected".to_owned()))?;
        url.set_password(self.db_password.as_deref())
            .map_err(|()| invalid("password rejected".to_owned()))?;
        url.set_path(name);
        Ok(url.into())
    }
}

//! Process configuration read from the environment.
//!
//! Parsing goes through [`mockable::Env`] so every rule can be exercised
//! with `MockEnv` instead of mutating the real process environment.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use zeroize::Zeroizing;

use crate::domain::{DEFAULT_CREDENTIAL_TTL, MAX_CREDENTIAL_TTL};
use crate::inbound::http::session_config::{SessionSettings, parse_bool};
use crate::outbound::persistence::DbPool;

/// Listen address.
pub const BIND_ADDR_ENV: &str = "BIND_ADDR";
/// PostgreSQL URL; videos stay in memory when unset.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Apply embedded migrations before serving.
pub const RUN_MIGRATIONS_ENV: &str = "RUN_MIGRATIONS";
/// ImageKit account public key.
pub const IMAGEKIT_PUBLIC_KEY_ENV: &str = "IMAGEKIT_PUBLIC_KEY";
/// ImageKit account private key used for upload signatures.
pub const IMAGEKIT_PRIVATE_KEY_ENV: &str = "IMAGEKIT_PRIVATE_KEY";
/// ImageKit delivery endpoint.
pub const IMAGEKIT_URL_ENDPOINT_ENV: &str = "IMAGEKIT_URL_ENDPOINT";
/// Upload credential lifetime in seconds.
pub const IMAGEKIT_TOKEN_TTL_ENV: &str = "IMAGEKIT_TOKEN_TTL_SECONDS";

/// Address used when [`BIND_ADDR_ENV`] is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Invalid environment values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The bind address did not parse as `host:port`.
    #[error("invalid BIND_ADDR='{value}': {source}")]
    InvalidBindAddr {
        /// Offending value.
        value: String,
        /// Parser error.
        #[source]
        source: std::net::AddrParseError,
    },
    /// A flag held something other than a recognised boolean.
    #[error("invalid value for {name}='{value}'; expected 1|0|true|false|yes|no|y|n")]
    InvalidBool {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
    /// The credential lifetime was not a whole number of seconds in range.
    #[error("invalid IMAGEKIT_TOKEN_TTL_SECONDS='{value}'; expected 1..3600 seconds")]
    InvalidTokenTtl {
        /// Offending value.
        value: String,
    },
}

/// Upload provider settings.
pub struct ImageKitSettings {
    /// Public key, echoed to clients by deployment tooling.
    pub public_key: Option<String>,
    /// Private signing key; empty when unset.
    pub private_key: Zeroizing<String>,
    /// Delivery endpoint.
    pub url_endpoint: Option<String>,
    /// Upload credential lifetime.
    pub token_ttl: Duration,
}

impl Default for ImageKitSettings {
    fn default() -> Self {
        Self {
            public_key: None,
            private_key: Zeroizing::new(String::new()),
            url_endpoint: None,
            token_ttl: DEFAULT_CREDENTIAL_TTL,
        }
    }
}

impl std::fmt::Debug for ImageKitSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageKitSettings")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("url_endpoint", &self.url_endpoint)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

/// Everything read from the environment apart from session settings.
#[derive(Debug)]
pub struct EnvSettings {
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// PostgreSQL URL, if any.
    pub database_url: Option<String>,
    /// Whether to apply migrations at startup.
    pub run_migrations: bool,
    /// Upload provider settings.
    pub imagekit: ImageKitSettings,
}

impl EnvSettings {
    /// Read and validate the process settings.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let bind_raw = non_empty(env, BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_raw.clone(),
                source,
            })?;

        let run_migrations = match non_empty(env, RUN_MIGRATIONS_ENV) {
            None => true,
            Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidBool {
                name: RUN_MIGRATIONS_ENV,
                value,
            })?,
        };

        Ok(Self {
            bind_addr,
            database_url: non_empty(env, DATABASE_URL_ENV),
            run_migrations,
            imagekit: imagekit_settings(env)?,
        })
    }
}

fn non_empty<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name).filter(|value| !value.trim().is_empty())
}

fn imagekit_settings<E: Env>(env: &E) -> Result<ImageKitSettings, ConfigError> {
    let token_ttl = match non_empty(env, IMAGEKIT_TOKEN_TTL_ENV) {
        None => DEFAULT_CREDENTIAL_TTL,
        Some(value) => match value.trim().parse::<u64>() {
            Ok(secs) if secs >= 1 && Duration::from_secs(secs) < MAX_CREDENTIAL_TTL => {
                Duration::from_secs(secs)
            }
            _ => return Err(ConfigError::InvalidTokenTtl { value }),
        },
    };
    Ok(ImageKitSettings {
        public_key: non_empty(env, IMAGEKIT_PUBLIC_KEY_ENV),
        private_key: Zeroizing::new(env.string(IMAGEKIT_PRIVATE_KEY_ENV).unwrap_or_default()),
        url_endpoint: non_empty(env, IMAGEKIT_URL_ENDPOINT_ENV),
        token_ttl,
    })
}

/// Inputs for [`create_server`](super::create_server).
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) imagekit: ImageKitSettings,
}

impl ServerConfig {
    /// Start from validated session settings and a listen address.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            imagekit: ImageKitSettings::default(),
        }
    }

    /// Store videos in PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Sign upload credentials with these provider settings.
    #[must_use]
    pub fn with_imagekit(mut self, imagekit: ImageKitSettings) -> Self {
        self.imagekit = imagekit;
        self
    }

    /// Socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

//! Application configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SALES_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_SAME_SITE: &str = "Lax";

/// Runtime settings for the sales backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SALES")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_address: Option<String>,
    /// PostgreSQL connection string. Without it sales are kept in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// File holding the session cookie key (at least 64 bytes).
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`. Defaults to `true`.
    pub cookie_secure: Option<bool>,
    /// `SameSite` policy for the session cookie: `Strict`, `Lax` or `None`.
    pub same_site: Option<String>,
    /// Allow a generated session key when the key file is missing.
    pub allow_ephemeral_session: Option<bool>,
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddress {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

impl AppSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS);
        value.parse().map_err(|source| SettingsError::BindAddress {
            value: value.to_owned(),
            source,
        })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    pub fn same_site(&self) -> &str {
        self.same_site.as_deref().unwrap_or(DEFAULT_SAME_SITE)
    }

    /// Whether the session cookie carries `Secure`; on unless disabled.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    pub fn allow_ephemeral_session(&self) -> bool {
        self.allow_ephemeral_session.unwrap_or(false)
    }
}

//! Application settings loaded via OrthoConfig.
//!
//! Values come from `EDUISTA_*` environment variables, configuration files and
//! command-line flags. When no storage URL is configured the server falls back
//! to the in-memory tutor repository.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::postgrest::PostgrestSettings;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STORAGE_TABLE: &str = "tutors";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
    #[error("invalid storage URL `{value}`: {source}")]
    InvalidStorageUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("a storage URL is configured but EDUISTA_STORAGE_API_KEY is not set")]
    MissingApiKey,
}

/// Runtime configuration for the Eduista backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EDUISTA")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Base URL of the hosted database's REST gateway.
    pub storage_url: Option<String>,
    /// API key sent as both `apikey` and bearer token.
    pub storage_api_key: Option<String>,
    /// Table holding tutor records.
    pub storage_table: Option<String>,
    /// Request timeout for storage calls, in seconds.
    pub storage_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Return the bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] when the value is not a
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Return the tutor table name, falling back to `tutors`.
    pub fn storage_table(&self) -> &str {
        self.storage_table
            .as_deref()
            .unwrap_or(DEFAULT_STORAGE_TABLE)
    }

    /// Return the configured storage timeout, if any.
    pub fn storage_timeout(&self) -> Option<Duration> {
        self.storage_timeout_secs.map(Duration::from_secs)
    }

    /// Build the hosted storage settings.
    ///
    /// Returns `Ok(None)` when no storage URL is configured.
    ///
    /// # Errors
    /// Fails when the URL does not parse or when the API key is missing.
    pub fn storage(&self) -> Result<Option<PostgrestSettings>, SettingsError> {
        let Some(raw_url) = self.storage_url.as_deref() else {
            return Ok(None);
        };
        let base_url = Url::parse(raw_url).map_err(|source| SettingsError::InvalidStorageUrl {
            value: raw_url.to_owned(),
            source,
        })?;
        let api_key = self
            .storage_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(SettingsError::MissingApiKey)?;

        Ok(Some(PostgrestSettings {
            base_url,
            api_key,
            table: self.storage_table().to_owned(),
            timeout: self.storage_timeout(),
        }))
    }
}

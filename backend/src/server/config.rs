//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use eduista::outbound::postgrest::PostgrestSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage_table: String,
    pub(crate) storage: Option<PostgrestSettings>,
}

impl ServerConfig {
    /// Construct a configuration that serves tutors from process memory.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, storage_table: impl Into<String>) -> Self {
        Self {
            bind_addr,
            storage_table: storage_table.into(),
            storage: None,
        }
    }

    /// Attach hosted storage settings.
    ///
    /// When provided, the server talks to the hosted database instead of
    /// keeping tutors in memory.
    #[must_use]
    pub fn with_storage(mut self, storage: Option<PostgrestSettings>) -> Self {
        self.storage = storage;
        self
    }
}

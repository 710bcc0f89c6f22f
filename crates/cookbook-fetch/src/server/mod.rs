//! Private package server contract.
//!
//! The wire protocol (request signing, cookbook manifests, file retrieval)
//! belongs to the [`ServerClient`] implementation. This crate only assembles
//! the [`ServerConnection`] and asks the client for one cookbook version.

use async_trait::async_trait;
use log::LevelFilter;

use crate::config::ServerCredentials;
use crate::downloader::Download;
use crate::Result;

/// Everything a private-server client needs for one download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConnection {
    pub credentials: ServerCredentials,

    /// How much of its own logging the client should emit.
    ///
    /// Scoped to this connection; clients must not change global logger state.
    pub client_log: LevelFilter,
}

impl ServerConnection {
    pub fn new(credentials: ServerCredentials, client_log: LevelFilter) -> Self {
        Self {
            credentials,
            client_log,
        }
    }

    pub fn server_url(&self) -> &str {
        &self.credentials.server_url
    }

    pub fn verify_tls(&self) -> bool {
        self.credentials.verify_tls
    }
}

/// Client for a private package server
#[async_trait]
pub trait ServerClient: Send + Sync {
    /// Download cookbook `name` at `version` over `connection`.
    ///
    /// Implementations report a missing cookbook version as
    /// [`FetchError::NotFoundAtSource`](crate::FetchError::NotFoundAtSource)
    /// and authentication or protocol failures as
    /// [`FetchError::Server`](crate::FetchError::Server).
    async fn download_cookbook(
        &self,
        connection: &ServerConnection,
        name: &str,
        version: &str,
    ) -> Result<Download>;
}

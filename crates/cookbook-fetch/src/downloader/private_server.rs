use std::sync::Arc;

use async_trait::async_trait;
use log::LevelFilter;

use super::download::Download;
use super::strategy::LocationStrategy;
use crate::config::ChefConfig;
use crate::package::RemoteLocation;
use crate::server::{ServerClient, ServerConnection};
use crate::{FetchError, Result};

/// Fetches from a private package server; `location_path` is the server URL
pub struct PrivateServerStrategy {
    client: Option<Arc<dyn ServerClient>>,
    identity: ChefConfig,
    verify_tls: bool,
    client_log: LevelFilter,
}

impl PrivateServerStrategy {
    pub fn new(
        client: Option<Arc<dyn ServerClient>>,
        identity: ChefConfig,
        verify_tls: bool,
        client_log: LevelFilter,
    ) -> Self {
        Self {
            client,
            identity,
            verify_tls,
            client_log,
        }
    }

    /// Connection parameters for the server a location points at
    pub fn connection_for(&self, location: &RemoteLocation) -> Result<ServerConnection> {
        let credentials = self
            .identity
            .credentials_for(&location.location_path, self.verify_tls)?;
        Ok(ServerConnection::new(credentials, self.client_log))
    }
}

#[async_trait]
impl LocationStrategy for PrivateServerStrategy {
    async fn fetch(&self, location: &RemoteLocation) -> Result<Download> {
        let client = self.client.as_ref().ok_or_else(|| {
            FetchError::Config(format!(
                "No private server client configured for {}",
                location.location_path
            ))
        })?;

        let connection = self.connection_for(location)?;
        log::debug!(
            "Downloading {} ({}) from {} as {} (verify TLS: {})",
            location.name,
            location.version,
            connection.server_url(),
            connection.credentials.client_name,
            connection.verify_tls()
        );

        client
            .download_cookbook(&connection, &location.name, &location.version)
            .await
    }
}

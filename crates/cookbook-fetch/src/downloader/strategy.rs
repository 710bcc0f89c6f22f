use std::sync::Arc;

use async_trait::async_trait;

use super::archive_host::ArchiveHostStrategy;
use super::download::Download;
use super::private_server::PrivateServerStrategy;
use super::registry::RegistryStrategy;
use crate::config::FetchConfig;
use crate::http::HttpClient;
use crate::package::{LocationType, RemoteLocation};
use crate::registry::CommunityRestClient;
use crate::server::ServerClient;
use crate::{FetchError, Result};

/// Transfers the content a [`RemoteLocation`] points at to local disk.
///
/// There is one implementation per known [`LocationType`]. Returning
/// [`FetchError::NotFoundAtSource`] lets the dispatcher fall back to the next
/// source; any other error aborts the whole download.
#[async_trait]
pub trait LocationStrategy: Send + Sync {
    async fn fetch(&self, location: &RemoteLocation) -> Result<Download>;
}

/// One strategy per known location type
#[derive(Clone)]
pub struct StrategySet {
    registry: Arc<dyn LocationStrategy>,
    private_server: Arc<dyn LocationStrategy>,
    archive_host: Arc<dyn LocationStrategy>,
}

impl StrategySet {
    pub fn new(
        registry: Arc<dyn LocationStrategy>,
        private_server: Arc<dyn LocationStrategy>,
        archive_host: Arc<dyn LocationStrategy>,
    ) -> Self {
        Self {
            registry,
            private_server,
            archive_host,
        }
    }

    /// The standard strategies, sharing one HTTP client
    pub fn from_config(
        config: &FetchConfig,
        http_client: Arc<HttpClient>,
        server_client: Option<Arc<dyn ServerClient>>,
    ) -> Self {
        let registry = RegistryStrategy::new(Arc::new(CommunityRestClient::new(Arc::clone(&http_client))));
        let private_server = PrivateServerStrategy::new(
            server_client,
            config.chef.clone(),
            config.ssl.verify,
            config.server_client_log,
        );
        let archive_host = ArchiveHostStrategy::new(http_client, config.archive_host.clone());

        Self::new(Arc::new(registry), Arc::new(private_server), Arc::new(archive_host))
    }

    pub fn with_registry(mut self, strategy: Arc<dyn LocationStrategy>) -> Self {
        self.registry = strategy;
        self
    }

    pub fn with_private_server(mut self, strategy: Arc<dyn LocationStrategy>) -> Self {
        self.private_server = strategy;
        self
    }

    pub fn with_archive_host(mut self, strategy: Arc<dyn LocationStrategy>) -> Self {
        self.archive_host = strategy;
        self
    }

    /// Strategy able to fetch `location`
    pub fn for_location(&self, location: &RemoteLocation) -> Result<&dyn LocationStrategy> {
        match &location.location_type {
            LocationType::Registry => Ok(self.registry.as_ref()),
            LocationType::PrivateServer => Ok(self.private_server.as_ref()),
            LocationType::ArchiveHost => Ok(self.archive_host.as_ref()),
            LocationType::Unknown(raw) => Err(FetchError::UnsupportedLocationType {
                location_type: raw.clone(),
                name: location.name.clone(),
                version: location.version.clone(),
            }),
        }
    }
}

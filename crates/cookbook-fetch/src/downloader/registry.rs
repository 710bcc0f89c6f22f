use std::sync::Arc;

use async_trait::async_trait;

use super::download::Download;
use super::strategy::LocationStrategy;
use crate::package::RemoteLocation;
use crate::registry::RegistryClient;
use crate::Result;

/// Fetches from a package registry; `location_path` is the registry's API root
pub struct RegistryStrategy {
    client: Arc<dyn RegistryClient>,
}

impl RegistryStrategy {
    pub fn new(client: Arc<dyn RegistryClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LocationStrategy for RegistryStrategy {
    async fn fetch(&self, location: &RemoteLocation) -> Result<Download> {
        log::debug!(
            "Downloading {} ({}) from registry {}",
            location.name,
            location.version,
            location.location_path
        );
        self.client
            .download(&location.location_path, &location.name, &location.version)
            .await
    }
}

//! Ordered multi-source resolution with not-found fallback.

use std::sync::Arc;

use super::download::Download;
use super::strategy::StrategySet;
use crate::config::FetchConfig;
use crate::http::{HttpClient, HttpError};
use crate::package::Dependency;
use crate::server::ServerClient;
use crate::source::{Source, UniverseSource};
use crate::{FetchError, Result};

/// Resolves a cookbook version against sources in priority order and
/// downloads it from the first one that has it.
///
/// Only [`FetchError::NotFoundAtSource`] moves the search on to the next
/// source. Any other failure, from a probe or a transfer, is returned at once
/// so a broken source is never mistaken for a missing cookbook.
pub struct DownloadDispatcher {
    /// Sources in priority order (first = highest priority)
    sources: Vec<Arc<dyn Source>>,
    strategies: StrategySet,
}

impl DownloadDispatcher {
    pub fn new(strategies: StrategySet) -> Self {
        Self {
            sources: Vec::new(),
            strategies,
        }
    }

    /// Universe sources and standard strategies for `config`
    pub fn from_config(
        config: &FetchConfig,
        server_client: Option<Arc<dyn ServerClient>>,
    ) -> Result<Self> {
        config.validate()?;

        let http_client = Arc::new(
            HttpClient::with_config(config.http_client_config()).map_err(HttpError::from)?,
        );

        let mut dispatcher = Self::new(StrategySet::from_config(
            config,
            Arc::clone(&http_client),
            server_client,
        ));
        for source in &config.sources {
            dispatcher.add_source(Arc::new(UniverseSource::new(
                source.uri.clone(),
                Arc::clone(&http_client),
            )));
        }

        Ok(dispatcher)
    }

    /// Add a source (will be added with lowest priority)
    pub fn add_source(&mut self, source: Arc<dyn Source>) {
        self.sources.push(source);
    }

    pub fn with_source(mut self, source: Arc<dyn Source>) -> Self {
        self.add_source(source);
        self
    }

    pub fn sources(&self) -> &[Arc<dyn Source>] {
        &self.sources
    }

    /// Download `name` at exactly `version` from the first source hosting it
    pub async fn download(&self, name: &str, version: &str) -> Result<Download> {
        for source in &self.sources {
            if let Some(download) = self.try_download(source.as_ref(), name, version).await? {
                log::debug!(
                    "Downloaded {} ({}) from {} to {}",
                    name,
                    version,
                    source.uri(),
                    download.path().display()
                );
                return Ok(download);
            }
        }

        Err(FetchError::PackageNotFound {
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    /// Download a dependency locked to an exact version
    pub async fn download_dependency(&self, dependency: &Dependency) -> Result<Download> {
        let version = dependency.locked_version()?;
        self.download(&dependency.name, version).await
    }

    /// `Ok(None)` when this source does not have the cookbook
    async fn try_download(
        &self,
        source: &dyn Source,
        name: &str,
        version: &str,
    ) -> Result<Option<Download>> {
        let location = match source.locate(name, version).await {
            Ok(Some(location)) => location,
            Ok(None) => {
                log::debug!("{} ({}) not listed by {}", name, version, source.uri());
                return Ok(None);
            }
            Err(e) if e.is_not_found_at_source() => {
                log::debug!("{}", e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        log::debug!(
            "{} lists {} ({}) at {} ({})",
            source.uri(),
            name,
            version,
            location.location_path,
            location.location_type
        );

        let strategy = self.strategies.for_location(&location)?;
        match strategy.fetch(&location).await {
            Ok(download) => Ok(Some(download)),
            Err(e) if e.is_not_found_at_source() => {
                log::debug!("{}; trying next source", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

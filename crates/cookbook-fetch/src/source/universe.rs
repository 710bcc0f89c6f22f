//! Cookbook index exposing a `/universe` document.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;
use tokio::sync::OnceCell;

use super::traits::Source;
use crate::http::HttpClient;
use crate::package::{LocationType, RemoteLocation};
use crate::{FetchError, Result};

/// One cookbook version as listed in a universe document
#[derive(Debug, Clone, Deserialize)]
pub struct UniverseEntry {
    pub location_type: LocationType,
    pub location_path: String,
}

/// `{ name: { version: entry } }`
pub type Universe = IndexMap<String, IndexMap<String, UniverseEntry>>;

/// Source backed by an index's universe endpoint.
///
/// The universe is fetched on first lookup and reused for the lifetime of the
/// source.
///
/// ```json
/// {
///     "nginx": {
///         "1.2.3": {
///             "location_type": "opscode",
///             "location_path": "https://supermarket.chef.io/api/v1",
///             "dependencies": { "ohai": ">= 1.1.4" }
///         }
///     }
/// }
/// ```
pub struct UniverseSource {
    uri: String,
    http_client: Arc<HttpClient>,
    universe: OnceCell<Universe>,
}

impl UniverseSource {
    pub fn new(uri: impl Into<String>, http_client: Arc<HttpClient>) -> Self {
        Self {
            uri: uri.into(),
            http_client,
            universe: OnceCell::new(),
        }
    }

    pub fn universe_url(&self) -> String {
        format!("{}/universe", self.uri.trim_end_matches('/'))
    }

    async fn universe(&self) -> Result<&Universe> {
        self.universe
            .get_or_try_init(|| async {
                let url = self.universe_url();
                log::debug!("Fetching universe from {}", url);
                let universe: Universe = self.http_client.get_json(&url).await?;
                log::debug!("{} lists {} cookbooks", self.uri, universe.len());
                Ok::<_, FetchError>(universe)
            })
            .await
    }

}

#[async_trait]
impl Source for UniverseSource {
    fn uri(&self) -> &str {
        &self.uri
    }

    async fn locate(&self, name: &str, version: &str) -> Result<Option<RemoteLocation>> {
        let entry = self
            .universe()
            .await?
            .get(name)
            .and_then(|versions| versions.get(version));

        Ok(entry.map(|entry| {
            RemoteLocation::new(
                entry.location_type.clone(),
                entry.location_path.clone(),
                name,
                version,
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpClientConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const UNIVERSE: &str = r#"{
        "nginx": {
            "1.2.3": {
                "location_type": "opscode",
                "location_path": "https://supermarket.example/api/v1",
                "dependencies": { "ohai": ">= 1.1.4" }
            },
            "2.0.0": {
                "location_type": "github",
                "location_path": "acme/nginx",
                "dependencies": {}
            }
        },
        "legacy": {
            "0.1.0": {
                "location_type": "file_store",
                "location_path": "/srv/cookbooks"
            }
        }
    }"#;

    async fn source() -> (MockServer, UniverseSource) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/universe"))
            .respond_with(ResponseTemplate::new(200).set_body_string(UNIVERSE))
            .expect(1)
            .mount(&server)
            .await;

        let config = HttpClientConfig::new().with_max_retries(0);
        let client = Arc::new(HttpClient::with_config(config).unwrap());
        let source = UniverseSource::new(format!("{}/", server.uri()), client);
        (server, source)
    }

    #[tokio::test]
    async fn test_locate_known_version() {
        let (_server, source) = source().await;

        let location = source.locate("nginx", "1.2.3").await.unwrap().unwrap();
        assert_eq!(
            location,
            RemoteLocation::registry("https://supermarket.example/api/v1", "nginx", "1.2.3")
        );

        let location = source.locate("nginx", "2.0.0").await.unwrap().unwrap();
        assert_eq!(location.location_type, LocationType::ArchiveHost);
    }

    #[tokio::test]
    async fn test_locate_missing_is_none_and_universe_is_cached() {
        let (_server, source) = source().await;

        assert!(source.locate("nginx", "9.9.9").await.unwrap().is_none());
        assert!(source.locate("apache2", "1.0.0").await.unwrap().is_none());
        // wiremock verifies a single /universe request on drop
    }

    #[tokio::test]
    async fn test_unknown_location_type_is_preserved() {
        let (_server, source) = source().await;

        let location = source.locate("legacy", "0.1.0").await.unwrap().unwrap();
        assert_eq!(
            location.location_type,
            LocationType::Unknown("file_store".to_string())
        );
    }

    #[tokio::test]
    async fn test_unreachable_index_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = HttpClientConfig::new().with_max_retries(0);
        let client = Arc::new(HttpClient::with_config(config).unwrap());
        let source = UniverseSource::new(server.uri(), client);

        let err = source.locate("nginx", "1.2.3").await.unwrap_err();
        assert!(!err.is_not_found_at_source());
    }
}

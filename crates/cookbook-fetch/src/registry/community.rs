use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::RegistryClient;
use crate::downloader::{Download, FileDownloader, TempWorkspace};
use crate::http::HttpClient;
use crate::{FetchError, Result};

/// Version document returned by the community site
#[derive(Debug, Deserialize)]
struct VersionInfo {
    /// Tarball URL
    file: String,
}

/// [`RegistryClient`] for the community site REST API
pub struct CommunityRestClient {
    http_client: Arc<HttpClient>,
    file_downloader: FileDownloader,
}

impl CommunityRestClient {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self {
            file_downloader: FileDownloader::new(Arc::clone(&http_client)),
            http_client,
        }
    }

    /// URL of the version document for `name` at `version`
    pub fn version_url(api_uri: &str, name: &str, version: &str) -> String {
        format!(
            "{}/cookbooks/{}/versions/{}",
            api_uri.trim_end_matches('/'),
            urlencoding::encode(name),
            escape_version(version)
        )
    }

    async fn find(&self, api_uri: &str, name: &str, version: &str) -> Result<VersionInfo> {
        let url = Self::version_url(api_uri, name, version);
        log::debug!("Looking up {} ({}) at {}", name, version, url);

        match self.http_client.get_json::<VersionInfo>(&url).await {
            Ok(info) => Ok(info),
            Err(e) if e.is_not_found() => Err(FetchError::NotFoundAtSource {
                origin: api_uri.to_string(),
                name: name.to_string(),
                version: version.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl RegistryClient for CommunityRestClient {
    async fn download(&self, api_uri: &str, name: &str, version: &str) -> Result<Download> {
        let info = self.find(api_uri, name, version).await?;

        let workspace = TempWorkspace::create()?;
        let out_dir = self
            .file_downloader
            .download_and_extract(
                &info.file,
                &format!("{}-{}.tar.gz", name, version),
                workspace.path(),
                name,
            )
            .await?;

        Ok(Download::staged(out_dir, workspace))
    }
}

/// The community site spells `1.2.3` as `1_2_3` in URLs
fn escape_version(version: &str) -> String {
    version.replace('.', "_")
}

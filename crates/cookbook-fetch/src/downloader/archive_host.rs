use std::sync::Arc;

use async_trait::async_trait;

use super::download::Download;
use super::file::FileDownloader;
use super::strategy::LocationStrategy;
use super::workspace::TempWorkspace;
use crate::http::HttpClient;
use crate::package::RemoteLocation;
use crate::{FetchError, Result};

/// Fetches tagged tarballs from a code host.
///
/// `location_path` is an `owner/repo` slug; version `1.0.0` is expected under
/// the tag `v1.0.0` and to unpack into `<name>-<version>/`.
pub struct ArchiveHostStrategy {
    file_downloader: FileDownloader,
    host: String,
}

impl ArchiveHostStrategy {
    /// `host` is the tarball endpoint root, e.g. `https://codeload.github.com`
    pub fn new(http_client: Arc<HttpClient>, host: impl Into<String>) -> Self {
        Self {
            file_downloader: FileDownloader::new(http_client),
            host: host.into(),
        }
    }

    /// `<host>/<owner>/<repo>/tar.gz/v<version>`
    pub fn archive_url(&self, location: &RemoteLocation) -> Result<String> {
        let slug = location.location_path.trim_matches('/');
        let segments: Vec<&str> = slug.split('/').collect();
        if segments.len() != 2 || segments.iter().any(|s| s.is_empty() || *s == "." || *s == "..") {
            return Err(FetchError::InvalidUrl {
                url: location.location_path.clone(),
                reason: "expected an owner/repo path".to_string(),
            });
        }

        let url = format!(
            "{}/{}/tar.gz/v{}",
            self.host.trim_end_matches('/'),
            slug,
            location.version
        );
        url::Url::parse(&url).map_err(|e| FetchError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        Ok(url)
    }
}

#[async_trait]
impl LocationStrategy for ArchiveHostStrategy {
    async fn fetch(&self, location: &RemoteLocation) -> Result<Download> {
        let url = self.archive_url(location)?;
        let workspace = TempWorkspace::create()?;

        let out_dir = self
            .file_downloader
            .download_and_extract(
                &url,
                &format!("{}.tar.gz", location.dir_name()),
                workspace.path(),
                &location.dir_name(),
            )
            .await?;

        Ok(Download::staged(out_dir, workspace))
    }
}

//! File downloader for HTTP/HTTPS tarballs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::http::HttpClient;
use crate::{FetchError, Result};

use super::archive::ArchiveExtractor;

/// File downloader for HTTP archives
pub struct FileDownloader {
    http_client: Arc<HttpClient>,
}

impl FileDownloader {
    /// Create a new file downloader
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }

    /// Download a file to the specified path
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        Ok(self.http_client.download(url, dest).await?)
    }

    /// Download a tarball into `dest_dir` as `archive_name` and unpack it there.
    ///
    /// The archive must unpack into a single `top_dir` directory, whose path
    /// is returned. The archive file is removed after a successful extraction.
    pub async fn download_and_extract(
        &self,
        url: &str,
        archive_name: &str,
        dest_dir: &Path,
        top_dir: &str,
    ) -> Result<PathBuf> {
        let archive_path = dest_dir.join(archive_name);

        log::debug!("Downloading {} to {}", url, archive_path.display());
        self.download(url, &archive_path).await?;

        let extract_dir = dest_dir.to_path_buf();
        let archive = archive_path.clone();
        tokio::task::spawn_blocking(move || ArchiveExtractor::extract(&archive, &extract_dir))
            .await
            .map_err(|e| FetchError::Extract {
                archive: archive_path.clone(),
                reason: e.to_string(),
            })??;

        tokio::fs::remove_file(&archive_path).await?;

        let out_dir = dest_dir.join(top_dir);
        if !out_dir.is_dir() {
            return Err(FetchError::Extract {
                archive: archive_path,
                reason: format!("archive from {} did not contain {}/", url, top_dir),
            });
        }

        Ok(out_dir)
    }
}

//! Community site registry clients.
//!
//! The registry strategy forwards to a [`RegistryClient`]; the default
//! implementation talks to the community site REST API:
//!
//! - `GET <api>/cookbooks/<name>/versions/<version>` (dots in the version
//!   replaced by underscores) answers `{ "file": "<tarball url>" }`
//! - the tarball unpacks to a single `<name>/` directory

mod community;

use async_trait::async_trait;

use crate::downloader::Download;
use crate::Result;

pub use community::CommunityRestClient;

/// Client for a package registry's HTTP API
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Download `name` at `version` from the registry rooted at `api_uri`.
    ///
    /// Must fail with [`FetchError::NotFoundAtSource`](crate::FetchError::NotFoundAtSource)
    /// when the registry does not host that version, and with any other
    /// error for transport or archive problems.
    async fn download(&self, api_uri: &str, name: &str, version: &str) -> Result<Download>;
}

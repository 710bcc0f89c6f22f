use async_trait::async_trait;

use crate::package::RemoteLocation;
use crate::Result;

/// A configured origin that may or may not host a given cookbook version
#[async_trait]
pub trait Source: Send + Sync {
    /// Identifier used in logs and error messages, usually the source URI
    fn uri(&self) -> &str;

    /// Where this source says `name` at exactly `version` can be fetched.
    ///
    /// Returns `Ok(None)` when the source does not host that version. Must
    /// not transfer the cookbook itself.
    async fn locate(&self, name: &str, version: &str) -> Result<Option<RemoteLocation>>;
}

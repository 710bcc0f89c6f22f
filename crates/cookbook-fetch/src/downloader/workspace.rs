//! Scoped staging directories for archive downloads.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::Result;

const WORKSPACE_PREFIX: &str = "cookbook-fetch-";

/// A uniquely named temporary directory, removed when dropped.
///
/// Whoever ends up holding the workspace owns its cleanup: strategies hand it
/// to the caller inside a [`Download`](super::Download) so extracted files
/// outlive the strategy call.
#[derive(Debug)]
pub struct TempWorkspace {
    dir: TempDir,
}

impl TempWorkspace {
    /// Create a fresh workspace under the system temp directory
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(WORKSPACE_PREFIX).tempdir()?;
        log::trace!("Created workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Give up ownership; the directory is left on disk
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}

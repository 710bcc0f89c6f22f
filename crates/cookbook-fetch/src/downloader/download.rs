use std::path::{Path, PathBuf};

use super::workspace::TempWorkspace;

/// Result of a download operation
///
/// When the content was staged in a [`TempWorkspace`], the workspace travels
/// with the result and is removed once this value is dropped. Copy the files
/// out first, or call [`Download::persist`] to keep them where they are.
#[derive(Debug)]
pub struct Download {
    /// Directory holding the cookbook's files
    path: PathBuf,
    workspace: Option<TempWorkspace>,
}

impl Download {
    /// A download living somewhere the caller already owns
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            workspace: None,
        }
    }

    /// A download staged inside `workspace`
    pub fn staged(path: impl Into<PathBuf>, workspace: TempWorkspace) -> Self {
        Self {
            path: path.into(),
            workspace: Some(workspace),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Root of the staging workspace, if any
    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace.as_ref().map(TempWorkspace::path)
    }

    pub fn is_staged(&self) -> bool {
        self.workspace.is_some()
    }

    /// Keep the files on disk and return their path
    pub fn persist(self) -> PathBuf {
        if let Some(workspace) = self.workspace {
            workspace.keep();
        }
        self.path
    }
}

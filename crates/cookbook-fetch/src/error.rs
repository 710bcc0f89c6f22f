use std::path::PathBuf;

use thiserror::Error;

use crate::http::HttpError;

#[derive(Error, Debug)]
pub enum FetchError {
    // Lookup outcomes
    #[error("{name} ({version}) not found at {origin}")]
    NotFoundAtSource {
        origin: String,
        name: String,
        version: String,
    },

    #[error("{name} ({version}) not found in any sources")]
    PackageNotFound { name: String, version: String },

    #[error("Unknown location type '{location_type}' for {name} ({version})")]
    UnsupportedLocationType {
        location_type: String,
        name: String,
        version: String,
    },

    // Network errors
    #[error("Network error: {0}")]
    Http(#[from] HttpError),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    // Archive errors
    #[error("Failed to extract {}: {reason}", .archive.display())]
    Extract { archive: PathBuf, reason: String },

    #[error("Unknown archive format: {}", .archive.display())]
    UnknownArchiveFormat { archive: PathBuf },

    // Private server errors
    #[error("Private server error: {0}")]
    Server(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Version constraint errors
    #[error("Invalid version constraint: {0}")]
    InvalidConstraint(String),
}

impl FetchError {
    /// Whether this error only says the package is absent from one source.
    ///
    /// This is the one outcome the dispatcher absorbs before moving on to the
    /// next source; every other variant aborts the download.
    pub fn is_not_found_at_source(&self) -> bool {
        matches!(self, FetchError::NotFoundAtSource { .. })
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

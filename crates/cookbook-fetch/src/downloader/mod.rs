//! Cookbook downloading and extraction module.
//!
//! This module resolves a cookbook version against the configured sources
//! and transfers it with the strategy matching the location each source
//! reports (community registry, private server or archive host).

mod archive;
mod archive_host;
mod dispatcher;
mod download;
mod file;
mod private_server;
mod registry;
mod strategy;
mod workspace;

pub use archive::{ArchiveExtractor, ArchiveType};
pub use archive_host::ArchiveHostStrategy;
pub use dispatcher::DownloadDispatcher;
pub use download::Download;
pub use file::FileDownloader;
pub use private_server::PrivateServerStrategy;
pub use registry::RegistryStrategy;
pub use strategy::{LocationStrategy, StrategySet};
pub use workspace::TempWorkspace;

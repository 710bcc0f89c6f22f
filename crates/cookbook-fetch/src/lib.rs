pub mod config;
pub mod downloader;
pub mod error;
pub mod http;
pub mod package;
pub mod registry;
pub mod server;
pub mod source;

pub use error::{FetchError, Result};
pub use config::{FetchConfig, ServerCredentials};
pub use downloader::{Download, DownloadDispatcher, LocationStrategy, StrategySet, TempWorkspace};
pub use http::HttpClient;
pub use package::{Dependency, LocationType, RemoteLocation};
pub use registry::{CommunityRestClient, RegistryClient};
pub use server::{ServerClient, ServerConnection};
pub use source::{InlineSource, Source, UniverseSource};

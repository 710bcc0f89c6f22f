//! Caller-supplied configuration for the fetch layer
//!
//! Sources, private-server identity, TLS policy and transport tuning are all
//! passed in explicitly through [`FetchConfig`]; this crate never reads
//! configuration from the environment or from process-wide state.
//!
//! # Example
//!
//! ```rust,no_run
//! use cookbook_fetch::config::FetchConfig;
//! use std::path::Path;
//!
//! let config = FetchConfig::load(Path::new("/etc/cookbook-fetch.json")).unwrap();
//! let http = config.http_client_config();
//! println!("Verify TLS: {}", http.verify_tls);
//! ```

mod config;
mod credentials;

pub use config::{ChefConfig, FetchConfig, HttpSettings, SourceConfig, SslConfig, DEFAULT_ARCHIVE_HOST};
pub use credentials::ServerCredentials;

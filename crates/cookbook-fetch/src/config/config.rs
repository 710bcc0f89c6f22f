use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;

use super::credentials::ServerCredentials;
use crate::error::{FetchError, Result};
use crate::http::HttpClientConfig;

/// Default archive host; tarball URLs are `<host>/<owner>/<repo>/tar.gz/v<version>`
pub const DEFAULT_ARCHIVE_HOST: &str = "https://codeload.github.com";

/// A cookbook index to probe, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub uri: String,
}

impl SourceConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// Identity used against private package servers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChefConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,

    /// Path to the client's private key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_key: Option<PathBuf>,
}

impl ChefConfig {
    /// Combine this identity with a server URL and TLS policy
    pub fn credentials_for(&self, server_url: &str, verify_tls: bool) -> Result<ServerCredentials> {
        let client_name = self.node_name.clone().ok_or_else(|| {
            FetchError::Config(format!("No node name configured for {}", server_url))
        })?;
        let client_key = self.client_key.clone().ok_or_else(|| {
            FetchError::Config(format!("No client key configured for {}", server_url))
        })?;

        Ok(ServerCredentials {
            server_url: server_url.to_string(),
            client_name,
            client_key,
            verify_tls,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslConfig {
    #[serde(default = "default_true")]
    pub verify: bool,
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { verify: true }
    }
}

/// Transport tuning shared by every HTTP-backed source and strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base retry delay in milliseconds, doubled on every attempt
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cafile: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            max_retries: default_max_retries(),
            retry_delay: default_retry_delay(),
            proxy: None,
            cafile: None,
            user_agent: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1000
}

fn default_archive_host() -> String {
    DEFAULT_ARCHIVE_HOST.to_string()
}

fn default_server_client_log() -> LevelFilter {
    LevelFilter::Off
}

/// Everything the fetch layer needs from its caller.
///
/// Nothing here is read from the environment or from global state; callers
/// build it in code or load it from a JSON document:
///
/// ```json
/// {
///     "sources": [{ "uri": "https://supermarket.chef.io" }],
///     "chef": { "node-name": "builder", "client-key": "/etc/chef/client.pem" },
///     "ssl": { "verify": false },
///     "archive-host": "https://codeload.github.com",
///     "http": { "timeout": 60, "max-retries": 5 },
///     "server-client-log": "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FetchConfig {
    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    #[serde(default)]
    pub chef: ChefConfig,

    #[serde(default)]
    pub ssl: SslConfig,

    #[serde(default = "default_archive_host")]
    pub archive_host: String,

    #[serde(default)]
    pub http: HttpSettings,

    /// Log level handed to the private-server client for its own output
    #[serde(default = "default_server_client_log")]
    pub server_client_log: LevelFilter,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            chef: ChefConfig::default(),
            ssl: SslConfig::default(),
            archive_host: default_archive_host(),
            http: HttpSettings::default(),
            server_client_log: default_server_client_log(),
        }
    }
}

impl FetchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FetchError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: FetchConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that can only fail later, deep inside a download
    pub fn validate(&self) -> Result<()> {
        for source in &self.sources {
            url::Url::parse(&source.uri).map_err(|e| {
                FetchError::Config(format!("Invalid source uri '{}': {}", source.uri, e))
            })?;
        }

        url::Url::parse(&self.archive_host).map_err(|e| {
            FetchError::Config(format!("Invalid archive host '{}': {}", self.archive_host, e))
        })?;

        Ok(())
    }

    pub fn with_source(mut self, uri: impl Into<String>) -> Self {
        self.sources.push(SourceConfig::new(uri));
        self
    }

    pub fn with_node_name(mut self, node_name: impl Into<String>) -> Self {
        self.chef.node_name = Some(node_name.into());
        self
    }

    pub fn with_client_key(mut self, client_key: impl Into<PathBuf>) -> Self {
        self.chef.client_key = Some(client_key.into());
        self
    }

    pub fn with_ssl_verify(mut self, verify: bool) -> Self {
        self.ssl.verify = verify;
        self
    }

    pub fn with_archive_host(mut self, archive_host: impl Into<String>) -> Self {
        self.archive_host = archive_host.into();
        self
    }

    pub fn with_http(mut self, http: HttpSettings) -> Self {
        self.http = http;
        self
    }

    pub fn with_server_client_log(mut self, level: LevelFilter) -> Self {
        self.server_client_log = level;
        self
    }

    /// Transport settings for the shared HTTP client
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut config = HttpClientConfig::new()
            .with_timeout(Duration::from_secs(self.http.timeout))
            .with_connect_timeout(Duration::from_secs(self.http.connect_timeout))
            .with_max_retries(self.http.max_retries)
            .with_retry_delay(Duration::from_millis(self.http.retry_delay))
            .with_verify_tls(self.ssl.verify);

        if let Some(proxy) = &self.http.proxy {
            config = config.with_proxy(proxy.clone());
        }
        if let Some(cafile) = &self.http.cafile {
            config = config.with_cafile(cafile.clone());
        }
        if let Some(user_agent) = &self.http.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }

        config
    }

    /// Credentials for the private server at `server_url`
    pub fn server_credentials(&self, server_url: &str) -> Result<ServerCredentials> {
        self.chef.credentials_for(server_url, self.ssl.verify)
    }
}

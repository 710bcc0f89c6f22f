use std::path::PathBuf;

/// Connection identity for one private package server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCredentials {
    pub server_url: String,

    /// Client (node) name the server knows this caller by
    pub client_name: String,

    /// Path to the client's private key
    pub client_key: PathBuf,

    pub verify_tls: bool,
}

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Protocol family used to fetch a cookbook from a source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocationType {
    /// Community site REST API (`opscode` / `supermarket`)
    Registry,
    /// Private package server (`chef_server`)
    PrivateServer,
    /// Tagged tarballs on a code host (`github`)
    ArchiveHost,
    /// Anything an index reports that this crate cannot fetch
    Unknown(String),
}

impl LocationType {
    /// Parse the location type string used by cookbook indexes
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "opscode" | "supermarket" => LocationType::Registry,
            "chef_server" => LocationType::PrivateServer,
            "github" => LocationType::ArchiveHost,
            _ => LocationType::Unknown(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LocationType::Registry => "opscode",
            LocationType::PrivateServer => "chef_server",
            LocationType::ArchiveHost => "github",
            LocationType::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LocationType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LocationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(LocationType::parse(&raw))
    }
}

/// Where and how a source says a specific cookbook version can be fetched
///
/// Built by a source for one lookup and consumed by the matching
/// location strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLocation {
    pub location_type: LocationType,

    /// Base URL for registries and private servers, `owner/repo` for archive hosts
    pub location_path: String,

    pub name: String,

    pub version: String,
}

impl RemoteLocation {
    pub fn new(
        location_type: LocationType,
        location_path: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            location_type,
            location_path: location_path.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn registry(location_path: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(LocationType::Registry, location_path, name, version)
    }

    pub fn private_server(location_path: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(LocationType::PrivateServer, location_path, name, version)
    }

    pub fn archive_host(location_path: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(LocationType::ArchiveHost, location_path, name, version)
    }

    /// `<name>-<version>`, the directory name archive-based strategies produce
    pub fn dir_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location_types() {
        assert_eq!(LocationType::parse("opscode"), LocationType::Registry);
        assert_eq!(LocationType::parse("supermarket"), LocationType::Registry);
        assert_eq!(LocationType::parse("chef_server"), LocationType::PrivateServer);
        assert_eq!(LocationType::parse("GitHub"), LocationType::ArchiveHost);
        assert_eq!(
            LocationType::parse("file_store"),
            LocationType::Unknown("file_store".to_string())
        );
    }

    #[test]
    fn test_remote_location_from_json() {
        let location: RemoteLocation = serde_json::from_str(
            r#"{
                "location_type": "github",
                "location_path": "acme/widget",
                "name": "widget",
                "version": "1.0.0"
            }"#,
        )
        .unwrap();

        assert_eq!(location, RemoteLocation::archive_host("acme/widget", "widget", "1.0.0"));
        assert_eq!(location.dir_name(), "widget-1.0.0");
    }
}

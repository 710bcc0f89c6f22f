use async_trait::async_trait;

use super::traits::Source;
use crate::package::RemoteLocation;
use crate::Result;

/// Source answering from a fixed list of locations
///
/// Locations can be given in code or as JSON:
///
/// ```json
/// [
///     {
///         "name": "widget",
///         "version": "1.0.0",
///         "location_type": "github",
///         "location_path": "acme/widget"
///     }
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct InlineSource {
    uri: String,
    locations: Vec<RemoteLocation>,
}

impl InlineSource {
    pub fn new(uri: impl Into<String>, locations: Vec<RemoteLocation>) -> Self {
        Self {
            uri: uri.into(),
            locations,
        }
    }

    /// Load locations from a JSON array (or a single object)
    pub fn from_json(uri: impl Into<String>, value: &serde_json::Value) -> Result<Self> {
        let locations = if value.is_array() {
            serde_json::from_value(value.clone())?
        } else {
            vec![serde_json::from_value(value.clone())?]
        };

        Ok(Self::new(uri, locations))
    }
}

#[async_trait]
impl Source for InlineSource {
    fn uri(&self) -> &str {
        &self.uri
    }

    async fn locate(&self, name: &str, version: &str) -> Result<Option<RemoteLocation>> {
        Ok(self
            .locations
            .iter()
            .find(|l| l.name == name && l.version == version)
            .cloned())
    }
}

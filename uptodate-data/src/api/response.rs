//! Response types for the OSM element lookup.
//!
//! The backend forwards the OpenStreetMap API v0.6 JSON answer for a single
//! element unchanged.
//!
//! See: <https://wiki.openstreetmap.org/wiki/API_v0.6#Read:_GET_/api/0.6/[node|way|relation]/#id>

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uptodate_core::{ElementKind, OsmLinks};

/// Envelope of an OSM API element response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementResponse {
    /// API version, usually `"0.6"`.
    #[serde(default)]
    pub version: Option<String>,
    /// Matching elements; a single-element lookup returns at most one.
    #[serde(default)]
    pub elements: Vec<OsmElement>,
}

/// Current version of an OSM element, as shown in a feature popup.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OsmElement {
    /// Element type: `"node"`, `"way"` or `"relation"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Element identifier.
    pub id: u64,
    /// Current version number.
    #[serde(default)]
    pub version: Option<u32>,
    /// Time of the current version.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Changeset that produced the current version.
    #[serde(default)]
    pub changeset: Option<u64>,
    /// Display name of the last editor.
    #[serde(default)]
    pub user: Option<String>,
    /// Latitude, for nodes.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude, for nodes.
    #[serde(default)]
    pub lon: Option<f64>,
    /// OSM tags.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl OsmElement {
    /// Return the value of the `name` tag, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str)
    }

    /// Return the openstreetmap.org links for nodes and ways.
    #[must_use]
    pub fn osm_links(&self) -> Option<OsmLinks> {
        let kind = match self.kind.as_str() {
            "node" => ElementKind::Node,
            "way" => ElementKind::Way,
            _ => return None,
        };
        Some(kind.osm_links(self.id))
    }
}

//! OpenStreetMap features carrying edit-history metadata.
//!
//! Features are produced by the data layer from the backend's GeoJSON
//! responses and are never mutated afterwards. Coordinates are WGS84 with
//! `x = longitude` and `y = latitude`.

use chrono::{DateTime, Utc};
use geo::{Centroid, Coord, LineString};

/// Base URL of the OpenStreetMap website used for element links.
pub const OSM_BASE_URL: &str = "https://www.openstreetmap.org";

/// OSM element kind a feature was derived from.
///
/// # Examples
/// ```
/// use uptodate_core::ElementKind;
///
/// assert_eq!(ElementKind::Node.as_str(), "node");
/// assert_eq!(ElementKind::Way.to_string(), "way");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ElementKind {
    /// A single node, rendered as a point.
    Node,
    /// A way, rendered as a line.
    Way,
}

impl ElementKind {
    /// Return the element kind as used in OSM URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
        }
    }

    /// Build the openstreetmap.org links for an element of this kind.
    ///
    /// # Examples
    /// ```
    /// use uptodate_core::ElementKind;
    ///
    /// let links = ElementKind::Way.osm_links(42);
    /// assert_eq!(links.history, "https://www.openstreetmap.org/way/42/history");
    /// assert_eq!(links.edit, "https://www.openstreetmap.org/edit?way=42");
    /// ```
    #[must_use]
    pub fn osm_links(self, id: u64) -> OsmLinks {
        let kind = self.as_str();
        OsmLinks {
            edit: format!("{OSM_BASE_URL}/edit?{kind}={id}"),
            history: format!("{OSM_BASE_URL}/{kind}/{id}/history"),
            details: format!("{OSM_BASE_URL}/{kind}/{id}"),
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Links to an element on openstreetmap.org.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OsmLinks {
    /// Opens the element in the default web editor.
    pub edit: String,
    /// Lists every version of the element.
    pub history: String,
    /// Shows the current version of the element.
    pub details: String,
}

/// Geometry of a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    /// A node location.
    Point(Coord<f64>),
    /// A way's node locations in order.
    Line(LineString<f64>),
}

impl FeatureGeometry {
    /// Return the OSM element kind implied by the geometry.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Point(_) => ElementKind::Node,
            Self::Line(_) => ElementKind::Way,
        }
    }

    /// Return the coordinate used to place the feature on a map.
    ///
    /// Points anchor at their own location and lines at their centroid.
    /// Returns `None` for an empty line.
    #[must_use]
    pub fn anchor(&self) -> Option<Coord<f64>> {
        match self {
            Self::Point(location) => Some(*location),
            Self::Line(line) => line.centroid().map(|point| point.0),
        }
    }
}

/// Edit-history metadata attached to a feature.
///
/// Every field is optional: the backend omits fields it could not compute,
/// and scoring treats a missing field as a malformed feature for the modes
/// that need it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureMetadata {
    /// Timestamp of the latest version.
    pub lastedit: Option<DateTime<Utc>>,
    /// Timestamp of the first version.
    pub created: Option<DateTime<Utc>>,
    /// Current version number, which is also the revision count.
    pub version: Option<u32>,
    /// Average number of days between two edits.
    pub average_update_days: Option<f64>,
}

/// A geographic feature and its edit-history metadata.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use uptodate_core::{ElementKind, Feature, FeatureMetadata};
///
/// let metadata = FeatureMetadata {
///     version: Some(3),
///     ..FeatureMetadata::default()
/// };
/// let feature = Feature::point(7, Coord { x: 9.19, y: 45.46 }, metadata);
///
/// assert_eq!(feature.kind(), ElementKind::Node);
/// assert_eq!(feature.metadata.version, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// OSM identifier, unique within its element kind.
    pub id: u64,
    /// Geometry used for placement and clustering.
    pub geometry: FeatureGeometry,
    /// Edit-history metadata.
    pub metadata: FeatureMetadata,
}

impl Feature {
    /// Construct a feature from its parts.
    #[must_use]
    pub const fn new(id: u64, geometry: FeatureGeometry, metadata: FeatureMetadata) -> Self {
        Self {
            id,
            geometry,
            metadata,
        }
    }

    /// Construct a point feature.
    #[must_use]
    pub const fn point(id: u64, location: Coord<f64>, metadata: FeatureMetadata) -> Self {
        Self::new(id, FeatureGeometry::Point(location), metadata)
    }

    /// Return the OSM element kind of the feature.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.geometry.kind()
    }

    /// Return the openstreetmap.org links for the feature.
    #[must_use]
    pub fn osm_links(&self) -> OsmLinks {
        self.kind().osm_links(self.id)
    }
}

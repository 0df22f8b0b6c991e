//! Feature builders shared by unit, behaviour and property tests.

use chrono::{DateTime, Utc};
use geo::{Coord, LineString};

use crate::{Feature, FeatureGeometry, FeatureMetadata};

/// Builder producing features with only the metadata a test cares about.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    id: u64,
    geometry: FeatureGeometry,
    metadata: FeatureMetadata,
}

impl FeatureBuilder {
    /// Start a point feature located at the origin.
    #[must_use]
    pub fn node(id: u64) -> Self {
        Self {
            id,
            geometry: FeatureGeometry::Point(Coord { x: 0.0, y: 0.0 }),
            metadata: FeatureMetadata::default(),
        }
    }

    /// Start a line feature through the given coordinates.
    #[must_use]
    pub fn way(id: u64, coordinates: Vec<(f64, f64)>) -> Self {
        Self {
            id,
            geometry: FeatureGeometry::Line(LineString::from(coordinates)),
            metadata: FeatureMetadata::default(),
        }
    }

    /// Move a point feature.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.geometry = FeatureGeometry::Point(Coord { x, y });
        self
    }

    /// Set the version number.
    #[must_use]
    pub fn revisions(mut self, version: u32) -> Self {
        self.metadata.version = Some(version);
        self
    }

    /// Set the average number of days between edits.
    #[must_use]
    pub fn frequency(mut self, days: f64) -> Self {
        self.metadata.average_update_days = Some(days);
        self
    }

    /// Set the last-edit time from Unix seconds.
    #[must_use]
    pub fn lastedit(mut self, seconds: i64) -> Self {
        self.metadata.lastedit = DateTime::<Utc>::from_timestamp(seconds, 0);
        self
    }

    /// Set the creation time from Unix seconds.
    #[must_use]
    pub fn created(mut self, seconds: i64) -> Self {
        self.metadata.created = DateTime::<Utc>::from_timestamp(seconds, 0);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Feature {
        Feature::new(self.id, self.geometry, self.metadata)
    }
}

/// Point features at the origin with the given version numbers, numbered
/// from 1.
#[must_use]
pub fn revision_features(versions: &[u32]) -> Vec<Feature> {
    (1_u64..)
        .zip(versions)
        .map(|(id, version)| FeatureBuilder::node(id).revisions(*version).build())
        .collect()
}

/// Point features at the origin with the given update frequencies, numbered
/// from 1.
#[must_use]
pub fn frequency_features(days: &[f64]) -> Vec<Feature> {
    (1_u64..)
        .zip(days)
        .map(|(id, value)| FeatureBuilder::node(id).frequency(*value).build())
        .collect()
}

/// Point features carrying every metadata field, each derived from one seed.
///
/// A seed `s` yields a last edit `s` days after 2011-03-13, a creation
/// 1,000,000 seconds earlier, version `s + 1` and `s + 7` days between edits.
#[must_use]
pub fn full_features(seeds: &[u32]) -> Vec<Feature> {
    (1_u64..)
        .zip(seeds)
        .map(|(id, seed)| {
            let seconds = 1_300_000_000 + i64::from(*seed) * 86_400;
            FeatureBuilder::node(id)
                .lastedit(seconds)
                .created(seconds - 1_000_000)
                .revisions(seed + 1)
                .frequency(f64::from(*seed) + 7.0)
                .build()
        })
        .collect()
}

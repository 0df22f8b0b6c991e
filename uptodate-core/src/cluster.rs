//! Cluster aggregation over scored features.
//!
//! A cluster is represented by a single score chosen at a caller-supplied
//! [`Percentile`] of its members' scores. Scores travel with each
//! [`ScoredFeature`], so aggregation never has to map rendered colours back
//! to scores.

use std::collections::BTreeMap;

use geo::{BoundingRect, Coord, MultiPoint, Rect};
use log::debug;
use thiserror::Error;

use crate::{Colour, Percentile, Score, ScoredFeature, colour_for};

/// Pick the representative score of a cluster.
///
/// Member scores are sorted ascending and the member at the nearest-rank
/// index for `percentile` is returned. Returns `None` for an empty cluster.
///
/// # Examples
/// ```
/// use uptodate_core::{Percentile, Score, aggregate_cluster};
///
/// let scores = [Score::new(0.9), Score::new(0.1), Score::new(0.5)];
/// assert_eq!(aggregate_cluster(&scores, Percentile::MEDIAN), Some(Score::new(0.5)));
/// assert_eq!(aggregate_cluster(&scores, Percentile::MIN), Some(Score::new(0.1)));
/// assert_eq!(aggregate_cluster(&[], Percentile::MEDIAN), None);
/// ```
#[must_use]
pub fn aggregate_cluster(scores: &[Score], percentile: Percentile) -> Option<Score> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(Score::total_cmp);
    let index = percentile.rank(sorted.len())?;
    sorted.get(index).copied()
}

/// Marker drawn for a cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClusterIcon {
    /// Representative score.
    pub score: Score,
    /// Colour of the representative score.
    pub colour: Colour,
    /// Number of members.
    pub count: usize,
}

impl ClusterIcon {
    /// Build the icon for a cluster with the given member scores.
    ///
    /// Returns `None` for an empty cluster.
    #[must_use]
    pub fn from_scores(scores: &[Score], percentile: Percentile) -> Option<Self> {
        let score = aggregate_cluster(scores, percentile)?;
        Some(Self {
            score,
            colour: colour_for(score),
            count: scores.len(),
        })
    }
}

/// A non-empty grid cell.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cluster {
    /// Row index, counted from the top edge.
    pub row: usize,
    /// Column index, counted from the left edge.
    pub col: usize,
    /// Aggregated marker.
    pub icon: ClusterIcon,
    /// Identifiers of the member features in input order.
    pub members: Vec<u64>,
}

/// Errors raised when configuring a [`GridClusterer`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// The grid must have at least one cell per side.
    #[error("grid resolution must be at least 1")]
    ZeroResolution,
    /// A bounding-box coordinate was NaN or infinite.
    #[error("grid bounds must be finite, got {min:?}..{max:?}")]
    NonFiniteBounds {
        /// Lower-left corner.
        min: Coord<f64>,
        /// Upper-right corner.
        max: Coord<f64>,
    },
}

/// Bins scored features into a `resolution × resolution` grid over a
/// bounding box.
///
/// Features outside the box, or without a location, are dropped. Each
/// remaining feature lands in exactly one cell; features on the right or
/// bottom edge fall into the last column or row.
///
/// # Examples
/// ```
/// use geo::{Coord, Rect};
/// use uptodate_core::GridClusterer;
///
/// # fn main() -> Result<(), uptodate_core::GridError> {
/// let bounds = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 10.0 });
/// let grid = GridClusterer::new(bounds, 2)?;
/// assert_eq!(grid.cell(Coord { x: 1.0, y: 9.0 }), Some((0, 0)));
/// assert_eq!(grid.cell(Coord { x: 10.0, y: 0.0 }), Some((1, 1)));
/// assert_eq!(grid.cell(Coord { x: 11.0, y: 0.0 }), None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridClusterer {
    bounds: Rect<f64>,
    resolution: usize,
}

impl GridClusterer {
    /// Create a clusterer for the given bounds.
    ///
    /// # Errors
    /// Returns [`GridError::ZeroResolution`] when `resolution` is zero and
    /// [`GridError::NonFiniteBounds`] when a corner is not finite.
    pub fn new(bounds: Rect<f64>, resolution: usize) -> Result<Self, GridError> {
        if resolution == 0 {
            return Err(GridError::ZeroResolution);
        }
        let (min, max) = (bounds.min(), bounds.max());
        if ![min.x, min.y, max.x, max.y].iter().all(|value| value.is_finite()) {
            return Err(GridError::NonFiniteBounds { min, max });
        }
        Ok(Self { bounds, resolution })
    }

    /// Create a clusterer covering every located feature.
    ///
    /// Returns `Ok(None)` when no feature has a location.
    ///
    /// # Errors
    /// See [`GridClusterer::new`].
    pub fn covering(
        features: &[ScoredFeature],
        resolution: usize,
    ) -> Result<Option<Self>, GridError> {
        let anchors: MultiPoint<f64> = features
            .iter()
            .filter_map(|feature| feature.location)
            .map(geo::Point::from)
            .collect();
        anchors
            .bounding_rect()
            .map(|bounds| Self::new(bounds, resolution))
            .transpose()
    }

    /// Bounding box covered by the grid.
    #[must_use]
    pub const fn bounds(&self) -> Rect<f64> {
        self.bounds
    }

    /// Number of cells per side.
    #[must_use]
    pub const fn resolution(&self) -> usize {
        self.resolution
    }

    /// Return the `(row, col)` cell holding `location`, or `None` when it
    /// lies outside the bounds.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "cell offsets are measured from the top-left corner"
    )]
    pub fn cell(&self, location: Coord<f64>) -> Option<(usize, usize)> {
        let (min, max) = (self.bounds.min(), self.bounds.max());
        let inside = (min.x..=max.x).contains(&location.x) && (min.y..=max.y).contains(&location.y);
        if !inside {
            return None;
        }
        let row = bin(max.y - location.y, self.bounds.height(), self.resolution);
        let col = bin(location.x - min.x, self.bounds.width(), self.resolution);
        Some((row, col))
    }

    /// Group features into cells and aggregate each cell at `percentile`.
    ///
    /// Clusters are returned in row-major order.
    #[must_use]
    pub fn cluster(&self, features: &[ScoredFeature], percentile: Percentile) -> Vec<Cluster> {
        let mut cells: BTreeMap<(usize, usize), Vec<&ScoredFeature>> = BTreeMap::new();
        for feature in features {
            match feature.location.and_then(|location| self.cell(location)) {
                Some(cell) => cells.entry(cell).or_default().push(feature),
                None => debug!("{} {} is outside the grid", feature.kind, feature.id),
            }
        }

        cells
            .into_iter()
            .filter_map(|((row, col), members)| {
                let scores: Vec<Score> = members.iter().map(|member| member.score).collect();
                let icon = ClusterIcon::from_scores(&scores, percentile)?;
                Some(Cluster {
                    row,
                    col,
                    icon,
                    members: members.iter().map(|member| member.id).collect(),
                })
            })
            .collect()
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the cell index is a clamped, non-negative floor of a float ratio"
)]
fn bin(offset: f64, extent: f64, resolution: usize) -> usize {
    let last = resolution.saturating_sub(1);
    if extent.is_nan() || extent <= 0.0 {
        return 0;
    }
    let index = (resolution as f64 * offset / extent).floor().max(0.0);
    (index as usize).min(last)
}

//! Core domain types and scoring for the Is-OSM-up-to-date engine.
//!
//! The crate turns OpenStreetMap features carrying edit-history metadata into
//! normalised scores and viridis colours for a selected [`Mode`], aggregates
//! clusters of scored features at a [`Percentile`] and summarises each mode
//! with quartile statistics. All computation is synchronous and free of I/O.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cluster;
pub mod colour;
pub mod feature;
pub mod mode;
pub mod percentile;
pub mod scaler;
pub mod score;
pub mod stats;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use cluster::{Cluster, ClusterIcon, GridClusterer, GridError, aggregate_cluster};
pub use colour::{Colour, colour_for};
pub use feature::{ElementKind, Feature, FeatureGeometry, FeatureMetadata, OSM_BASE_URL, OsmLinks};
pub use mode::{Mode, ModeDescriptor, ModeParseError, ModeTable, OSM_HISTORY_START_SECS};
pub use percentile::{Percentile, PercentileError};
pub use scaler::{
    ColourTable, Extremes, Legend, MetricScale, ScoredFeature, ValueRange, compute_range,
    score_feature, score_value,
};
pub use score::Score;
pub use stats::{Statistics, Summary, quantile_inclusive};

//! Facade crate for the uptodate engine.
//!
//! This crate re-exports the scoring, clustering and statistics types and,
//! behind the `http` feature, the GeoJSON decoder and backend client.

#![forbid(unsafe_code)]

pub use uptodate_core::{
    Cluster, ClusterIcon, Colour, ColourTable, ElementKind, Extremes, Feature, FeatureGeometry,
    FeatureMetadata, GridClusterer, GridError, Legend, MetricScale, Mode, ModeDescriptor,
    ModeParseError, ModeTable, OsmLinks, Percentile, PercentileError, Score, ScoredFeature,
    Statistics, Summary, ValueRange, aggregate_cluster, colour_for,
};

#[cfg(feature = "http")]
pub use uptodate_data::{
    ApiClient, ApiClientConfig, ApiError, ClientBuildError, FeatureSource, GeoJsonError,
    OsmElement, parse_feature_collection, read_feature_collection,
};

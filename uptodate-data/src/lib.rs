//! Data access for the Is-OSM-up-to-date engine.
//!
//! Responsibilities:
//! - Decode GeoJSON feature collections into core [`uptodate_core::Feature`]s.
//! - Provide a blocking HTTP client for the backend API.
//!
//! Boundaries:
//! - Do not encode scoring rules (live in `uptodate-core`).
//! - Keep async HTTP behind a synchronous interface.
//!
//! Invariants:
//! - Malformed features are skipped with a warning, never coerced.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod api;
pub mod geojson;

pub use api::{
    ApiClient, ApiClientConfig, ApiError, ClientBuildError, DEFAULT_BASE_URL, ElementResponse,
    FeatureSource, OsmElement,
};
pub use geojson::{GeoJsonError, parse_feature_collection, read_feature_collection};

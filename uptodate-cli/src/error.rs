//! Error types emitted by the uptodate CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use uptodate_core::GridError;
use uptodate_data::geojson::GeoJsonError;
use uptodate_data::{ApiError, ClientBuildError};

/// Errors emitted by the uptodate CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A bounding box coordinate is NaN or infinite.
    #[error("{field} must be a finite coordinate, got {value}")]
    NonFiniteCoordinate {
        /// Option name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A bounding box has its lower corner above its upper one on an axis.
    #[error("{min_field} ({min}) must not exceed {max_field} ({max})")]
    InvertedBounds {
        /// Option naming the lower bound.
        min_field: &'static str,
        /// Option naming the upper bound.
        max_field: &'static str,
        /// Rejected lower bound.
        min: f64,
        /// Rejected upper bound.
        max: f64,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the GeoJSON input failed.
    #[error("failed to open GeoJSON input at {path:?}: {source}")]
    OpenInput {
        /// Input path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The GeoJSON input could not be decoded.
    #[error("failed to parse GeoJSON input at {path:?}: {source}")]
    ParseInput {
        /// Input path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: GeoJsonError,
    },
    /// The clustering grid could not be configured.
    #[error("invalid clustering grid: {0}")]
    Grid(#[from] GridError),
    /// Constructing the backend client failed.
    #[error("failed to build backend client for {base_url:?}: {source}")]
    BuildClient {
        /// Configured backend URL.
        base_url: String,
        /// Underlying construction error.
        #[source]
        source: ClientBuildError,
    },
    /// The backend request failed.
    #[error("failed to fetch features: {0}")]
    Fetch(#[from] ApiError),
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

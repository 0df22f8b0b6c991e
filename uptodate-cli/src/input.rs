//! Loading GeoJSON inputs from disk.

use std::io::{BufReader, ErrorKind};

use camino::Utf8Path;
use log::debug;
use uptodate_core::Feature;
use uptodate_data::read_feature_collection;

use crate::CliError;
use crate::fs::{file_is_file, open_utf8_file};

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == ErrorKind::NotFound => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Decode the feature collection stored at `path`.
pub(crate) fn load_features(path: &Utf8Path) -> Result<Vec<Feature>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    let features =
        read_feature_collection(BufReader::new(file)).map_err(|source| CliError::ParseInput {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("loaded {} features from {path}", features.len());
    Ok(features)
}

//! Test helpers for writing GeoJSON inputs and fixing the mode table.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::DateTime;
use tempfile::TempDir;
use uptodate_core::ModeTable;

/// Three scored points and one point without an edit date.
///
/// Frequencies are edits per year, so the days between edits are 365, 73 and 5.
///
/// | id | lastedit   | revisions | frequency | location     |
/// |----|------------|-----------|-----------|--------------|
/// | 1  | 2015-01-01 | 1         | 1         | (9.0, 45.0)  |
/// | 2  | 2020-01-01 | 3         | 5         | (9.5, 45.5)  |
/// | 3  | 2023-01-01 | 9         | 73        | (10.0, 46.0) |
/// | 4  | missing    | 2         | missing   | (9.2, 45.2)  |
pub(super) const SAMPLE_COLLECTION: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [9.0, 45.0]},
     "properties": {"id": 1, "creation": 1262304000, "lastedit": 1420070400, "revisions": 1, "frequency": 1.0}},
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [9.5, 45.5]},
     "properties": {"id": 2, "creation": 1262304000, "lastedit": 1577836800, "revisions": 3, "frequency": 5.0}},
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [10.0, 46.0]},
     "properties": {"id": 3, "creation": 1262304000, "lastedit": 1672531200, "revisions": 9, "frequency": 73.0}},
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [9.2, 45.2]},
     "properties": {"id": 4, "creation": 1262304000, "revisions": 2}}
  ]
}"#;

/// Temporary directory exposing a UTF-8 root.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write the sample collection and return its path.
    pub(super) fn sample(&self) -> Utf8PathBuf {
        let path = self.path("features.geojson");
        write_utf8(&path, SAMPLE_COLLECTION.as_bytes());
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Mode table anchored at 2023-11-14 so date defaults are stable.
pub(super) fn fixed_table() -> ModeTable {
    ModeTable::at(DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp"))
}

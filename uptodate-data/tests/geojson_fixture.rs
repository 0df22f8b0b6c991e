//! Decoding a recorded backend response end to end.

mod support;

use std::fs::File;

use rstest::{fixture, rstest};
use uptodate_core::{ElementKind, Feature, MetricScale, Mode, ModeTable, Statistics};
use uptodate_data::read_feature_collection;

#[fixture]
fn features() -> Vec<Feature> {
    let path = support::fixtures_dir().join("milan.geojson");
    let file = File::open(&path).unwrap_or_else(|err| panic!("open {path:?}: {err}"));
    read_feature_collection(file).expect("fixture should decode")
}

#[rstest]
fn unsupported_geometries_are_dropped(features: Vec<Feature>) {
    let ids: Vec<u64> = features.iter().map(|feature| feature.id).collect();
    assert_eq!(ids, vec![101, 102, 103, 201, 104]);
    assert_eq!(
        features.iter().find(|feature| feature.id == 201).map(Feature::kind),
        Some(ElementKind::Way)
    );
}

#[rstest]
fn missing_values_are_skipped_when_scaling(features: Vec<Feature>) {
    let table = ModeTable::current();
    let scale = MetricScale::compute(&features, table.descriptor(Mode::LastEdit));

    assert_eq!(scale.skipped(), &[104]);
    assert_eq!(scale.extremes().worst, Some(102));
    assert_eq!(scale.extremes().best, Some(103));
    assert_eq!(scale.legend().worst, "2015-01-01");
    assert_eq!(scale.legend().best, "2023-05-01");
}

#[rstest]
fn statistics_count_only_present_values(features: Vec<Feature>) {
    let statistics = Statistics::compute(&features, &ModeTable::current());

    assert_eq!(statistics.revisions.count, 5);
    assert_eq!(statistics.revisions.min, Some(1.0));
    assert_eq!(statistics.revisions.median, Some(5.0));
    assert_eq!(statistics.frequency.count, 4);
    assert_eq!(statistics.frequency.min, Some(5.0));
    assert_eq!(statistics.frequency.max, Some(365.0));
}

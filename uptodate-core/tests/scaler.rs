//! Scaling behaviour across modes, generations and cluster percentiles.

use rstest::{fixture, rstest};
use uptodate_core::{
    ClusterIcon, MetricScale, Mode, ModeTable, Percentile, Score, aggregate_cluster, colour_for,
    compute_range,
};
use uptodate_core::test_support::{frequency_features, full_features, revision_features};

#[fixture]
fn table() -> ModeTable {
    ModeTable::current()
}

fn scores(scale: &MetricScale) -> Vec<Score> {
    scale.features().iter().map(|feature| feature.score).collect()
}

#[rstest]
fn non_inverted_range_spans_min_to_max(table: ModeTable) {
    let features = revision_features(&[4, 2, 9, 7]);
    let range = compute_range(&features, table.descriptor(Mode::Revisions));
    assert_eq!((range.worst, range.best), (2.0, 9.0));
}

#[rstest]
fn inverted_range_spans_max_to_min(table: ModeTable) {
    let features = frequency_features(&[14.0, 3.5, 200.0]);
    let range = compute_range(&features, table.descriptor(Mode::Frequency));
    assert_eq!((range.worst, range.best), (200.0, 3.5));
}

#[rstest]
#[case(Mode::Revisions)]
#[case(Mode::Frequency)]
fn extremes_score_zero_and_one(table: ModeTable, #[case] mode: Mode) {
    let features = full_features(&[3, 10, 1, 8]);
    let scale = MetricScale::compute(&features, table.descriptor(mode));
    let extremes = scale.extremes();

    let score_of = |id| {
        scale
            .features()
            .iter()
            .find(|feature| Some(feature.id) == id)
            .map(|feature| feature.score)
    };
    assert_eq!(score_of(extremes.worst), Some(Score::WORST));
    assert_eq!(score_of(extremes.best), Some(Score::BEST));
    assert!(scores(&scale).iter().all(|score| (0.0..=1.0).contains(&score.get())));
}

#[rstest]
#[case(Mode::Creation)]
#[case(Mode::LastEdit)]
#[case(Mode::Revisions)]
#[case(Mode::Frequency)]
fn degenerate_range_scores_everything_zero(table: ModeTable, #[case] mode: Mode) {
    let features = full_features(&[5, 5, 5]);
    let scale = MetricScale::compute(&features, table.descriptor(mode));

    assert!(scale.range().is_degenerate());
    assert_eq!(scores(&scale), vec![Score::WORST; 3]);
}

#[rstest]
#[case(0, 0.2)]
#[case(50, 0.5)]
#[case(100, 0.9)]
fn aggregation_selects_nearest_rank(#[case] percentile: u8, #[case] expected: f64) {
    let members = [Score::new(0.9), Score::new(0.2), Score::new(0.5)];
    let selected = Percentile::new(percentile).expect("valid percentile");
    assert_eq!(aggregate_cluster(&members, selected), Some(Score::new(expected)));
}

#[rstest]
fn cluster_icon_uses_the_aggregated_colour() {
    let members = [Score::new(0.2), Score::new(0.5), Score::new(0.9)];
    let icon = ClusterIcon::from_scores(&members, Percentile::default()).expect("icon");
    assert_eq!(icon.colour, colour_for(Score::new(0.5)));
    assert_eq!(icon.count, 3);
}

#[rstest]
fn mode_round_trip_reproduces_the_first_generation(table: ModeTable) {
    let features = full_features(&[2, 9, 4, 6]);
    let first = MetricScale::compute(&features, table.descriptor(Mode::LastEdit));
    let other = MetricScale::compute(&features, table.descriptor(Mode::Frequency));
    let again = MetricScale::compute(&features, table.descriptor(Mode::LastEdit));

    assert_ne!(first.range(), other.range());
    assert_eq!(first.range(), again.range());
    assert_eq!(scores(&first), scores(&again));
    assert_eq!(first, again);
}

#[rstest]
fn colour_table_is_rebuilt_per_generation(table: ModeTable) {
    let descriptor = table.descriptor(Mode::Revisions);
    let previous = MetricScale::compute(&revision_features(&[1, 2, 3, 4, 5]), descriptor);
    let current = MetricScale::compute(&revision_features(&[1, 5]), descriptor);

    let stale = colour_for(Score::new(0.25));
    assert_eq!(previous.colours().score_for(stale), Some(Score::new(0.25)));
    assert_eq!(current.colours().score_for(stale), None);
    assert_eq!(current.colours().len(), 2);
}

#[rstest]
fn empty_collection_reports_default_legend(table: ModeTable) {
    let scale = MetricScale::compute(&[], table.descriptor(Mode::Frequency));

    assert!(scale.is_empty());
    assert!(scale.colours().is_empty());
    assert_eq!(scale.legend().worst, "700 days");
    assert_eq!(scale.legend().best, "7 days");
    assert_eq!(scale.extremes().worst, None);
}

//! Behavioural tests for metric scaling and cluster aggregation.

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use uptodate_core::{
    Feature, FeatureMetadata, MetricScale, Mode, ModeTable, Percentile, Score, aggregate_cluster,
};
use uptodate_core::test_support::{frequency_features, revision_features};

#[fixture]
fn features() -> RefCell<Vec<Feature>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn scale() -> RefCell<Option<MetricScale>> {
    RefCell::new(None)
}

#[fixture]
fn cluster() -> Cell<Option<Score>> {
    Cell::new(None)
}

fn with_scale<T>(scale: &RefCell<Option<MetricScale>>, inspect: impl FnOnce(&MetricScale) -> T) -> T {
    let borrowed = scale.borrow();
    inspect(borrowed.as_ref().expect("features were scaled"))
}

#[given("features with revision counts {first}, {second} and {third}")]
fn given_revisions(
    #[from(features)] features: &RefCell<Vec<Feature>>,
    first: u32,
    second: u32,
    third: u32,
) {
    *features.borrow_mut() = revision_features(&[first, second, third]);
}

#[given("features updated every {first}, {second} and {third} days")]
fn given_frequencies(
    #[from(features)] features: &RefCell<Vec<Feature>>,
    first: f64,
    second: f64,
    third: f64,
) {
    *features.borrow_mut() = frequency_features(&[first, second, third]);
}

#[given("a feature without an update frequency")]
fn given_malformed(#[from(features)] features: &RefCell<Vec<Feature>>) {
    let mut borrowed = features.borrow_mut();
    let id = u64::try_from(borrowed.len()).expect("small collection") + 1;
    borrowed.push(Feature::point(
        id,
        Coord { x: 0.0, y: 0.0 },
        FeatureMetadata::default(),
    ));
}

#[when("I scale the features by {mode}")]
fn when_scale(
    #[from(features)] features: &RefCell<Vec<Feature>>,
    #[from(scale)] scale: &RefCell<Option<MetricScale>>,
    mode: Mode,
) {
    let table = ModeTable::current();
    let computed = MetricScale::compute(&features.borrow(), table.descriptor(mode));
    *scale.borrow_mut() = Some(computed);
}

#[when("I aggregate every feature at percentile {percentile}")]
fn when_aggregate(
    #[from(scale)] scale: &RefCell<Option<MetricScale>>,
    #[from(cluster)] cluster: &Cell<Option<Score>>,
    percentile: Percentile,
) {
    let scores: Vec<Score> = with_scale(scale, |computed| {
        computed.features().iter().map(|feature| feature.score).collect()
    });
    cluster.set(aggregate_cluster(&scores, percentile));
}

#[then("the scores are {first}, {second} and {third}")]
fn then_scores(
    #[from(scale)] scale: &RefCell<Option<MetricScale>>,
    first: f64,
    second: f64,
    third: f64,
) {
    let scores: Vec<f64> = with_scale(scale, |computed| {
        computed.features().iter().map(|feature| feature.score.get()).collect()
    });
    assert_eq!(scores, vec![first, second, third]);
}

#[then("the legend runs from \"{worst}\" to \"{best}\"")]
fn then_legend(#[from(scale)] scale: &RefCell<Option<MetricScale>>, worst: String, best: String) {
    let legend = with_scale(scale, |computed| computed.legend().clone());
    assert_eq!(legend.worst, worst);
    assert_eq!(legend.best, best);
}

#[then("the worst feature is {worst} and the best feature is {best}")]
fn then_extremes(#[from(scale)] scale: &RefCell<Option<MetricScale>>, worst: u64, best: u64) {
    let extremes = with_scale(scale, MetricScale::extremes);
    assert_eq!(extremes.worst, Some(worst));
    assert_eq!(extremes.best, Some(best));
}

#[then("{count} feature is skipped")]
fn then_skipped(#[from(scale)] scale: &RefCell<Option<MetricScale>>, count: usize) {
    let skipped = with_scale(scale, |computed| computed.skipped().len());
    assert_eq!(skipped, count);
}

#[then("the range runs from {worst} to {best}")]
fn then_range(#[from(scale)] scale: &RefCell<Option<MetricScale>>, worst: f64, best: f64) {
    let range = with_scale(scale, MetricScale::range);
    assert_eq!((range.worst, range.best), (worst, best));
}

#[then("the cluster score is {expected}")]
fn then_cluster(#[from(cluster)] cluster: &Cell<Option<Score>>, expected: f64) {
    assert_eq!(cluster.get(), Some(Score::new(expected)));
}

#[test]
fn scenario_indices_follow_feature_order() {
    let feature = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/features/scaler.feature");
    let contents = std::fs::read_to_string(&feature).unwrap_or_else(|err| {
        panic!("failed to read feature file {feature:?}: {err}");
    });
    let titles: Vec<&str> = contents
        .lines()
        .filter_map(|line| line.trim().strip_prefix("Scenario: "))
        .collect();
    assert_eq!(
        titles,
        [
            "scoring revision counts",
            "inverting update frequency",
            "skipping features without a value",
            "scoring identical values",
            "aggregating a cluster at a percentile",
        ],
        "scenario order changed in feature file"
    );
}

#[scenario(path = "tests/features/scaler.feature", index = 0)]
fn scoring_revision_counts(
    features: RefCell<Vec<Feature>>,
    scale: RefCell<Option<MetricScale>>,
    cluster: Cell<Option<Score>>,
) {
    let _ = (features, scale, cluster);
}

#[scenario(path = "tests/features/scaler.feature", index = 1)]
fn inverting_update_frequency(
    features: RefCell<Vec<Feature>>,
    scale: RefCell<Option<MetricScale>>,
    cluster: Cell<Option<Score>>,
) {
    let _ = (features, scale, cluster);
}

#[scenario(path = "tests/features/scaler.feature", index = 2)]
fn skipping_malformed_features(
    features: RefCell<Vec<Feature>>,
    scale: RefCell<Option<MetricScale>>,
    cluster: Cell<Option<Score>>,
) {
    let _ = (features, scale, cluster);
}

#[scenario(path = "tests/features/scaler.feature", index = 3)]
fn scoring_identical_values(
    features: RefCell<Vec<Feature>>,
    scale: RefCell<Option<MetricScale>>,
    cluster: Cell<Option<Score>>,
) {
    let _ = (features, scale, cluster);
}

#[scenario(path = "tests/features/scaler.feature", index = 4)]
fn aggregating_a_cluster(
    features: RefCell<Vec<Feature>>,
    scale: RefCell<Option<MetricScale>>,
    cluster: Cell<Option<Score>>,
) {
    let _ = (features, scale, cluster);
}

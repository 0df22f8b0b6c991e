//! Focused unit tests covering fetch configuration and feature sources.

use super::helpers::{SAMPLE_COLLECTION, fixed_table};
use super::*;
use crate::fetch::{FetchArgs, FetchConfig, config_from_layers_for_test, fetch_plan};
use geo::{Coord, Rect};
use rstest::{fixture, rstest};
use uptodate_core::Mode;
use uptodate_data::api::test_support::StubFeatureSource;
use uptodate_data::{ApiError, DEFAULT_BASE_URL, parse_feature_collection};

#[fixture]
fn milan_args() -> FetchArgs {
    FetchArgs {
        minx: Some(9.18),
        miny: Some(45.46),
        maxx: Some(9.2),
        maxy: Some(45.47),
        ..FetchArgs::default()
    }
}

#[rstest]
#[case::minx(ARG_MINX, ENV_FETCH_MINX)]
#[case::miny(ARG_MINY, ENV_FETCH_MINY)]
#[case::maxx(ARG_MAXX, ENV_FETCH_MAXX)]
#[case::maxy(ARG_MAXY, ENV_FETCH_MAXY)]
fn converting_fetch_without_a_coordinate_errors(
    milan_args: FetchArgs,
    #[case] missing: &'static str,
    #[case] env_var: &'static str,
) {
    let mut args = milan_args;
    match missing {
        ARG_MINX => args.minx = None,
        ARG_MINY => args.miny = None,
        ARG_MAXX => args.maxx = None,
        _ => args.maxy = None,
    }

    match FetchConfig::try_from(args).expect_err("missing coordinate") {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, missing);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn converting_fetch_rejects_non_finite_coordinates(milan_args: FetchArgs) {
    let args = FetchArgs {
        maxy: Some(f64::INFINITY),
        ..milan_args
    };

    match FetchConfig::try_from(args).expect_err("infinite latitude") {
        CliError::NonFiniteCoordinate { field, .. } => assert_eq!(field, ARG_MAXY),
        other => panic!("expected NonFiniteCoordinate, found {other:?}"),
    }
}

#[rstest]
fn fetch_config_applies_defaults(milan_args: FetchArgs) {
    let args = FetchArgs {
        filter: Some("   ".to_owned()),
        ..milan_args
    };

    let config = FetchConfig::try_from(args).expect("config should build");
    assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
    assert_eq!(config.filter, None);
    assert_eq!(
        config.bounds,
        Rect::new(Coord { x: 9.18, y: 45.46 }, Coord { x: 9.2, y: 45.47 })
    );
}

#[rstest]
#[case::longitude(Some(10.0), Some(45.0), Some(9.0), Some(46.0), ARG_MINX, ARG_MAXX)]
#[case::latitude(Some(9.0), Some(46.0), Some(10.0), Some(45.0), ARG_MINY, ARG_MAXY)]
fn fetch_config_rejects_inverted_corners(
    #[case] minx: Option<f64>,
    #[case] miny: Option<f64>,
    #[case] maxx: Option<f64>,
    #[case] maxy: Option<f64>,
    #[case] expected_min: &str,
    #[case] expected_max: &str,
) {
    let args = FetchArgs {
        minx,
        miny,
        maxx,
        maxy,
        ..FetchArgs::default()
    };

    let err = FetchConfig::try_from(args).expect_err("inverted box should fail");
    match err {
        CliError::InvertedBounds {
            min_field,
            max_field,
            ..
        } => {
            assert_eq!(min_field, expected_min);
            assert_eq!(max_field, expected_max);
        }
        other => panic!("expected InvertedBounds, found {other:?}"),
    }
}

#[rstest]
fn fetch_config_accepts_a_degenerate_box() {
    let args = FetchArgs {
        minx: Some(9.0),
        miny: Some(45.0),
        maxx: Some(9.0),
        maxy: Some(45.0),
        ..FetchArgs::default()
    };

    let config = FetchConfig::try_from(args).expect("config should build");
    assert_eq!(config.bounds.min(), Coord { x: 9.0, y: 45.0 });
    assert_eq!(config.bounds.max(), Coord { x: 9.0, y: 45.0 });
}

#[rstest]
fn fetch_plan_queries_the_source(milan_args: FetchArgs) {
    let args = FetchArgs {
        filter: Some("amenity=bench".to_owned()),
        mode: Some(Mode::Revisions),
        ..milan_args
    };
    let config = FetchConfig::try_from(args).expect("config should build");
    let features = parse_feature_collection(SAMPLE_COLLECTION).expect("sample collection");
    let source = StubFeatureSource::with_features(features);

    let plan = fetch_plan(&source, &config, &fixed_table()).expect("plan should build");

    let query = source.last_query().expect("source queried");
    assert_eq!(query.bounds, config.bounds);
    assert_eq!(query.filter.as_deref(), Some("amenity=bench"));
    assert_eq!(plan.mode, Mode::Revisions);
    assert_eq!(plan.features.len(), 4);
    assert!(plan.skipped.is_empty());
}

#[rstest]
fn fetch_plan_propagates_backend_errors(milan_args: FetchArgs) {
    let config = FetchConfig::try_from(milan_args).expect("config should build");
    let source = StubFeatureSource::with_error(ApiError::OhsomeUnavailable {
        url: "http://backend.example.com/api/getData".to_owned(),
    });

    match fetch_plan(&source, &config, &fixed_table()).expect_err("backend down") {
        CliError::Fetch(ApiError::OhsomeUnavailable { .. }) => {}
        other => panic!("expected Fetch(OhsomeUnavailable), found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "minx": 1.0, "miny": 2.0, "maxx": 3.0, "maxy": 4.0,
            "api_base_url": "http://from-file:8000",
        }),
        None,
    );
    composer.push_environment(json!({ "filter": "highway=*" }));
    composer.push_cli(json!({ "maxx": 5.0 }));

    let config = config_from_layers_for_test(composer.layers()).expect("merged config");
    assert_eq!(config.bounds.max(), Coord { x: 5.0, y: 4.0 });
    assert_eq!(config.filter.as_deref(), Some("highway=*"));
    assert_eq!(config.api_base_url, "http://from-file:8000");
}

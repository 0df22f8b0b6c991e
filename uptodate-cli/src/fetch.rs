//! Fetch command implementation for the uptodate CLI.

use std::io::Write;

use clap::Parser;
use geo::{Coord, Rect};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use uptodate_core::{Mode, ModeTable, Percentile};
use uptodate_data::{ApiClient, DEFAULT_BASE_URL, FeatureSource};

use crate::plan::{PlanOptions, RenderPlan, write_json};
use crate::render::plan_options;
use crate::{
    ARG_API_BASE_URL, ARG_FILTER, ARG_MAXX, ARG_MAXY, ARG_MINX, ARG_MINY, ARG_MODE,
    ARG_PERCENTILE, ARG_RESOLUTION, CliError, ENV_FETCH_MAXX, ENV_FETCH_MAXY, ENV_FETCH_MINX,
    ENV_FETCH_MINY,
};

/// CLI arguments for the `fetch` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Download the features of a bounding box from an \
                 is-osm-uptodate backend, score and cluster them, and print \
                 the resulting render plan as JSON.",
    about = "Colour the features of a bounding box fetched from the backend"
)]
#[ortho_config(prefix = "UPTODATE")]
pub(crate) struct FetchArgs {
    /// Western longitude of the bounding box.
    #[arg(long = ARG_MINX, value_name = "lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) minx: Option<f64>,
    /// Southern latitude of the bounding box.
    #[arg(long = ARG_MINY, value_name = "lat", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) miny: Option<f64>,
    /// Eastern longitude of the bounding box.
    #[arg(long = ARG_MAXX, value_name = "lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) maxx: Option<f64>,
    /// Northern latitude of the bounding box.
    #[arg(long = ARG_MAXY, value_name = "lat", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) maxy: Option<f64>,
    /// ohsome filter expression (e.g. "amenity=bench").
    #[arg(long = ARG_FILTER, value_name = "expr")]
    #[serde(default)]
    pub(crate) filter: Option<String>,
    /// Base URL of the backend (e.g. "https://is-osm-uptodate.frafra.eu").
    #[arg(long = ARG_API_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) api_base_url: Option<String>,
    /// Metadata dimension to colour by.
    #[arg(long = ARG_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) mode: Option<Mode>,
    /// Percentile representing each cluster (0-100).
    #[arg(long = ARG_PERCENTILE, value_name = "percentile")]
    #[serde(default)]
    pub(crate) percentile: Option<Percentile>,
    /// Number of clustering cells per side.
    #[arg(long = ARG_RESOLUTION, value_name = "cells")]
    #[serde(default)]
    pub(crate) resolution: Option<usize>,
}

impl FetchArgs {
    pub(crate) fn into_config(self) -> Result<FetchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        FetchConfig::try_from(merged)
    }
}

/// Resolved `fetch` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FetchConfig {
    pub(crate) bounds: Rect<f64>,
    pub(crate) filter: Option<String>,
    pub(crate) api_base_url: String,
    pub(crate) options: PlanOptions,
}

fn coordinate(
    value: Option<f64>,
    field: &'static str,
    env: &'static str,
) -> Result<f64, CliError> {
    let raw = value.ok_or(CliError::MissingArgument { field, env })?;
    if raw.is_finite() {
        Ok(raw)
    } else {
        Err(CliError::NonFiniteCoordinate { field, value: raw })
    }
}

/// Require the lower corner of one axis not to exceed the upper one.
fn ordered(
    (min_field, min): (&'static str, f64),
    (max_field, max): (&'static str, f64),
) -> Result<(), CliError> {
    if min > max {
        return Err(CliError::InvertedBounds {
            min_field,
            max_field,
            min,
            max,
        });
    }
    Ok(())
}

impl TryFrom<FetchArgs> for FetchConfig {
    type Error = CliError;

    fn try_from(args: FetchArgs) -> Result<Self, Self::Error> {
        let min = Coord {
            x: coordinate(args.minx, ARG_MINX, ENV_FETCH_MINX)?,
            y: coordinate(args.miny, ARG_MINY, ENV_FETCH_MINY)?,
        };
        let max = Coord {
            x: coordinate(args.maxx, ARG_MAXX, ENV_FETCH_MAXX)?,
            y: coordinate(args.maxy, ARG_MAXY, ENV_FETCH_MAXY)?,
        };
        ordered((ARG_MINX, min.x), (ARG_MAXX, max.x))?;
        ordered((ARG_MINY, min.y), (ARG_MAXY, max.y))?;
        let options = plan_options(args.mode, args.percentile, args.resolution)?;
        Ok(Self {
            bounds: Rect::new(min, max),
            filter: args.filter.filter(|expr| !expr.trim().is_empty()),
            api_base_url: args
                .api_base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            options,
        })
    }
}

/// Builds the feature source for the current fetch invocation.
pub(super) trait FeatureSourceBuilder {
    fn build(&self, config: &FetchConfig) -> Result<Box<dyn FeatureSource>, CliError>;
}

pub(super) struct ApiFeatureSourceBuilder;

impl FeatureSourceBuilder for ApiFeatureSourceBuilder {
    fn build(&self, config: &FetchConfig) -> Result<Box<dyn FeatureSource>, CliError> {
        let client =
            ApiClient::new(config.api_base_url.clone()).map_err(|source| CliError::BuildClient {
                base_url: config.api_base_url.clone(),
                source,
            })?;
        Ok(Box::new(client))
    }
}

pub(super) fn run_fetch(args: FetchArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_fetch_with(args, &ApiFeatureSourceBuilder, &ModeTable::current(), &mut stdout)
}

pub(super) fn run_fetch_with(
    args: FetchArgs,
    builder: &dyn FeatureSourceBuilder,
    table: &ModeTable,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let source = builder.build(&config)?;
    let plan = fetch_plan(source.as_ref(), &config, table)?;
    write_json(writer, &plan)
}

/// Fetch the configured bounding box and build its render plan.
pub(crate) fn fetch_plan(
    source: &dyn FeatureSource,
    config: &FetchConfig,
    table: &ModeTable,
) -> Result<RenderPlan, CliError> {
    let features = source.features(&config.bounds, config.filter.as_deref())?;
    info!(
        "fetched {} features from {}",
        features.len(),
        config.api_base_url
    );
    RenderPlan::build(&features, table, config.options)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<FetchConfig, CliError> {
    let merged = FetchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    FetchConfig::try_from(merged)
}

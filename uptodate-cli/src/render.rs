//! Render command implementation for the uptodate CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use uptodate_core::{GridError, Mode, ModeTable, Percentile};

use crate::input::{load_features, require_existing};
use crate::plan::{DEFAULT_RESOLUTION, PlanOptions, RenderPlan, write_json};
use crate::{
    ARG_INPUT, ARG_MODE, ARG_PERCENTILE, ARG_RESOLUTION, CliError, ENV_RENDER_INPUT,
};

/// CLI arguments for the `render` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score every feature of a GeoJSON collection for one mode, \
                 cluster the scored features on a square grid and print the \
                 resulting render plan as JSON.",
    about = "Colour a GeoJSON feature collection"
)]
#[ortho_config(prefix = "UPTODATE")]
pub(crate) struct RenderArgs {
    /// Path to a GeoJSON FeatureCollection.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
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

impl RenderArgs {
    pub(crate) fn into_config(self) -> Result<RenderConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RenderConfig::try_from(merged)
    }
}

/// Resolve scaling options, rejecting an empty grid.
pub(crate) fn plan_options(
    mode: Option<Mode>,
    percentile: Option<Percentile>,
    resolution: Option<usize>,
) -> Result<PlanOptions, CliError> {
    let cells = resolution.unwrap_or(DEFAULT_RESOLUTION);
    if cells == 0 {
        return Err(CliError::Grid(GridError::ZeroResolution));
    }
    Ok(PlanOptions {
        mode: mode.unwrap_or_default(),
        percentile: percentile.unwrap_or_default(),
        resolution: cells,
    })
}

/// Resolved `render` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderConfig {
    pub(crate) input: Utf8PathBuf,
    pub(crate) options: PlanOptions,
}

impl RenderConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.input, ARG_INPUT)
    }
}

impl TryFrom<RenderArgs> for RenderConfig {
    type Error = CliError;

    fn try_from(args: RenderArgs) -> Result<Self, Self::Error> {
        let input = args.input.ok_or(CliError::MissingArgument {
            field: ARG_INPUT,
            env: ENV_RENDER_INPUT,
        })?;
        let options = plan_options(args.mode, args.percentile, args.resolution)?;
        Ok(Self { input, options })
    }
}

pub(super) fn run_render(args: RenderArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_render_with(args, &ModeTable::current(), &mut stdout)
}

pub(super) fn run_render_with(
    args: RenderArgs,
    table: &ModeTable,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let plan = render_file(&config.input, table, config.options)?;
    write_json(writer, &plan)
}

/// Load a GeoJSON file and build its render plan.
pub(crate) fn render_file(
    path: &Utf8Path,
    table: &ModeTable,
    options: PlanOptions,
) -> Result<RenderPlan, CliError> {
    let features = load_features(path)?;
    RenderPlan::build(&features, table, options)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RenderConfig, CliError> {
    let merged = RenderArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RenderConfig::try_from(merged)
}

//! Stats command implementation for the uptodate CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use uptodate_core::{ModeTable, Statistics};

use crate::input::{load_features, require_existing};
use crate::plan::write_json;
use crate::{ARG_INPUT, CliError, ENV_STATS_INPUT};

/// CLI arguments for the `stats` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Summarise every metadata dimension of a GeoJSON collection \
                 with its minimum, quartiles and maximum.",
    about = "Print per-mode statistics of a GeoJSON feature collection"
)]
#[ortho_config(prefix = "UPTODATE")]
pub(crate) struct StatsArgs {
    /// Path to a GeoJSON FeatureCollection.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
}

pub(super) fn run_stats(args: StatsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_stats_with(args, &ModeTable::current(), &mut stdout)
}

pub(super) fn run_stats_with(
    args: StatsArgs,
    table: &ModeTable,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let input = merged.input.ok_or(CliError::MissingArgument {
        field: ARG_INPUT,
        env: ENV_STATS_INPUT,
    })?;
    require_existing(&input, ARG_INPUT)?;
    let features = load_features(&input)?;
    write_json(writer, &Statistics::compute(&features, table))
}

//! Command-line interface for the uptodate engine.
//!
//! Every subcommand prints JSON on standard output: `render` and `fetch`
//! emit a render plan (legend, per-feature colours and clusters), `stats`
//! emits the per-mode summary served by the backend's statistics endpoint.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fetch;
mod fs;
mod input;
mod plan;
mod render;
mod stats;

pub use error::CliError;

use fetch::{FetchArgs, run_fetch};
use render::{RenderArgs, run_render};
use stats::{StatsArgs, run_stats};

pub(crate) const ARG_INPUT: &str = "input";
pub(crate) const ARG_MODE: &str = "mode";
pub(crate) const ARG_PERCENTILE: &str = "percentile";
pub(crate) const ARG_RESOLUTION: &str = "resolution";
pub(crate) const ARG_MINX: &str = "minx";
pub(crate) const ARG_MINY: &str = "miny";
pub(crate) const ARG_MAXX: &str = "maxx";
pub(crate) const ARG_MAXY: &str = "maxy";
pub(crate) const ARG_FILTER: &str = "filter";
pub(crate) const ARG_API_BASE_URL: &str = "api-base-url";
pub(crate) const ENV_RENDER_INPUT: &str = "UPTODATE_CMDS_RENDER_INPUT";
pub(crate) const ENV_STATS_INPUT: &str = "UPTODATE_CMDS_STATS_INPUT";
pub(crate) const ENV_FETCH_MINX: &str = "UPTODATE_CMDS_FETCH_MINX";
pub(crate) const ENV_FETCH_MINY: &str = "UPTODATE_CMDS_FETCH_MINY";
pub(crate) const ENV_FETCH_MAXX: &str = "UPTODATE_CMDS_FETCH_MAXX";
pub(crate) const ENV_FETCH_MAXY: &str = "UPTODATE_CMDS_FETCH_MAXY";

/// Run the uptodate CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, input loading,
/// the backend request or writing the output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Render(args) => run_render(args),
        Command::Fetch(args) => run_fetch(args),
        Command::Stats(args) => run_stats(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "uptodate",
    about = "Colour OpenStreetMap features by how up to date they are",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score and cluster a GeoJSON file.
    Render(RenderArgs),
    /// Score and cluster a bounding box fetched from the backend.
    Fetch(FetchArgs),
    /// Summarise a GeoJSON file per mode.
    Stats(StatsArgs),
}

#[cfg(test)]
mod tests;

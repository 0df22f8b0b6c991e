//! Render plan shared by the `render` and `fetch` commands.
//!
//! A plan is everything a map front end needs to draw one generation: the
//! legend, each feature's colour and the clustered markers.

use std::io::Write;

use serde::Serialize;
use uptodate_core::{
    Cluster, Extremes, Feature, GridClusterer, Legend, MetricScale, Mode, ModeTable, Percentile,
    ScoredFeature, ValueRange,
};

use crate::CliError;

/// Default number of clustering cells per side.
pub(crate) const DEFAULT_RESOLUTION: usize = 16;

/// Scaling and clustering options common to every rendering command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlanOptions {
    pub(crate) mode: Mode,
    pub(crate) percentile: Percentile,
    pub(crate) resolution: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            percentile: Percentile::default(),
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

/// Serialisable result of scoring and clustering a feature collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct RenderPlan {
    pub(crate) mode: Mode,
    pub(crate) percentile: Percentile,
    pub(crate) range: ValueRange,
    pub(crate) legend: Legend,
    pub(crate) extremes: Extremes,
    pub(crate) features: Vec<ScoredFeature>,
    pub(crate) skipped: Vec<u64>,
    pub(crate) clusters: Vec<Cluster>,
}

impl RenderPlan {
    /// Score `features` for the selected mode and cluster them on a grid
    /// covering their anchors.
    pub(crate) fn build(
        features: &[Feature],
        table: &ModeTable,
        options: PlanOptions,
    ) -> Result<Self, CliError> {
        let scale = MetricScale::compute(features, table.descriptor(options.mode));
        let clusters = GridClusterer::covering(scale.features(), options.resolution)?
            .map(|grid| grid.cluster(scale.features(), options.percentile))
            .unwrap_or_default();
        Ok(Self {
            mode: scale.mode(),
            percentile: options.percentile,
            range: scale.range(),
            legend: scale.legend().clone(),
            extremes: scale.extremes(),
            features: scale.features().to_vec(),
            skipped: scale.skipped().to_vec(),
            clusters,
        })
    }
}

/// Write `value` as pretty-printed JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

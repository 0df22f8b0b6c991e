//! Metric scaling: from raw feature metadata to scores and colours.
//!
//! A [`MetricScale`] is one generation of scaling output for a feature
//! collection and a mode. It owns everything derived from that pair (the
//! observed range, per-feature scores and colours, the colour lookup table,
//! legend labels and extreme features), so a new collection or a mode switch
//! always means computing a new `MetricScale` from scratch. Nothing is
//! carried over between generations.
//!
//! # Examples
//! ```
//! use geo::Coord;
//! use uptodate_core::{Feature, FeatureMetadata, MetricScale, Mode, ModeTable};
//!
//! let features: Vec<Feature> = [1_u32, 5, 9]
//!     .into_iter()
//!     .enumerate()
//!     .map(|(index, version)| {
//!         let metadata = FeatureMetadata { version: Some(version), ..FeatureMetadata::default() };
//!         Feature::point(index as u64, Coord { x: 0.0, y: 0.0 }, metadata)
//!     })
//!     .collect();
//!
//! let table = ModeTable::current();
//! let scale = MetricScale::compute(&features, table.descriptor(Mode::Revisions));
//!
//! assert_eq!(scale.range().worst, 1.0);
//! assert_eq!(scale.range().best, 9.0);
//! assert_eq!(scale.legend().best, "9");
//! let scores: Vec<f64> = scale.features().iter().map(|f| f.score.get()).collect();
//! assert_eq!(scores, vec![0.0, 0.5, 1.0]);
//! ```

use std::collections::HashMap;

use geo::Coord;
use log::warn;

use crate::{Colour, ElementKind, Feature, Mode, ModeDescriptor, Score, colour_for};

/// Worst and best values observed for a mode.
///
/// For a non-inverted mode `worst <= best`; for an inverted mode
/// `worst >= best`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValueRange {
    /// Value interpreted as the most stale data.
    pub worst: f64,
    /// Value interpreted as the healthiest data.
    pub best: f64,
}

impl ValueRange {
    /// Distance between the worst and best values.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "the span is a float difference")]
    pub fn span(self) -> f64 {
        (self.best - self.worst).abs()
    }

    /// Whether every observed value was equal.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        let span = self.span();
        span.is_nan() || span <= 0.0
    }
}

/// Compute the worst and best values among the scorable features.
///
/// Features without a finite value for the mode are ignored. When no
/// feature can be scored the mode's default worst and best values are
/// returned.
#[must_use]
pub fn compute_range(features: &[Feature], descriptor: &ModeDescriptor) -> ValueRange {
    let mut values = features.iter().filter_map(|feature| descriptor.value(feature));
    let Some(first) = values.next() else {
        return ValueRange {
            worst: descriptor.default_worst,
            best: descriptor.default_best,
        };
    };
    let (lowest, highest) = values.fold((first, first), |(lowest, highest), value| {
        (lowest.min(value), highest.max(value))
    });
    if descriptor.inverted {
        ValueRange {
            worst: highest,
            best: lowest,
        }
    } else {
        ValueRange {
            worst: lowest,
            best: highest,
        }
    }
}

/// Normalise a value into a score for the given range.
///
/// A degenerate range scores every value as [`Score::WORST`].
///
/// # Examples
/// ```
/// use uptodate_core::{ValueRange, score_value};
///
/// let inverted = ValueRange { worst: 700.0, best: 7.0 };
/// assert_eq!(score_value(7.0, inverted).get(), 1.0);
/// assert_eq!(score_value(700.0, inverted).get(), 0.0);
///
/// let flat = ValueRange { worst: 5.0, best: 5.0 };
/// assert_eq!(score_value(5.0, flat).get(), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "normalising divides the distance from the worst value by the span"
)]
pub fn score_value(value: f64, range: ValueRange) -> Score {
    if range.is_degenerate() {
        return Score::WORST;
    }
    Score::new((range.worst - value).abs() / range.span())
}

/// Score one feature and record its colour in `table`.
///
/// Returns `None`, leaving the table untouched, when the feature has no
/// usable value for the mode.
pub fn score_feature(
    feature: &Feature,
    descriptor: &ModeDescriptor,
    range: ValueRange,
    table: &mut ColourTable,
) -> Option<Score> {
    let value = descriptor.value(feature)?;
    let score = score_value(value, range);
    table.record(score);
    Some(score)
}

/// Reverse lookup from rendered colour to score.
///
/// A table belongs to exactly one [`MetricScale`] generation; colours from a
/// previous generation never resolve against it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColourTable {
    scores: HashMap<Colour, Score>,
}

impl ColourTable {
    /// Render `score` and remember which score produced the colour.
    pub fn record(&mut self, score: Score) -> Colour {
        let colour = colour_for(score);
        self.scores.insert(colour, score);
        colour
    }

    /// Return the score last rendered as `colour`.
    #[must_use]
    pub fn score_for(&self, colour: Colour) -> Option<Score> {
        self.scores.get(&colour).copied()
    }

    /// Number of distinct colours recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no colour has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// A feature together with its score for the active mode.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoredFeature {
    /// OSM identifier.
    pub id: u64,
    /// OSM element kind.
    pub kind: ElementKind,
    /// Map anchor; `None` for an empty line.
    pub location: Option<Coord<f64>>,
    /// Raw value read for the mode.
    pub value: f64,
    /// Normalised score.
    pub score: Score,
    /// Rendered colour.
    pub colour: Colour,
}

/// Pretty-printed worst and best labels for a colour legend.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Legend {
    /// Label shown at the worst end of the ramp.
    pub worst: String,
    /// Label shown at the best end of the ramp.
    pub best: String,
}

impl Legend {
    /// Format a range with a mode's pretty-printer.
    #[must_use]
    pub fn new(descriptor: &ModeDescriptor, range: ValueRange) -> Self {
        Self {
            worst: descriptor.pretty(range.worst),
            best: descriptor.pretty(range.best),
        }
    }
}

/// Features holding the worst and best values.
///
/// Ties resolve to the first feature in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Extremes {
    /// Identifier of the most stale feature.
    pub worst: Option<u64>,
    /// Identifier of the healthiest feature.
    pub best: Option<u64>,
}

/// One generation of scaling output for a feature collection and a mode.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricScale {
    mode: Mode,
    range: ValueRange,
    legend: Legend,
    features: Vec<ScoredFeature>,
    skipped: Vec<u64>,
    colours: ColourTable,
    extremes: Extremes,
}

impl MetricScale {
    /// Score every feature for the given mode.
    ///
    /// Features without a usable value are listed in [`MetricScale::skipped`]
    /// and logged; they never influence the range.
    #[must_use]
    #[expect(
        clippy::float_cmp,
        reason = "extremes are matched against copies of observed values"
    )]
    pub fn compute(features: &[Feature], descriptor: &ModeDescriptor) -> Self {
        let range = compute_range(features, descriptor);
        let mut colours = ColourTable::default();
        let mut scored = Vec::with_capacity(features.len());
        let mut skipped = Vec::new();
        let mut extremes = Extremes::default();

        for feature in features {
            let Some(value) = descriptor.value(feature) else {
                warn!(
                    "skipping {} {}: no usable {} value",
                    feature.kind(),
                    feature.id,
                    descriptor.mode
                );
                skipped.push(feature.id);
                continue;
            };
            if extremes.worst.is_none() && value == range.worst {
                extremes.worst = Some(feature.id);
            }
            if extremes.best.is_none() && value == range.best {
                extremes.best = Some(feature.id);
            }
            let score = score_value(value, range);
            scored.push(ScoredFeature {
                id: feature.id,
                kind: feature.kind(),
                location: feature.geometry.anchor(),
                value,
                score,
                colour: colours.record(score),
            });
        }

        Self {
            mode: descriptor.mode,
            range,
            legend: Legend::new(descriptor, range),
            features: scored,
            skipped,
            colours,
            extremes,
        }
    }

    /// Mode the scale was computed for.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Observed (or default) worst and best values.
    #[must_use]
    pub const fn range(&self) -> ValueRange {
        self.range
    }

    /// Legend labels for the range.
    #[must_use]
    pub const fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Scored features in input order.
    #[must_use]
    pub fn features(&self) -> &[ScoredFeature] {
        &self.features
    }

    /// Identifiers of features that could not be scored.
    #[must_use]
    pub fn skipped(&self) -> &[u64] {
        &self.skipped
    }

    /// Colour lookup table for this generation.
    #[must_use]
    pub const fn colours(&self) -> &ColourTable {
        &self.colours
    }

    /// Features holding the worst and best values.
    #[must_use]
    pub const fn extremes(&self) -> Extremes {
        self.extremes
    }

    /// Whether no feature could be scored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

//! Per-mode summary statistics for a feature collection.
//!
//! Quartiles use the inclusive method: the sorted values are treated as the
//! whole population and positions are interpolated linearly over `n - 1`
//! intervals, so the minimum and maximum are the 0th and 100th percentiles.

use crate::{Feature, Mode, ModeDescriptor, ModeTable};

/// Five-number summary of the values observed for one mode.
///
/// `min` and `max` need at least one value; the quartiles need two.
///
/// # Examples
/// ```
/// use uptodate_core::Summary;
///
/// let summary = Summary::from_values(vec![5.0, 1.0, 3.0, 2.0, 4.0]);
/// assert_eq!(summary.min, Some(1.0));
/// assert_eq!(summary.first_quartile, Some(2.0));
/// assert_eq!(summary.median, Some(3.0));
/// assert_eq!(summary.third_quartile, Some(4.0));
/// assert_eq!(summary.max, Some(5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Number of values summarised.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub count: usize,
    /// Smallest value.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub min: Option<f64>,
    /// 25th percentile.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "1st quartile", skip_serializing_if = "Option::is_none")
    )]
    pub first_quartile: Option<f64>,
    /// 50th percentile.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub median: Option<f64>,
    /// 75th percentile.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "3rd quartile", skip_serializing_if = "Option::is_none")
    )]
    pub third_quartile: Option<f64>,
    /// Largest value.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub max: Option<f64>,
}

impl Summary {
    /// Summarise a list of values. Non-finite values are ignored.
    #[must_use]
    pub fn from_values(mut values: Vec<f64>) -> Self {
        values.retain(|value| value.is_finite());
        values.sort_by(f64::total_cmp);
        let quartiles = values.len() >= 2;
        let quartile = |fraction: f64| {
            if quartiles {
                quantile_inclusive(&values, fraction)
            } else {
                None
            }
        };
        Self {
            count: values.len(),
            min: values.first().copied(),
            first_quartile: quartile(0.25),
            median: quartile(0.5),
            third_quartile: quartile(0.75),
            max: values.last().copied(),
        }
    }

    /// Summarise one mode over a feature collection.
    ///
    /// Zero values count as unset, as they do in the backend's statistics.
    #[must_use]
    pub fn for_mode(features: &[Feature], descriptor: &ModeDescriptor) -> Self {
        Self::from_values(
            features
                .iter()
                .filter_map(|feature| descriptor.value(feature))
                .filter(|value| value.abs() > 0.0)
                .collect(),
        )
    }
}

/// Return the inclusive quantile at `fraction` of ascending `sorted` values.
///
/// Returns `None` for an empty slice or a fraction outside `0.0..=1.0`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "quantile positions interpolate between two sorted values"
)]
pub fn quantile_inclusive(sorted: &[f64], fraction: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    if !(0.0..=1.0).contains(&fraction) {
        return None;
    }
    let position = fraction * last as f64;
    let lower = position.floor();
    let index = lower as usize;
    let below = *sorted.get(index)?;
    let Some(above) = sorted.get(index + 1) else {
        return Some(below);
    };
    Some(below + (position - lower) * (above - below))
}

/// Summaries for every mode, keyed by the mode identifier when serialised.
///
/// The serialised form matches the backend's statistics endpoint, so a
/// remote summary deserialises into the same type (without `count`).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Statistics {
    /// Creation timestamps.
    pub creation: Summary,
    /// Last-edit timestamps.
    pub lastedit: Summary,
    /// Revision counts.
    pub revisions: Summary,
    /// Days between edits.
    pub frequency: Summary,
}

impl Statistics {
    /// Summarise every mode over a feature collection.
    #[must_use]
    pub fn compute(features: &[Feature], table: &ModeTable) -> Self {
        let summary = |mode| Summary::for_mode(features, table.descriptor(mode));
        Self {
            creation: summary(Mode::Creation),
            lastedit: summary(Mode::LastEdit),
            revisions: summary(Mode::Revisions),
            frequency: summary(Mode::Frequency),
        }
    }

    /// Return the summary for one mode.
    #[must_use]
    pub const fn get(&self, mode: Mode) -> &Summary {
        match mode {
            Mode::Creation => &self.creation,
            Mode::LastEdit => &self.lastedit,
            Mode::Revisions => &self.revisions,
            Mode::Frequency => &self.frequency,
        }
    }
}

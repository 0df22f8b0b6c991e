//! Modes selecting which metadata dimension drives scoring.
//!
//! Each [`Mode`] is described by a [`ModeDescriptor`]: how to read the value
//! from a feature, how to print it, whether a lower value is better and
//! which worst/best values to show when nothing can be scored. The
//! descriptors live in an immutable [`ModeTable`] built once at start-up.
//!
//! # Examples
//! ```
//! use uptodate_core::Mode;
//!
//! assert_eq!(Mode::LastEdit.as_str(), "lastedit");
//! assert_eq!("frequency".parse::<Mode>(), Ok(Mode::Frequency));
//! ```

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{Feature, FeatureMetadata};

/// Start of the OSM full-history extract, in Unix seconds
/// (2007-10-08T00:00:00Z).
pub const OSM_HISTORY_START_SECS: i64 = 1_191_801_600;

/// Selectable metadata dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Date of the first version.
    Creation,
    /// Date of the latest version.
    #[default]
    LastEdit,
    /// Number of versions.
    Revisions,
    /// Average days between edits.
    Frequency,
}

impl Mode {
    /// Every mode, in display order.
    pub const ALL: [Self; 4] = [Self::Creation, Self::LastEdit, Self::Revisions, Self::Frequency];

    /// Return the mode identifier used in URLs and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Creation => "creation",
            Self::LastEdit => "lastedit",
            Self::Revisions => "revisions",
            Self::Frequency => "frequency",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mode identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{value}' (expected creation, lastedit, revisions or frequency)")]
pub struct ModeParseError {
    /// Rejected input.
    pub value: String,
}

impl std::str::FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "creation" => Ok(Self::Creation),
            "lastedit" => Ok(Self::LastEdit),
            "revisions" => Ok(Self::Revisions),
            "frequency" => Ok(Self::Frequency),
            _ => Err(ModeParseError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Behaviour of a single mode.
#[derive(Debug, Clone, Copy)]
pub struct ModeDescriptor {
    /// Mode being described.
    pub mode: Mode,
    /// Whether a numerically lower value is the better outcome.
    pub inverted: bool,
    /// Worst value reported when no feature can be scored.
    pub default_worst: f64,
    /// Best value reported when no feature can be scored.
    pub default_best: f64,
    extract: fn(&FeatureMetadata) -> Option<f64>,
    pretty: fn(f64) -> String,
}

impl ModeDescriptor {
    /// Read the mode's value from a feature.
    ///
    /// Returns `None` when the field is missing or not finite.
    #[must_use]
    pub fn value(&self, feature: &Feature) -> Option<f64> {
        (self.extract)(&feature.metadata).filter(|value| value.is_finite())
    }

    /// Format a value for display.
    ///
    /// # Examples
    /// ```
    /// use uptodate_core::{Mode, ModeTable};
    ///
    /// let table = ModeTable::current();
    /// assert_eq!(table.descriptor(Mode::Frequency).pretty(7.0), "7 days");
    /// assert_eq!(table.descriptor(Mode::LastEdit).pretty(0.0), "1970-01-01");
    /// ```
    #[must_use]
    pub fn pretty(&self, value: f64) -> String {
        (self.pretty)(value)
    }
}

/// Immutable table of mode descriptors.
///
/// Date modes default their best value to the table's reference time, so
/// the table is built for an explicit instant.
#[derive(Debug, Clone)]
pub struct ModeTable {
    reference: DateTime<Utc>,
    creation: ModeDescriptor,
    lastedit: ModeDescriptor,
    revisions: ModeDescriptor,
    frequency: ModeDescriptor,
}

impl ModeTable {
    /// Build the table for the given reference time.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use uptodate_core::{Mode, ModeTable};
    ///
    /// let reference = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    /// let table = ModeTable::at(reference);
    /// let lastedit = table.descriptor(Mode::LastEdit);
    /// assert_eq!(lastedit.pretty(lastedit.default_best), "2024-01-01");
    /// assert!(table.descriptor(Mode::Frequency).inverted);
    /// ```
    #[must_use]
    pub fn at(reference: DateTime<Utc>) -> Self {
        let history_start = unix_seconds(OSM_HISTORY_START_SECS);
        let now = unix_seconds(reference.timestamp());
        Self {
            reference,
            creation: ModeDescriptor {
                mode: Mode::Creation,
                inverted: false,
                default_worst: history_start,
                default_best: now,
                extract: |metadata| metadata.created.map(timestamp_value),
                pretty: pretty_date,
            },
            lastedit: ModeDescriptor {
                mode: Mode::LastEdit,
                inverted: false,
                default_worst: history_start,
                default_best: now,
                extract: |metadata| metadata.lastedit.map(timestamp_value),
                pretty: pretty_date,
            },
            revisions: ModeDescriptor {
                mode: Mode::Revisions,
                inverted: false,
                default_worst: 1.0,
                default_best: 10.0,
                extract: |metadata| metadata.version.map(f64::from),
                pretty: |value| format!("{value:.0}"),
            },
            frequency: ModeDescriptor {
                mode: Mode::Frequency,
                inverted: true,
                default_worst: 700.0,
                default_best: 7.0,
                extract: |metadata| metadata.average_update_days,
                pretty: |value| format!("{value:.0} days"),
            },
        }
    }

    /// Build the table for the current time.
    #[must_use]
    pub fn current() -> Self {
        Self::at(Utc::now())
    }

    /// Return the reference time used for date defaults.
    #[must_use]
    pub const fn reference(&self) -> DateTime<Utc> {
        self.reference
    }

    /// Return the descriptor for a mode.
    #[must_use]
    pub const fn descriptor(&self, mode: Mode) -> &ModeDescriptor {
        match mode {
            Mode::Creation => &self.creation,
            Mode::LastEdit => &self.lastedit,
            Mode::Revisions => &self.revisions,
            Mode::Frequency => &self.frequency,
        }
    }

    /// Iterate over every descriptor in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ModeDescriptor> {
        Mode::ALL.into_iter().map(|mode| self.descriptor(mode))
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "Unix seconds stay far below 2^52 for any OSM timestamp"
)]
const fn unix_seconds(seconds: i64) -> f64 {
    seconds as f64
}

fn timestamp_value(timestamp: DateTime<Utc>) -> f64 {
    unix_seconds(timestamp.timestamp())
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "timestamps are rounded to whole seconds before formatting"
)]
fn pretty_date(value: f64) -> String {
    let seconds = value.round() as i64;
    DateTime::<Utc>::from_timestamp(seconds, 0).map_or_else(
        || format!("{value:.0}"),
        |date| date.format("%Y-%m-%d").to_string(),
    )
}

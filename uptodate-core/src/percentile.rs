//! Percentile selecting the representative score of a cluster.

use thiserror::Error;

/// Integer percentile in the inclusive range `0..=100`.
///
/// # Examples
/// ```
/// use uptodate_core::Percentile;
///
/// # fn main() -> Result<(), uptodate_core::PercentileError> {
/// let median = Percentile::new(50)?;
/// assert_eq!(median.get(), 50);
/// assert!(Percentile::new(101).is_err());
/// assert_eq!(Percentile::clamped(250), Percentile::MAX);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "u8", try_from = "u8"))]
pub struct Percentile(u8);

/// Errors returned by [`Percentile::new`] and [`Percentile::from_str`].
///
/// [`Percentile::from_str`]: std::str::FromStr::from_str
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PercentileError {
    /// The value was above 100.
    #[error("percentile {value} is outside 0..=100")]
    OutOfRange {
        /// Rejected value.
        value: i64,
    },
    /// The text was not an integer.
    #[error("percentile '{value}' is not an integer")]
    NotAnInteger {
        /// Rejected input.
        value: String,
    },
}

impl Percentile {
    /// The minimum percentile.
    pub const MIN: Self = Self(0);
    /// The median.
    pub const MEDIAN: Self = Self(50);
    /// The maximum percentile.
    pub const MAX: Self = Self(100);

    /// Validate and construct a percentile.
    ///
    /// # Errors
    /// Returns [`PercentileError::OutOfRange`] when `value` exceeds 100.
    pub fn new(value: u8) -> Result<Self, PercentileError> {
        if value > 100 {
            return Err(PercentileError::OutOfRange {
                value: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Construct a percentile, saturating values outside `0..=100`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        u8::try_from(value.clamp(0, 100)).map_or(Self::MAX, Self)
    }

    /// Return the percentile as an integer.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Return the 0-based index of the selected member in a sorted list of
    /// `count` members.
    ///
    /// Uses the nearest-rank formula `ceil(p * count / 100) - 1`, clamped
    /// into `0..count`. Returns `None` when `count` is zero.
    ///
    /// # Examples
    /// ```
    /// use uptodate_core::Percentile;
    ///
    /// assert_eq!(Percentile::MEDIAN.rank(3), Some(1));
    /// assert_eq!(Percentile::MIN.rank(3), Some(0));
    /// assert_eq!(Percentile::MAX.rank(3), Some(2));
    /// assert_eq!(Percentile::MEDIAN.rank(0), None);
    /// ```
    #[must_use]
    pub fn rank(self, count: usize) -> Option<usize> {
        let last = count.checked_sub(1)?;
        let rank = (usize::from(self.0) * count).div_ceil(100);
        Some(rank.saturating_sub(1).min(last))
    }
}

impl Default for Percentile {
    fn default() -> Self {
        Self::MEDIAN
    }
}

impl std::fmt::Display for Percentile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Percentile {
    type Err = PercentileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.trim().parse().map_err(|_| PercentileError::NotAnInteger {
            value: s.to_owned(),
        })?;
        let small = u8::try_from(value).map_err(|_| PercentileError::OutOfRange { value })?;
        Self::new(small)
    }
}

impl TryFrom<u8> for Percentile {
    type Error = PercentileError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentile> for u8 {
    fn from(percentile: Percentile) -> Self {
        percentile.0
    }
}

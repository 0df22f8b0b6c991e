//! Normalised scores in the inclusive range `0.0..=1.0`.

use std::cmp::Ordering;

/// Normalised position of a value between the worst and best observed
/// values of a mode.
///
/// `0.0` marks the most stale data and `1.0` the healthiest. Construction
/// sanitises the raw value so every `Score` is finite and in range.
///
/// # Examples
/// ```
/// use uptodate_core::Score;
///
/// assert_eq!(Score::new(0.25).get(), 0.25);
/// assert_eq!(Score::new(1.5), Score::BEST);
/// assert_eq!(Score::new(f64::NAN), Score::WORST);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Score(f64);

impl Score {
    /// Score of the most stale value.
    pub const WORST: Self = Self(0.0);
    /// Score of the healthiest value.
    pub const BEST: Self = Self(1.0);

    /// Clamp and validate a raw score.
    ///
    /// Returns [`Score::WORST`] for non-finite values and clamps to
    /// `0.0..=1.0`.
    #[must_use]
    pub fn new(raw: f64) -> Self {
        if !raw.is_finite() {
            return Self::WORST;
        }
        Self(raw.clamp(0.0, 1.0))
    }

    /// Return the underlying value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Total ordering used when sorting cluster members.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    #[case(f64::NEG_INFINITY, 0.0)]
    #[case(-0.1, 0.0)]
    #[case(1.2, 1.0)]
    #[case(0.4, 0.4)]
    fn new_clamps_and_filters(#[case] raw: f64, #[case] expected: f64) {
        let score = Score::new(raw);
        assert!(score.get().is_finite(), "score must be finite");
        assert!((0.0..=1.0).contains(&score.get()));
        assert!((score.get() - expected).abs() <= f64::EPSILON);
    }
}

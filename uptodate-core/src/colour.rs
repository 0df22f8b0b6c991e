//! Viridis colour ramp used to render scores.
//!
//! The ramp is a piecewise-linear interpolation over eleven evenly spaced
//! viridis stops, so it is continuous and never moves backwards along the
//! scale. Endpoints match the usual web rendering of viridis: `#440154` for
//! the worst score and `#fde725` for the best.

use crate::Score;

/// An sRGB display colour, rendered as `#rrggbb`.
///
/// # Examples
/// ```
/// use uptodate_core::Colour;
///
/// assert_eq!(Colour::new(68, 1, 84).to_string(), "#440154");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Colour {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Colour {
    /// Construct a colour from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Colour {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

const VIRIDIS_START: Colour = Colour::new(68, 1, 84);
const VIRIDIS_END: Colour = Colour::new(253, 231, 37);

const VIRIDIS: [Colour; 11] = [
    VIRIDIS_START,
    Colour::new(72, 36, 117),
    Colour::new(65, 68, 135),
    Colour::new(53, 95, 141),
    Colour::new(42, 120, 142),
    Colour::new(33, 145, 140),
    Colour::new(34, 168, 132),
    Colour::new(68, 191, 112),
    Colour::new(122, 209, 81),
    Colour::new(189, 223, 38),
    VIRIDIS_END,
];

const SEGMENTS: f64 = 10.0;

/// Map a score onto the viridis ramp.
///
/// # Examples
/// ```
/// use uptodate_core::{Score, colour_for};
///
/// assert_eq!(colour_for(Score::WORST).to_string(), "#440154");
/// assert_eq!(colour_for(Score::BEST).to_string(), "#fde725");
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the ramp position is a non-negative float bounded by SEGMENTS"
)]
pub fn colour_for(score: Score) -> Colour {
    let position = score.get() * SEGMENTS;
    let lower = position.floor();
    let fraction = position - lower;
    let index = lower as usize;
    let (Some(start), Some(end)) = (VIRIDIS.get(index), VIRIDIS.get(index + 1)) else {
        return VIRIDIS_END;
    };
    Colour::new(
        mix(start.r, end.r, fraction),
        mix(start.g, end.g, fraction),
        mix(start.b, end.b, fraction),
    )
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "interpolating between two u8 channels stays within u8"
)]
fn mix(from: u8, to: u8, fraction: f64) -> u8 {
    let start = f64::from(from);
    let end = f64::from(to);
    (start + fraction * (end - start)).round().clamp(0.0, 255.0) as u8
}

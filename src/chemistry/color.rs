//! RGB display colors and linear interpolation between them

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// 24-bit RGB color, serialized as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Pure red, the strong-acid end of the indicator scale
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Pure green, neutral on the indicator scale
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Pure blue, the strong-base end of the indicator scale
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// White
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as a lowercase `#rrggbb` string.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::InvalidConfig(format!("Malformed hex color: {s:?}")));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| Error::InvalidConfig(format!("Malformed hex color {s:?}: {e}")))
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Linearly interpolate each RGB channel from `from` to `to`.
///
/// `factor` is clamped to `[0, 1]`; `NaN` is treated as `0`.
#[must_use]
pub fn lerp_color(from: Color, to: Color, factor: f64) -> Color {
    let t = if factor.is_nan() {
        0.0
    } else {
        factor.clamp(0.0, 1.0)
    };

    let channel = |a: u8, b: u8| -> u8 {
        let a = f64::from(a);
        let b = f64::from(b);
        // Result stays within [0, 255] because t is clamped.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = (a + (b - a) * t).round() as u8;
        value
    };

    Color::rgb(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
    )
}

//! pH lookups: indicator color, classification and sample generation

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::color::{lerp_color, Color};

/// Lowest pH on the scale
pub const PH_MIN: f64 = 0.0;
/// Neutral pH
pub const PH_NEUTRAL: f64 = 7.0;
/// Highest pH on the scale
pub const PH_MAX: f64 = 14.0;

/// Sub-ranges `random_ph` draws from, one picked uniformly per sample.
pub const SAMPLE_RANGES: [(f64, f64); 5] = [
    // strong acids
    (0.0, 3.0),
    // weak acids
    (3.0, 6.0),
    // near neutral
    (6.5, 7.5),
    // weak bases
    (8.0, 11.0),
    // strong bases
    (11.0, 14.0),
];

/// Coarse acid/base classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhClass {
    /// pH below 7
    Acidic,
    /// pH exactly 7
    Neutral,
    /// pH above 7
    Basic,
}

impl fmt::Display for PhClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Acidic => "Acidic",
            Self::Neutral => "Neutral",
            Self::Basic => "Basic",
        })
    }
}

/// Seven-bucket description of a pH value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhDescription {
    /// pH < 3
    StrongAcid,
    /// 3 <= pH < 6
    WeakAcid,
    /// 6 <= pH < 7
    VeryWeakAcid,
    /// pH == 7
    Neutral,
    /// 7 < pH <= 8
    VeryWeakBase,
    /// 8 < pH <= 11
    WeakBase,
    /// pH > 11
    StrongBase,
}

impl fmt::Display for PhDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StrongAcid => "Strong acid",
            Self::WeakAcid => "Weak acid",
            Self::VeryWeakAcid => "Very weak acid",
            Self::Neutral => "Neutral",
            Self::VeryWeakBase => "Very weak base",
            Self::WeakBase => "Weak base",
            Self::StrongBase => "Strong base",
        })
    }
}

/// Clamp to `[0, 14]`, mapping `NaN` to neutral.
fn clamp_ph(ph: f64) -> f64 {
    if ph.is_nan() {
        PH_NEUTRAL
    } else {
        ph.clamp(PH_MIN, PH_MAX)
    }
}

/// Universal-indicator color for a pH value.
///
/// Red at 0 blending to green at 7, then green blending to blue at 14.
/// Inputs outside `[0, 14]` behave as the nearest boundary.
///
/// ```rust
/// use chemlab::chemistry::{ph_to_color, Color};
///
/// assert_eq!(ph_to_color(7.0), Color::GREEN);
/// assert_eq!(ph_to_color(-5.0), ph_to_color(0.0));
/// ```
#[must_use]
pub fn ph_to_color(ph: f64) -> Color {
    let ph = clamp_ph(ph);
    if ph < PH_NEUTRAL {
        lerp_color(Color::RED, Color::GREEN, ph / PH_NEUTRAL)
    } else if ph > PH_NEUTRAL {
        lerp_color(Color::GREEN, Color::BLUE, (ph - PH_NEUTRAL) / (PH_MAX - PH_NEUTRAL))
    } else {
        Color::GREEN
    }
}

/// Classify a pH value as acidic, neutral or basic.
#[must_use]
pub fn ph_to_classification(ph: f64) -> PhClass {
    if ph < PH_NEUTRAL {
        PhClass::Acidic
    } else if ph > PH_NEUTRAL {
        PhClass::Basic
    } else {
        PhClass::Neutral
    }
}

/// Finer-grained description of a pH value.
#[must_use]
pub fn ph_to_description(ph: f64) -> PhDescription {
    if ph < 3.0 {
        PhDescription::StrongAcid
    } else if ph < 6.0 {
        PhDescription::WeakAcid
    } else if ph < PH_NEUTRAL {
        PhDescription::VeryWeakAcid
    } else if ph > 11.0 {
        PhDescription::StrongBase
    } else if ph > 8.0 {
        PhDescription::WeakBase
    } else if ph > PH_NEUTRAL {
        PhDescription::VeryWeakBase
    } else {
        PhDescription::Neutral
    }
}

/// Draw a pH sample: pick one of [`SAMPLE_RANGES`] uniformly, then a value
/// uniformly inside it, rounded to one decimal place.
pub fn random_ph<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let (low, high) = SAMPLE_RANGES[rng.gen_range(0..SAMPLE_RANGES.len())];
    let value = rng.gen_range(low..high);
    ((value * 10.0).round() / 10.0).clamp(PH_MIN, PH_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_color_anchor_points() {
        assert_eq!(ph_to_color(0.0), Color::RED);
        assert_eq!(ph_to_color(7.0), Color::GREEN);
        assert_eq!(ph_to_color(14.0), Color::BLUE);
    }

    #[test]
    fn test_color_blends_toward_green() {
        let acid = ph_to_color(3.5);
        assert_eq!(acid, Color::rgb(128, 128, 0));
        let base = ph_to_color(10.5);
        assert_eq!(base, Color::rgb(0, 128, 128));
    }

    #[test]
    fn test_color_clamps_out_of_range() {
        assert_eq!(ph_to_color(-5.0), ph_to_color(0.0));
        assert_eq!(ph_to_color(99.0), ph_to_color(14.0));
        assert_eq!(ph_to_color(f64::NAN), Color::GREEN);
    }

    #[test]
    fn test_classification_thresholds() {
        assert_eq!(ph_to_classification(6.99), PhClass::Acidic);
        assert_eq!(ph_to_classification(7.0), PhClass::Neutral);
        assert_eq!(ph_to_classification(7.01), PhClass::Basic);
    }

    #[test]
    fn test_description_buckets() {
        assert_eq!(ph_to_description(1.0), PhDescription::StrongAcid);
        assert_eq!(ph_to_description(3.0), PhDescription::WeakAcid);
        assert_eq!(ph_to_description(6.5), PhDescription::VeryWeakAcid);
        assert_eq!(ph_to_description(7.0), PhDescription::Neutral);
        assert_eq!(ph_to_description(8.0), PhDescription::VeryWeakBase);
        assert_eq!(ph_to_description(11.0), PhDescription::WeakBase);
        assert_eq!(ph_to_description(13.0), PhDescription::StrongBase);
    }

    #[test]
    fn test_random_ph_stays_in_sample_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let ph = random_ph(&mut rng);
            assert!((PH_MIN..=PH_MAX).contains(&ph));
            assert!(
                SAMPLE_RANGES
                    .iter()
                    .any(|&(low, high)| ph >= low - 0.05 && ph <= high + 0.05),
                "{ph} outside every sample range"
            );
        }
    }
}

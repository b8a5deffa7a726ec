//! Tests for the chemistry lookups

use chemlab::chemistry::{
    lerp_color, ph_to_classification, ph_to_color, ph_to_description, random_ph, Color, PhClass,
    PhDescription, SAMPLE_RANGES,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_indicator_scale_endpoints() {
    assert_eq!(ph_to_color(0.0), Color::RED);
    assert_eq!(ph_to_color(7.0), Color::GREEN);
    assert_eq!(ph_to_color(14.0), Color::BLUE);
}

#[test]
fn test_indicator_scale_midpoints() {
    assert_eq!(ph_to_color(3.5), Color::rgb(128, 128, 0));
    assert_eq!(ph_to_color(10.5), Color::rgb(0, 128, 128));
}

#[test]
fn test_out_of_range_ph_clamps() {
    assert_eq!(ph_to_color(-5.0), ph_to_color(0.0));
    assert_eq!(ph_to_color(99.0), ph_to_color(14.0));
    assert_eq!(ph_to_color(f64::NAN), Color::GREEN);
}

#[test]
fn test_classification_boundaries() {
    assert_eq!(ph_to_classification(6.999), PhClass::Acidic);
    assert_eq!(ph_to_classification(7.0), PhClass::Neutral);
    assert_eq!(ph_to_classification(7.001), PhClass::Basic);
}

#[test]
fn test_description_buckets() {
    let cases = [
        (1.0, PhDescription::StrongAcid),
        (3.0, PhDescription::WeakAcid),
        (6.0, PhDescription::VeryWeakAcid),
        (7.0, PhDescription::Neutral),
        (8.0, PhDescription::VeryWeakBase),
        (11.0, PhDescription::WeakBase),
        (11.5, PhDescription::StrongBase),
    ];
    for (ph, expected) in cases {
        assert_eq!(ph_to_description(ph), expected, "pH {ph}");
    }
    assert_eq!(PhDescription::VeryWeakBase.to_string(), "Very weak base");
}

#[test]
fn test_random_ph_is_reproducible_with_seed() {
    let a: Vec<f64> = {
        let mut rng = StdRng::seed_from_u64(7);
        (0..20).map(|_| random_ph(&mut rng)).collect()
    };
    let b: Vec<f64> = {
        let mut rng = StdRng::seed_from_u64(7);
        (0..20).map(|_| random_ph(&mut rng)).collect()
    };
    assert_eq!(a, b);
}

#[test]
fn test_random_ph_stays_in_sample_ranges() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let ph = random_ph(&mut rng);
        assert!(
            SAMPLE_RANGES
                .iter()
                .any(|&(lo, hi)| ph >= lo - 0.05 && ph <= hi + 0.05),
            "pH {ph} outside every sample range"
        );
        // One decimal place
        assert!(((ph * 10.0).round() - ph * 10.0).abs() < 1e-9);
    }
}

#[test]
fn test_lerp_color_clamps_factor() {
    let from = Color::rgb(10, 20, 30);
    let to = Color::rgb(110, 220, 30);
    assert_eq!(lerp_color(from, to, -1.0), from);
    assert_eq!(lerp_color(from, to, 2.0), to);
    assert_eq!(lerp_color(from, to, 0.5), Color::rgb(60, 120, 30));
}

//! Equipment catalogs seeded at initialization

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::equipment::{Beaker, GasTest, MetalSalt, TestStrip, TestTool};
use crate::chemistry::{Color, PH_MAX, PH_MIN};
use crate::{Error, Result};

const BENCH_HEIGHT: f32 = 0.95;

/// Static equipment catalogs for one lab.
///
/// The built-in set is returned by [`Fixtures::default`]; alternative sets
/// can be loaded from JSON with the same shape as the serialized form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    /// Beakers of solution
    pub beakers: Vec<Beaker>,
    /// Universal-indicator strips
    pub test_strips: Vec<TestStrip>,
    /// Flame-test salts
    pub metal_salts: Vec<MetalSalt>,
    /// Gas samples
    pub gas_tests: Vec<GasTest>,
}

impl Default for Fixtures {
    fn default() -> Self {
        let solutions = [
            ("Hydrochloric Acid", 1.0),
            ("Distilled Water", 7.0),
            ("Sodium Hydroxide", 13.0),
            ("Lemon Juice", 2.5),
            ("Baking Soda Solution", 8.5),
        ];

        let beakers = solutions
            .iter()
            .zip(0_u8..)
            .map(|(&(name, ph), i)| {
                Beaker::new(format!("beaker-{}", i + 1), name, ph).with_position([
                    -1.2 + 0.6 * f32::from(i),
                    BENCH_HEIGHT,
                    -0.5,
                ])
            })
            .collect();

        let test_strips = (0_u8..5)
            .map(|i| {
                TestStrip::new(format!("strip-{}", i + 1)).with_position([
                    -1.2 + 0.15 * f32::from(i),
                    BENCH_HEIGHT,
                    0.2,
                ])
            })
            .collect();

        let metal_salts = vec![
            MetalSalt::new(
                "salt-1",
                "Lithium Chloride",
                "LiCl",
                "Li+",
                Color::rgb(0xdc, 0x14, 0x3c),
                "crimson red",
            ),
            MetalSalt::new(
                "salt-2",
                "Sodium Chloride",
                "NaCl",
                "Na+",
                Color::rgb(0xff, 0xb0, 0x00),
                "yellow-orange",
            ),
            MetalSalt::new(
                "salt-3",
                "Potassium Chloride",
                "KCl",
                "K+",
                Color::rgb(0xc8, 0xa2, 0xc8),
                "lilac",
            ),
            MetalSalt::new(
                "salt-4",
                "Calcium Chloride",
                "CaCl2",
                "Ca2+",
                Color::rgb(0xff, 0x45, 0x00),
                "orange-red",
            ),
            MetalSalt::new(
                "salt-5",
                "Copper(II) Chloride",
                "CuCl2",
                "Cu2+",
                Color::rgb(0x00, 0xc8, 0x96),
                "blue-green",
            ),
        ];

        let gas_tests = vec![
            GasTest::new("gas-1", "Hydrogen", "H2", TestTool::LitSplint, "Squeaky pop"),
            GasTest::new(
                "gas-2",
                "Oxygen",
                "O2",
                TestTool::GlowingSplint,
                "Glowing splint relights",
            ),
            GasTest::new(
                "gas-3",
                "Carbon Dioxide",
                "CO2",
                TestTool::Limewater,
                "Limewater turns milky",
            ),
            GasTest::new(
                "gas-4",
                "Chlorine",
                "Cl2",
                TestTool::DampLitmus,
                "Damp litmus paper is bleached",
            ),
        ];

        Self {
            beakers,
            test_strips,
            metal_salts,
            gas_tests,
        }
    }
}

impl Fixtures {
    /// Parse and validate fixtures from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or the catalog fails
    /// [`Fixtures::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let fixtures: Self = serde_json::from_str(json)?;
        fixtures.validate()?;
        Ok(fixtures)
    }

    /// Load and validate fixtures from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or its contents are invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let fixtures = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            beakers = fixtures.beakers.len(),
            salts = fixtures.metal_salts.len(),
            gases = fixtures.gas_tests.len(),
            "Loaded lab fixtures"
        );
        Ok(fixtures)
    }

    /// Check that ids are unique within each catalog and every beaker pH
    /// lies on the 0-14 scale.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming the first violation.
    pub fn validate(&self) -> Result<()> {
        ensure_unique("beaker", self.beakers.iter().map(Beaker::id))?;
        ensure_unique("test strip", self.test_strips.iter().map(TestStrip::id))?;
        ensure_unique("metal salt", self.metal_salts.iter().map(MetalSalt::id))?;
        ensure_unique("gas test", self.gas_tests.iter().map(GasTest::id))?;

        if let Some(beaker) = self
            .beakers
            .iter()
            .find(|b| !(PH_MIN..=PH_MAX).contains(&b.ph_value()))
        {
            return Err(Error::InvalidConfig(format!(
                "Beaker {} has pH {} outside 0-14",
                beaker.id(),
                beaker.ph_value()
            )));
        }

        Ok(())
    }
}

fn ensure_unique<'a>(catalog: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(Error::InvalidConfig(format!(
                "Duplicate {catalog} id: {id}"
            )));
        }
    }
    Ok(())
}

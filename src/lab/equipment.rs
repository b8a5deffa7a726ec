//! Equipment catalog entities: beakers, test strips, metal salts, gas samples

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chemistry::{ph_to_color, Color};
use crate::Error;

/// Scene position, opaque to lab logic.
pub type Position = [f32; 3];

/// A beaker of solution with a fixed pH.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Beaker {
    id: String,
    solution_name: String,
    ph_value: f64,
    color: Color,
    #[serde(default)]
    position: Position,
}

impl Beaker {
    /// Create a beaker whose display color is the indicator color of its pH.
    #[must_use]
    pub fn new(id: impl Into<String>, solution_name: impl Into<String>, ph_value: f64) -> Self {
        Self {
            id: id.into(),
            solution_name: solution_name.into(),
            ph_value,
            color: ph_to_color(ph_value),
            position: [0.0; 3],
        }
    }

    /// Override the display color.
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the scene position.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Get the beaker ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the solution name.
    #[must_use]
    pub fn solution_name(&self) -> &str {
        &self.solution_name
    }

    /// Get the solution pH.
    #[must_use]
    pub const fn ph_value(&self) -> f64 {
        self.ph_value
    }

    /// Get the display color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Get the scene position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// A universal-indicator test strip.
///
/// The reading is `None` until the strip has been dipped; dipping again
/// overwrites it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestStrip {
    id: String,
    #[serde(default)]
    ph_value: Option<f64>,
    #[serde(default)]
    position: Position,
    #[serde(default)]
    rotation: Position,
}

impl TestStrip {
    /// Create an unused test strip.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ph_value: None,
            position: [0.0; 3],
            rotation: [0.0; 3],
        }
    }

    /// Set the scene position.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Get the strip ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the pH reading, if the strip has been used.
    #[must_use]
    pub const fn ph_value(&self) -> Option<f64> {
        self.ph_value
    }

    /// Whether the strip has not been dipped yet.
    #[must_use]
    pub const fn is_unused(&self) -> bool {
        self.ph_value.is_none()
    }

    /// Get the scene position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Get the scene rotation.
    #[must_use]
    pub const fn rotation(&self) -> Position {
        self.rotation
    }

    pub(crate) fn record_reading(&mut self, ph_value: f64) {
        self.ph_value = Some(ph_value);
    }
}

/// A metal salt used in flame tests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetalSalt {
    id: String,
    name: String,
    formula: String,
    ion: String,
    flame_color: Color,
    flame_color_name: String,
}

impl MetalSalt {
    /// Create a metal salt.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        formula: impl Into<String>,
        ion: impl Into<String>,
        flame_color: Color,
        flame_color_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            formula: formula.into(),
            ion: ion.into(),
            flame_color,
            flame_color_name: flame_color_name.into(),
        }
    }

    /// Get the salt ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the salt name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the chemical formula.
    #[must_use]
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Get the metal ion responsible for the flame color.
    #[must_use]
    pub fn ion(&self) -> &str {
        &self.ion
    }

    /// Get the flame color.
    #[must_use]
    pub const fn flame_color(&self) -> Color {
        self.flame_color
    }

    /// Get the human-readable flame color.
    #[must_use]
    pub fn flame_color_name(&self) -> &str {
        &self.flame_color_name
    }
}

/// Tools available for identifying a gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestTool {
    /// Burning splint held at the mouth of the tube
    LitSplint,
    /// Glowing (just extinguished) splint
    GlowingSplint,
    /// Gas bubbled through limewater
    Limewater,
    /// Damp litmus paper
    DampLitmus,
}

impl TestTool {
    /// Every tool, in display order.
    pub const ALL: [Self; 4] = [
        Self::LitSplint,
        Self::GlowingSplint,
        Self::Limewater,
        Self::DampLitmus,
    ];

    /// Stable identifier, e.g. `"lit-splint"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LitSplint => "lit-splint",
            Self::GlowingSplint => "glowing-splint",
            Self::Limewater => "limewater",
            Self::DampLitmus => "damp-litmus",
        }
    }

    /// Human-readable label, e.g. `"Lit splint"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LitSplint => "Lit splint",
            Self::GlowingSplint => "Glowing splint",
            Self::Limewater => "Limewater",
            Self::DampLitmus => "Damp litmus paper",
        }
    }
}

impl fmt::Display for TestTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestTool {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| Error::UnknownTestTool(s.to_string()))
    }
}

/// A gas sample with exactly one correct identification test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GasTest {
    id: String,
    name: String,
    formula: String,
    test_method: TestTool,
    expected_result: String,
}

impl GasTest {
    /// Create a gas sample.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        formula: impl Into<String>,
        test_method: TestTool,
        expected_result: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            formula: formula.into(),
            test_method,
            expected_result: expected_result.into(),
        }
    }

    /// Get the gas ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the gas name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the chemical formula.
    #[must_use]
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Get the single correct test tool.
    #[must_use]
    pub const fn test_method(&self) -> TestTool {
        self.test_method
    }

    /// Get the observation the correct test produces.
    #[must_use]
    pub fn expected_result(&self) -> &str {
        &self.expected_result
    }
}

//! Result records for the three shared-progress tests
//!
//! The store keeps only the most recent record of each kind; a new test
//! overwrites it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::equipment::{Beaker, GasTest, MetalSalt, TestTool};
use crate::chemistry::{ph_to_classification, ph_to_color, Color, PhClass};

/// Observation shown when the wrong tool is used on a gas.
pub const NO_REACTION: &str = "No reaction";

/// Outcome of dipping a test strip into a beaker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    strip_id: String,
    beaker_id: String,
    ph_value: f64,
    color: Color,
    classification: PhClass,
    solution_name: String,
    timestamp: DateTime<Utc>,
}

impl TestResult {
    /// Record a strip reading taken from `beaker`.
    #[must_use]
    pub fn new(strip_id: impl Into<String>, beaker: &Beaker, timestamp: DateTime<Utc>) -> Self {
        let ph_value = beaker.ph_value();
        Self {
            strip_id: strip_id.into(),
            beaker_id: beaker.id().to_string(),
            ph_value,
            color: ph_to_color(ph_value),
            classification: ph_to_classification(ph_value),
            solution_name: beaker.solution_name().to_string(),
            timestamp,
        }
    }

    /// Get the strip ID.
    #[must_use]
    pub fn strip_id(&self) -> &str {
        &self.strip_id
    }

    /// Get the beaker ID.
    #[must_use]
    pub fn beaker_id(&self) -> &str {
        &self.beaker_id
    }

    /// Get the measured pH.
    #[must_use]
    pub const fn ph_value(&self) -> f64 {
        self.ph_value
    }

    /// Get the indicator color the strip turned.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Get the acid/base classification.
    #[must_use]
    pub const fn classification(&self) -> PhClass {
        self.classification
    }

    /// Get the tested solution's name.
    #[must_use]
    pub fn solution_name(&self) -> &str {
        &self.solution_name
    }

    /// Get the time of the test.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Outcome of holding a metal salt in the flame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlameTestResult {
    salt_id: String,
    salt_name: String,
    ion: String,
    flame_color: Color,
    flame_color_name: String,
    timestamp: DateTime<Utc>,
}

impl FlameTestResult {
    /// Record a flame test of `salt`.
    #[must_use]
    pub fn new(salt: &MetalSalt, timestamp: DateTime<Utc>) -> Self {
        Self {
            salt_id: salt.id().to_string(),
            salt_name: salt.name().to_string(),
            ion: salt.ion().to_string(),
            flame_color: salt.flame_color(),
            flame_color_name: salt.flame_color_name().to_string(),
            timestamp,
        }
    }

    /// Get the salt ID.
    #[must_use]
    pub fn salt_id(&self) -> &str {
        &self.salt_id
    }

    /// Get the salt name.
    #[must_use]
    pub fn salt_name(&self) -> &str {
        &self.salt_name
    }

    /// Get the identified ion.
    #[must_use]
    pub fn ion(&self) -> &str {
        &self.ion
    }

    /// Get the observed flame color.
    #[must_use]
    pub const fn flame_color(&self) -> Color {
        self.flame_color
    }

    /// Get the human-readable flame color.
    #[must_use]
    pub fn flame_color_name(&self) -> &str {
        &self.flame_color_name
    }

    /// Get the time of the test.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Outcome of applying a tool to a gas sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GasTestResult {
    gas_id: String,
    gas_name: String,
    tool: TestTool,
    correct: bool,
    result: String,
    timestamp: DateTime<Utc>,
}

impl GasTestResult {
    /// Record `tool` applied to `gas`; only the gas's own test method is correct.
    #[must_use]
    pub fn new(gas: &GasTest, tool: TestTool, timestamp: DateTime<Utc>) -> Self {
        let correct = tool == gas.test_method();
        let result = if correct {
            gas.expected_result().to_string()
        } else {
            NO_REACTION.to_string()
        };
        Self {
            gas_id: gas.id().to_string(),
            gas_name: gas.name().to_string(),
            tool,
            correct,
            result,
            timestamp,
        }
    }

    /// Get the gas ID.
    #[must_use]
    pub fn gas_id(&self) -> &str {
        &self.gas_id
    }

    /// Get the gas name.
    #[must_use]
    pub fn gas_name(&self) -> &str {
        &self.gas_name
    }

    /// Get the tool that was used.
    #[must_use]
    pub const fn tool(&self) -> TestTool {
        self.tool
    }

    /// Whether the tool was the gas's correct test.
    #[must_use]
    pub const fn correct(&self) -> bool {
        self.correct
    }

    /// Get the observation.
    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Get the time of the test.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_result_correctness() {
        let hydrogen = GasTest::new("gas-1", "Hydrogen", "H2", TestTool::LitSplint, "Squeaky pop");
        let now = Utc::now();

        let right = GasTestResult::new(&hydrogen, TestTool::LitSplint, now);
        assert!(right.correct());
        assert_eq!(right.result(), "Squeaky pop");

        let wrong = GasTestResult::new(&hydrogen, TestTool::Limewater, now);
        assert!(!wrong.correct());
        assert_eq!(wrong.result(), NO_REACTION);
    }

    #[test]
    fn test_strip_result_derives_color_and_class() {
        let beaker = Beaker::new("beaker-9", "Bleach", 12.5);
        let result = TestResult::new("strip-1", &beaker, Utc::now());
        assert_eq!(result.classification(), PhClass::Basic);
        assert_eq!(result.color(), ph_to_color(12.5));
        assert_eq!(result.solution_name(), "Bleach");
    }
}

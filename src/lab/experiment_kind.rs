//! The closed set of lab experiments

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Experiment currently selected in the lab.
///
/// Serialized by display name, e.g. `"Flame Tests"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExperimentKind {
    /// Universal-indicator strips dipped into beakers
    #[default]
    PhTesting,
    /// Metal salts held in a Bunsen flame
    FlameTests,
    /// Identifying gases with splints, limewater and litmus
    GasTests,
    /// Metals placed in copper(II) sulfate
    Displacement,
    /// Ink separated on paper by a solvent
    Chromatography,
    /// Sand removed from salt water through filter paper
    Filtration,
    /// Salt crystals recovered by heating a solution
    Evaporation,
    /// Clear liquid poured off settled sediment
    Decanting,
}

impl ExperimentKind {
    /// Every experiment, in menu order.
    pub const ALL: [Self; 8] = [
        Self::PhTesting,
        Self::FlameTests,
        Self::GasTests,
        Self::Displacement,
        Self::Chromatography,
        Self::Filtration,
        Self::Evaporation,
        Self::Decanting,
    ];

    /// Display name shown in the experiment menu.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PhTesting => "pH Testing",
            Self::FlameTests => "Flame Tests",
            Self::GasTests => "Gas Tests",
            Self::Displacement => "Displacement Reactions",
            Self::Chromatography => "Paper Chromatography",
            Self::Filtration => "Filtration",
            Self::Evaporation => "Evaporation",
            Self::Decanting => "Decanting",
        }
    }

    /// Whether runs of this experiment count toward the shared progress bar.
    #[must_use]
    pub const fn counts_toward_progress(self) -> bool {
        matches!(self, Self::PhTesting | Self::FlameTests | Self::GasTests)
    }
}

impl fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExperimentKind {
    type Err = Error;

    /// Parse a display name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownExperiment(s.to_string()))
    }
}

impl TryFrom<String> for ExperimentKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ExperimentKind> for String {
    fn from(kind: ExperimentKind) -> Self {
        kind.name().to_string()
    }
}

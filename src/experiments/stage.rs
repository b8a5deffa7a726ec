//! Stages shared by every experiment machine

use serde::{Deserialize, Serialize};

/// What a timed phase represents; drives the renderer's choice of animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProcessKind {
    /// Indicator or chemical reaction developing
    Reacting,
    /// Sample held in the flame
    Heating,
    /// Solvent carrying pigments up the paper
    Separating,
    /// Mixture draining through filter paper
    Filtering,
    /// Water boiling off the basin
    Evaporating,
    /// Solids sinking to the bottom
    Settling,
    /// Liquid being poured off
    Pouring,
}

/// Discrete phase of an experiment run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Stage {
    /// Nothing chosen yet
    #[default]
    Setup,
    /// Reagent or tool chosen, waiting for the action click
    Applying,
    /// Timer-driven phase; `elapsed_ticks` never exceeds `total_ticks`
    Processing {
        /// Animation kind
        kind: ProcessKind,
        /// Ticks completed so far
        elapsed_ticks: u32,
        /// Ticks until the phase ends (at least 1)
        total_ticks: u32,
    },
    /// Run finished
    Complete {
        /// Human-readable outcome
        result_text: String,
    },
}

impl Stage {
    /// A fresh timed phase. `total_ticks` is raised to 1 if zero.
    #[must_use]
    pub fn processing(kind: ProcessKind, total_ticks: u32) -> Self {
        Self::Processing {
            kind,
            elapsed_ticks: 0,
            total_ticks: total_ticks.max(1),
        }
    }

    /// A finished run with the given outcome text.
    #[must_use]
    pub fn complete(result_text: impl Into<String>) -> Self {
        Self::Complete {
            result_text: result_text.into(),
        }
    }

    /// Progress fraction in `[0, 1]`: 0 before processing, 1 once complete.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        match self {
            Self::Setup | Self::Applying => 0.0,
            Self::Processing {
                elapsed_ticks,
                total_ticks,
                ..
            } => f64::from(*elapsed_ticks) / f64::from(*total_ticks),
            Self::Complete { .. } => 1.0,
        }
    }

    /// The running process, if in a timed phase.
    #[must_use]
    pub const fn process_kind(&self) -> Option<ProcessKind> {
        match self {
            Self::Processing { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether a timed phase is running.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        matches!(self, Self::Processing { .. })
    }

    /// Whether the run has finished.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// Outcome text once complete.
    #[must_use]
    pub fn result_text(&self) -> Option<&str> {
        match self {
            Self::Complete { result_text } => Some(result_text),
            _ => None,
        }
    }
}

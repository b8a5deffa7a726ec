//! Decanting: let a muddy mixture settle, then pour off the clear liquid
//!
//! The only experiment with two timed phases. Settling hands back to
//! `Applying` so the pour needs its own click.

use serde::Serialize;

use super::machine::Protocol;
use super::stage::{ProcessKind, Stage};
use crate::lab::{ExperimentKind, LabStore, Rejection};

/// Sediment height once fully settled.
pub const SEDIMENT_MAX: f64 = 0.25;
/// Liquid left in the source beaker after pouring (the sediment layer).
pub const SOURCE_REMAINDER: f64 = 0.25;

const SETTLING_TICKS: u32 = 10;
const POURING_TICKS: u32 = 8;

/// Clickable objects in the decanting scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecantingTarget {
    /// The stirred mixture, set down to settle
    Mixture,
    /// Tilt the beaker into the receiving beaker
    Pour,
}

/// Decanting protocol state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decanting {
    settled: bool,
    sediment_level: f64,
    cloudiness: f64,
    source_level: f64,
    receiving_level: f64,
}

impl Default for Decanting {
    fn default() -> Self {
        Self {
            settled: false,
            sediment_level: 0.0,
            cloudiness: 1.0,
            source_level: 1.0,
            receiving_level: 0.0,
        }
    }
}

impl Decanting {
    /// Whether settling has finished.
    #[must_use]
    pub const fn settled(&self) -> bool {
        self.settled
    }

    /// Height of the sediment layer.
    #[must_use]
    pub const fn sediment_level(&self) -> f64 {
        self.sediment_level
    }

    /// Suspended solids, 1 when freshly stirred.
    #[must_use]
    pub const fn cloudiness(&self) -> f64 {
        self.cloudiness
    }

    /// Liquid in the source beaker.
    #[must_use]
    pub const fn source_level(&self) -> f64 {
        self.source_level
    }

    /// Liquid in the receiving beaker.
    #[must_use]
    pub const fn receiving_level(&self) -> f64 {
        self.receiving_level
    }
}

impl Protocol for Decanting {
    type Target = DecantingTarget;
    const KIND: ExperimentKind = ExperimentKind::Decanting;

    fn click(
        &mut self,
        stage: &Stage,
        target: DecantingTarget,
        _lab: &mut LabStore,
    ) -> Result<Stage, Rejection> {
        match (stage, target) {
            (Stage::Setup, DecantingTarget::Mixture) => {
                Ok(Stage::processing(ProcessKind::Settling, SETTLING_TICKS))
            }
            (Stage::Applying, DecantingTarget::Pour) if self.settled => {
                Ok(Stage::processing(ProcessKind::Pouring, POURING_TICKS))
            }
            (_, DecantingTarget::Pour) => {
                Err(Rejection::precondition("let the mixture settle first"))
            }
            (_, DecantingTarget::Mixture) => {
                Err(Rejection::precondition("mixture is already settling"))
            }
        }
    }

    fn advance(&mut self, kind: ProcessKind, fraction: f64) {
        match kind {
            ProcessKind::Settling => {
                self.sediment_level = SEDIMENT_MAX * fraction;
                self.cloudiness = 1.0 - fraction;
            }
            ProcessKind::Pouring => {
                let poured = (1.0 - SOURCE_REMAINDER) * fraction;
                self.source_level = 1.0 - poured;
                self.receiving_level = poured;
            }
            _ => {}
        }
    }

    fn finish(&mut self, kind: ProcessKind, _lab: &mut LabStore) -> Stage {
        if kind == ProcessKind::Settling {
            self.settled = true;
            return Stage::Applying;
        }
        Stage::complete(
            "Decanting complete: the clear liquid was poured off, leaving the sediment behind",
        )
    }
}

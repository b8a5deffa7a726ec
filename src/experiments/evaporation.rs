//! Evaporation: pour salt water into a basin and heat it dry
//!
//! The heating phase counts down once per second, so its tick interval is
//! longer than the other experiments'.

use std::time::Duration;

use serde::Serialize;

use super::machine::{Protocol, DEFAULT_TICK_INTERVAL};
use super::stage::{ProcessKind, Stage};
use crate::lab::{ExperimentKind, LabStore, Rejection};

/// Seconds of heating needed to boil the basin dry.
pub const EVAPORATION_SECONDS: u32 = 8;

/// Clickable objects in the evaporation scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaporationTarget {
    /// Beaker of salt water, poured into the basin
    Pour,
    /// Burner under the basin
    Burner,
}

/// Evaporation protocol state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaporation {
    poured: bool,
    burner_on: bool,
    liquid_level: f64,
    countdown: u32,
    salt_crystals: bool,
}

impl Default for Evaporation {
    fn default() -> Self {
        Self {
            poured: false,
            burner_on: false,
            liquid_level: 0.0,
            countdown: EVAPORATION_SECONDS,
            salt_crystals: false,
        }
    }
}

impl Evaporation {
    /// Whether the basin holds salt water.
    #[must_use]
    pub const fn poured(&self) -> bool {
        self.poured
    }

    /// Whether the burner is lit.
    #[must_use]
    pub const fn burner_on(&self) -> bool {
        self.burner_on
    }

    /// Liquid left in the basin, 1 when full.
    #[must_use]
    pub const fn liquid_level(&self) -> f64 {
        self.liquid_level
    }

    /// Seconds of heating left.
    #[must_use]
    pub const fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Whether crystals have formed.
    #[must_use]
    pub const fn salt_crystals(&self) -> bool {
        self.salt_crystals
    }
}

impl Protocol for Evaporation {
    type Target = EvaporationTarget;
    const KIND: ExperimentKind = ExperimentKind::Evaporation;

    fn click(
        &mut self,
        stage: &Stage,
        target: EvaporationTarget,
        _lab: &mut LabStore,
    ) -> Result<Stage, Rejection> {
        match (stage, target) {
            (Stage::Setup, EvaporationTarget::Pour) => {
                self.poured = true;
                self.liquid_level = 1.0;
                Ok(Stage::Applying)
            }
            (Stage::Applying, EvaporationTarget::Burner) => {
                self.burner_on = true;
                Ok(Stage::processing(
                    ProcessKind::Evaporating,
                    EVAPORATION_SECONDS,
                ))
            }
            (_, EvaporationTarget::Burner) => {
                Err(Rejection::precondition("pour the salt water in first"))
            }
            (_, EvaporationTarget::Pour) => Err(Rejection::precondition("basin already filled")),
        }
    }

    fn advance(&mut self, _kind: ProcessKind, fraction: f64) {
        self.liquid_level = 1.0 - fraction;
        // Rounding keeps the countdown exact at the ends of the phase.
        let remaining = (f64::from(EVAPORATION_SECONDS) * (1.0 - fraction)).round();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let countdown = remaining.clamp(0.0, f64::from(EVAPORATION_SECONDS)) as u32;
        self.countdown = countdown;
    }

    fn finish(&mut self, _kind: ProcessKind, _lab: &mut LabStore) -> Stage {
        self.liquid_level = 0.0;
        self.countdown = 0;
        self.salt_crystals = true;
        self.burner_on = false;
        Stage::complete("Water evaporated completely, leaving salt crystals behind")
    }

    fn tick_interval(&self, kind: ProcessKind) -> Duration {
        match kind {
            ProcessKind::Evaporating => Duration::from_secs(1),
            _ => DEFAULT_TICK_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiments::ExperimentRun;

    #[test]
    fn test_countdown_runs_once_per_second() {
        let mut lab = LabStore::new();
        let mut run = ExperimentRun::<Evaporation>::new();
        let _ = run.click(&mut lab, EvaporationTarget::Pour);
        let _ = run.click(&mut lab, EvaporationTarget::Burner);
        assert_eq!(run.tick_interval(), Some(Duration::from_secs(1)));

        assert_eq!(run.advance_by(&mut lab, Duration::from_millis(2500)), 2);
        assert_eq!(run.protocol().countdown(), 6);
        assert!((run.protocol().liquid_level() - 0.75).abs() < 1e-9);

        assert_eq!(run.advance_by(&mut lab, Duration::from_secs(6)), 6);
        assert!(run.protocol().salt_crystals());
        assert_eq!(run.protocol().countdown(), 0);
        assert!(!run.protocol().burner_on());
    }

    #[test]
    fn test_burner_before_pour_ignored() {
        let mut lab = LabStore::new();
        let mut run = ExperimentRun::<Evaporation>::new();
        assert!(!run.click(&mut lab, EvaporationTarget::Burner).is_applied());
        assert!(!run.protocol().burner_on());
        assert!(!run.timer_armed());
    }
}

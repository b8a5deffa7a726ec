//! Filtration: fold a filter paper into the funnel and pour the mixture through

use serde::Serialize;

use super::machine::Protocol;
use super::stage::{ProcessKind, Stage};
use crate::lab::{ExperimentKind, LabStore, Rejection};

/// Filtrate level in the flask once everything has drained.
pub const FILTRATE_MAX: f64 = 0.8;
/// Residue height on the paper once everything has drained.
pub const RESIDUE_MAX: f64 = 0.3;

const FILTERING_TICKS: u32 = 10;

/// Clickable objects in the filtration scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiltrationTarget {
    /// Filter paper, placed into the funnel
    FilterPaper,
    /// Beaker of sandy water, poured into the funnel
    Pour,
}

/// Filtration protocol state. Levels are fractions of vessel height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filtration {
    paper_fitted: bool,
    mixture_level: f64,
    filtrate_level: f64,
    residue_level: f64,
}

impl Default for Filtration {
    fn default() -> Self {
        Self {
            paper_fitted: false,
            mixture_level: 1.0,
            filtrate_level: 0.0,
            residue_level: 0.0,
        }
    }
}

impl Filtration {
    /// Whether the funnel has a filter paper.
    #[must_use]
    pub const fn paper_fitted(&self) -> bool {
        self.paper_fitted
    }

    /// Mixture left in the source beaker.
    #[must_use]
    pub const fn mixture_level(&self) -> f64 {
        self.mixture_level
    }

    /// Clear liquid collected below the funnel.
    #[must_use]
    pub const fn filtrate_level(&self) -> f64 {
        self.filtrate_level
    }

    /// Solid trapped on the paper.
    #[must_use]
    pub const fn residue_level(&self) -> f64 {
        self.residue_level
    }
}

impl Protocol for Filtration {
    type Target = FiltrationTarget;
    const KIND: ExperimentKind = ExperimentKind::Filtration;

    fn click(
        &mut self,
        stage: &Stage,
        target: FiltrationTarget,
        _lab: &mut LabStore,
    ) -> Result<Stage, Rejection> {
        match (stage, target) {
            (Stage::Setup, FiltrationTarget::FilterPaper) => {
                self.paper_fitted = true;
                Ok(Stage::Applying)
            }
            (Stage::Applying, FiltrationTarget::Pour) => {
                Ok(Stage::processing(ProcessKind::Filtering, FILTERING_TICKS))
            }
            (_, FiltrationTarget::Pour) => {
                Err(Rejection::precondition("fit the filter paper first"))
            }
            (_, FiltrationTarget::FilterPaper) => {
                Err(Rejection::precondition("filter paper already fitted"))
            }
        }
    }

    fn advance(&mut self, _kind: ProcessKind, fraction: f64) {
        self.mixture_level = 1.0 - fraction;
        self.filtrate_level = FILTRATE_MAX * fraction;
        self.residue_level = RESIDUE_MAX * fraction;
    }

    fn finish(&mut self, _kind: ProcessKind, _lab: &mut LabStore) -> Stage {
        Stage::complete(
            "Filtration complete: sand was left on the filter paper as residue and clear water passed through as filtrate",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiments::ExperimentRun;

    #[test]
    fn test_levels_move_with_progress() {
        let mut lab = LabStore::new();
        let mut run = ExperimentRun::<Filtration>::new();
        let _ = run.click(&mut lab, FiltrationTarget::FilterPaper);
        let _ = run.click(&mut lab, FiltrationTarget::Pour);

        for _ in 0..5 {
            let _ = run.tick(&mut lab);
        }
        let state = run.protocol();
        assert!((state.mixture_level() - 0.5).abs() < 1e-9);
        assert!((state.filtrate_level() - 0.4).abs() < 1e-9);
        assert!((state.residue_level() - 0.15).abs() < 1e-9);

        for _ in 0..5 {
            let _ = run.tick(&mut lab);
        }
        assert!(run.protocol().mixture_level().abs() < 1e-9);
        let text = run.stage().result_text().unwrap();
        assert!(text.contains("residue") && text.contains("filtrate"));
        assert_eq!(lab.state().completed_tests, 0);
    }

    #[test]
    fn test_pour_without_paper_ignored() {
        let mut lab = LabStore::new();
        let mut run = ExperimentRun::<Filtration>::new();
        assert!(!run.click(&mut lab, FiltrationTarget::Pour).is_applied());
        assert!((run.protocol().mixture_level() - 1.0).abs() < f64::EPSILON);
    }
}

//! Displacement reactions: dip a metal into copper(II) sulfate

use std::fmt;

use serde::{Deserialize, Serialize};

use super::machine::Protocol;
use super::stage::{ProcessKind, Stage};
use crate::chemistry::{lerp_color, Color};
use crate::lab::{ExperimentKind, LabStore, Rejection};

/// Copper(II) sulfate solution before any reaction.
pub const COPPER_SULFATE_BLUE: Color = Color::rgb(0x1e, 0x6f, 0xd9);
/// Solution once the copper ions are used up.
pub const SPENT_SOLUTION: Color = Color::rgb(0xdd, 0xee, 0xe6);

const REACTING_TICKS: u32 = 10;

/// Metals on the bench, ordered most to least reactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metal {
    /// Mg
    Magnesium,
    /// Zn
    Zinc,
    /// Fe
    Iron,
    /// Cu
    Copper,
    /// Ag
    Silver,
}

impl Metal {
    /// Position in the reactivity series; higher displaces lower.
    #[must_use]
    pub const fn reactivity(self) -> u8 {
        match self {
            Self::Magnesium => 5,
            Self::Zinc => 4,
            Self::Iron => 3,
            Self::Copper => 2,
            Self::Silver => 1,
        }
    }

    /// Whether this metal displaces copper from copper(II) sulfate.
    #[must_use]
    pub const fn displaces_copper(self) -> bool {
        self.reactivity() > Self::Copper.reactivity()
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Magnesium => "Magnesium",
            Self::Zinc => "Zinc",
            Self::Iron => "Iron",
            Self::Copper => "Copper",
            Self::Silver => "Silver",
        })
    }
}

/// Clickable objects in the displacement scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplacementTarget {
    /// A metal strip on the bench
    Metal(Metal),
    /// The beaker of copper(II) sulfate
    Dip,
}

/// Displacement protocol state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Displacement {
    metal: Option<Metal>,
    solution_color: Color,
    copper_coating: f64,
}

impl Default for Displacement {
    fn default() -> Self {
        Self {
            metal: None,
            solution_color: COPPER_SULFATE_BLUE,
            copper_coating: 0.0,
        }
    }
}

impl Displacement {
    /// Metal selected.
    #[must_use]
    pub const fn metal(&self) -> Option<Metal> {
        self.metal
    }

    /// Current solution color.
    #[must_use]
    pub const fn solution_color(&self) -> Color {
        self.solution_color
    }

    /// Fraction of the strip covered in deposited copper.
    #[must_use]
    pub const fn copper_coating(&self) -> f64 {
        self.copper_coating
    }
}

impl Protocol for Displacement {
    type Target = DisplacementTarget;
    const KIND: ExperimentKind = ExperimentKind::Displacement;

    fn click(
        &mut self,
        stage: &Stage,
        target: DisplacementTarget,
        _lab: &mut LabStore,
    ) -> Result<Stage, Rejection> {
        match (stage, target) {
            (Stage::Setup | Stage::Applying, DisplacementTarget::Metal(metal)) => {
                self.metal = Some(metal);
                Ok(Stage::Applying)
            }
            (Stage::Applying, DisplacementTarget::Dip) => {
                Ok(Stage::processing(ProcessKind::Reacting, REACTING_TICKS))
            }
            (_, DisplacementTarget::Dip) => Err(Rejection::precondition("select a metal first")),
            (_, DisplacementTarget::Metal(_)) => {
                Err(Rejection::precondition("metal already in use"))
            }
        }
    }

    fn advance(&mut self, _kind: ProcessKind, fraction: f64) {
        if self.metal.is_some_and(Metal::displaces_copper) {
            self.solution_color = lerp_color(COPPER_SULFATE_BLUE, SPENT_SOLUTION, fraction);
            self.copper_coating = fraction;
        }
    }

    fn finish(&mut self, _kind: ProcessKind, _lab: &mut LabStore) -> Stage {
        match self.metal {
            Some(metal) if metal.displaces_copper() => Stage::complete(format!(
                "{metal} displaced copper from copper(II) sulfate: the blue solution faded and copper coated the {}",
                metal.to_string().to_lowercase()
            )),
            Some(metal) => Stage::complete(format!(
                "{metal} is not more reactive than copper: no displacement occurred"
            )),
            None => Stage::complete("No metal was added: no displacement occurred"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiments::ExperimentRun;

    fn dip(metal: Metal) -> ExperimentRun<Displacement> {
        let mut lab = LabStore::new();
        let mut run = ExperimentRun::<Displacement>::new();
        let _ = run.click(&mut lab, DisplacementTarget::Metal(metal));
        assert!(run.click(&mut lab, DisplacementTarget::Dip).is_applied());
        while run.stage().is_processing() {
            let _ = run.tick(&mut lab);
        }
        assert_eq!(lab.state().completed_tests, 0);
        run
    }

    #[test]
    fn test_reactivity_series() {
        assert!(Metal::Magnesium.displaces_copper());
        assert!(Metal::Iron.displaces_copper());
        assert!(!Metal::Copper.displaces_copper());
        assert!(!Metal::Silver.displaces_copper());
    }

    #[test]
    fn test_zinc_displaces_copper() {
        let run = dip(Metal::Zinc);
        assert_eq!(run.protocol().solution_color(), SPENT_SOLUTION);
        assert!((run.protocol().copper_coating() - 1.0).abs() < f64::EPSILON);
        assert!(run.stage().result_text().unwrap().starts_with("Zinc displaced copper"));
    }

    #[test]
    fn test_silver_does_nothing() {
        let run = dip(Metal::Silver);
        assert_eq!(run.protocol().solution_color(), COPPER_SULFATE_BLUE);
        assert!(run.protocol().copper_coating().abs() < f64::EPSILON);
        assert!(run.stage().result_text().unwrap().contains("no displacement"));
    }

    #[test]
    fn test_can_swap_metal_before_dipping() {
        let mut lab = LabStore::new();
        let mut run = ExperimentRun::<Displacement>::new();
        let _ = run.click(&mut lab, DisplacementTarget::Metal(Metal::Silver));
        let _ = run.click(&mut lab, DisplacementTarget::Metal(Metal::Magnesium));
        assert_eq!(run.protocol().metal(), Some(Metal::Magnesium));
    }
}

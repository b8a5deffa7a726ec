//! pH testing: pick up a strip, dip it, watch the indicator develop

use serde::Serialize;

use super::machine::Protocol;
use super::stage::{ProcessKind, Stage};
use crate::chemistry::{lerp_color, ph_to_color, ph_to_description, Color};
use crate::lab::{ExperimentKind, HeldItem, ItemCategory, LabStore, Rejection};

/// Color of an unused indicator strip.
pub const PAPER_COLOR: Color = Color::rgb(0xf5, 0xde, 0xb3);

const REACTING_TICKS: u32 = 5;

/// Clickable objects in the pH scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhTarget {
    /// A test strip on the bench
    Strip(String),
    /// A beaker to dip the held strip into
    Beaker(String),
}

/// pH testing protocol state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhTesting {
    strip_id: Option<String>,
    beaker_id: Option<String>,
    solution_name: Option<String>,
    reading: Option<f64>,
    strip_color: Color,
    indicator_color: Color,
}

impl Default for PhTesting {
    fn default() -> Self {
        Self {
            strip_id: None,
            beaker_id: None,
            solution_name: None,
            reading: None,
            strip_color: PAPER_COLOR,
            indicator_color: PAPER_COLOR,
        }
    }
}

impl PhTesting {
    /// Strip currently in use.
    #[must_use]
    pub fn strip_id(&self) -> Option<&str> {
        self.strip_id.as_deref()
    }

    /// Beaker the strip was dipped into.
    #[must_use]
    pub fn beaker_id(&self) -> Option<&str> {
        self.beaker_id.as_deref()
    }

    /// Measured pH, once dipped.
    #[must_use]
    pub const fn reading(&self) -> Option<f64> {
        self.reading
    }

    /// Current strip color (paper blending into the indicator color).
    #[must_use]
    pub const fn strip_color(&self) -> Color {
        self.strip_color
    }
}

impl Protocol for PhTesting {
    type Target = PhTarget;
    const KIND: ExperimentKind = ExperimentKind::PhTesting;

    fn click(
        &mut self,
        stage: &Stage,
        target: PhTarget,
        lab: &mut LabStore,
    ) -> Result<Stage, Rejection> {
        match (stage, target) {
            (Stage::Setup, PhTarget::Strip(id)) => {
                lab.grab(HeldItem::TestStrip(id.clone())).into_result()?;
                self.strip_id = Some(id);
                Ok(Stage::Applying)
            }
            (Stage::Setup, PhTarget::Beaker(_)) => {
                Err(Rejection::precondition("pick up a test strip first"))
            }
            (Stage::Applying, PhTarget::Beaker(beaker_id)) => {
                let strip_id = self
                    .strip_id
                    .clone()
                    .ok_or_else(|| Rejection::precondition("no test strip in hand"))?;
                if !lab.state().holds(&HeldItem::TestStrip(strip_id.clone())) {
                    return Err(Rejection::precondition("the test strip is no longer in hand"));
                }
                lab.test_strip_in_liquid(&strip_id, &beaker_id).into_result()?;

                let beaker = lab
                    .state()
                    .beaker(&beaker_id)
                    .ok_or_else(|| Rejection::unknown(&beaker_id))?;
                self.reading = Some(beaker.ph_value());
                self.solution_name = Some(beaker.solution_name().to_string());
                self.indicator_color = ph_to_color(beaker.ph_value());
                self.beaker_id = Some(beaker_id);
                Ok(Stage::processing(ProcessKind::Reacting, REACTING_TICKS))
            }
            (_, PhTarget::Strip(_)) => Err(Rejection::precondition("already holding a test strip")),
            (_, PhTarget::Beaker(_)) => Err(Rejection::precondition("strip not ready")),
        }
    }

    fn advance(&mut self, _kind: ProcessKind, fraction: f64) {
        self.strip_color = lerp_color(PAPER_COLOR, self.indicator_color, fraction);
    }

    fn finish(&mut self, _kind: ProcessKind, lab: &mut LabStore) -> Stage {
        let _ = lab.release(ItemCategory::TestStrip);
        let ph = self.reading.unwrap_or_default();
        let solution = self.solution_name.as_deref().unwrap_or("The solution");
        Stage::complete(format!(
            "{solution} has a pH of {ph:.1} ({})",
            ph_to_description(ph).to_string().to_lowercase()
        ))
    }

    fn release(&mut self, lab: &mut LabStore) {
        if self.strip_id.is_some() {
            let _ = lab.release(ItemCategory::TestStrip);
        }
    }
}

//! Paper chromatography: spot an ink, add solvent, watch it separate

use std::fmt;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::machine::Protocol;
use super::stage::{ProcessKind, Stage};
use crate::chemistry::Color;
use crate::lab::{ExperimentKind, LabStore, Rejection};

/// Highest point the solvent front reaches, as a fraction of paper height.
pub const SOLVENT_FRONT_MAX: f64 = 0.9;

const SEPARATING_TICKS: u32 = 20;

/// A single dye in an ink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pigment {
    /// Dye color name
    pub name: &'static str,
    /// Spot color
    pub color: Color,
    /// Retention factor: distance travelled relative to the solvent front
    pub rf: f64,
}

const BLUE: Pigment = Pigment {
    name: "blue",
    color: Color::rgb(0x1f, 0x3f, 0xbf),
    rf: 0.80,
};
const RED: Pigment = Pigment {
    name: "red",
    color: Color::rgb(0xd6, 0x28, 0x28),
    rf: 0.55,
};
const YELLOW: Pigment = Pigment {
    name: "yellow",
    color: Color::rgb(0xf2, 0xc5, 0x00),
    rf: 0.30,
};

const BLACK_MARKER_DYES: [Pigment; 3] = [BLUE, RED, YELLOW];
const GREEN_FOOD_DYES: [Pigment; 2] = [
    Pigment { rf: 0.70, ..BLUE },
    Pigment { rf: 0.40, ..YELLOW },
];
const RED_INK_DYES: [Pigment; 1] = [Pigment { rf: 0.60, ..RED }];

/// Ink samples available for spotting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ink {
    /// Mixture of three dyes
    BlackMarker,
    /// Blue and yellow
    GreenFoodColoring,
    /// Single dye
    RedInk,
}

impl Ink {
    /// Dyes in this ink, fastest-moving first.
    #[must_use]
    pub const fn pigments(self) -> &'static [Pigment] {
        match self {
            Self::BlackMarker => &BLACK_MARKER_DYES,
            Self::GreenFoodColoring => &GREEN_FOOD_DYES,
            Self::RedInk => &RED_INK_DYES,
        }
    }
}

impl fmt::Display for Ink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BlackMarker => "Black marker ink",
            Self::GreenFoodColoring => "Green food coloring",
            Self::RedInk => "Red ink",
        })
    }
}

/// Clickable objects in the chromatography scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromatographyTarget {
    /// An ink vial to spot from
    Ink(Ink),
    /// The solvent bottle
    Solvent,
}

/// Chromatography protocol state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Chromatography {
    ink: Option<Ink>,
    solvent_front: f64,
    /// Height of each pigment spot, in `Ink::pigments` order.
    spot_heights: Vec<f64>,
}

impl Chromatography {
    /// Ink spotted on the paper.
    #[must_use]
    pub const fn ink(&self) -> Option<Ink> {
        self.ink
    }

    /// Height of the solvent front.
    #[must_use]
    pub const fn solvent_front(&self) -> f64 {
        self.solvent_front
    }

    /// Height of each pigment spot.
    #[must_use]
    pub fn spot_heights(&self) -> &[f64] {
        &self.spot_heights
    }
}

impl Protocol for Chromatography {
    type Target = ChromatographyTarget;
    const KIND: ExperimentKind = ExperimentKind::Chromatography;

    fn click(
        &mut self,
        stage: &Stage,
        target: ChromatographyTarget,
        _lab: &mut LabStore,
    ) -> Result<Stage, Rejection> {
        match (stage, target) {
            (Stage::Setup, ChromatographyTarget::Ink(ink)) => {
                self.ink = Some(ink);
                self.spot_heights = vec![0.0; ink.pigments().len()];
                Ok(Stage::Applying)
            }
            (Stage::Applying, ChromatographyTarget::Solvent) => {
                Ok(Stage::processing(ProcessKind::Separating, SEPARATING_TICKS))
            }
            (_, ChromatographyTarget::Solvent) => {
                Err(Rejection::precondition("spot an ink on the paper first"))
            }
            (_, ChromatographyTarget::Ink(_)) => {
                Err(Rejection::precondition("the paper already has an ink spot"))
            }
        }
    }

    fn advance(&mut self, _kind: ProcessKind, fraction: f64) {
        self.solvent_front = SOLVENT_FRONT_MAX * fraction;
        if let Some(ink) = self.ink {
            self.spot_heights = ink
                .pigments()
                .iter()
                .map(|pigment| pigment.rf * self.solvent_front)
                .collect();
        }
    }

    fn finish(&mut self, _kind: ProcessKind, _lab: &mut LabStore) -> Stage {
        let Some(ink) = self.ink else {
            return Stage::complete("The solvent ran up blank paper");
        };

        let pigments = ink.pigments();
        let mut components = String::new();
        for (i, pigment) in pigments.iter().enumerate() {
            if i > 0 {
                components.push_str(", ");
            }
            let _ = write!(components, "{} (Rf {:.2})", pigment.name, pigment.rf);
        }
        let noun = if pigments.len() == 1 {
            "component"
        } else {
            "components"
        };
        Stage::complete(format!(
            "{ink} separated into {} {noun}: {components}",
            pigments.len()
        ))
    }
}

//! Per-experiment state machines
//!
//! ## Architecture
//!
//! ```text
//! click(target) ──> ExperimentRun<P> ──> P::click ──> LabStore (pH / flame / gas only)
//!                        │
//! tick / advance_by ─────┤ Processing { kind, elapsed, total }
//!                        │     └── P::advance(kind, fraction)   visual quantities
//!                        └── P::finish ──> next Stage ──> on_complete(result_text)
//! ```
//!
//! pH, flame and gas protocols drive the shared [`LabStore`](crate::lab::LabStore)
//! and count toward its progress bar. The other five keep all of their
//! state locally and only report through the completion callback.
//!
//! ## Usage
//!
//! ```rust
//! use chemlab::experiments::{Evaporation, EvaporationTarget, ExperimentRun};
//! use chemlab::lab::LabStore;
//! use std::time::Duration;
//!
//! let mut lab = LabStore::new();
//! let mut run = ExperimentRun::<Evaporation>::new();
//! let _ = run.click(&mut lab, EvaporationTarget::Pour);
//! let _ = run.click(&mut lab, EvaporationTarget::Burner);
//!
//! run.advance_by(&mut lab, Duration::from_secs(8));
//! assert!(run.protocol().salt_crystals());
//! assert!(run.stage().is_complete());
//! ```

mod chromatography;
mod decanting;
mod displacement;
mod evaporation;
mod filtration;
mod machine;
mod ph_testing;
mod stage;

pub use chromatography::{Chromatography, ChromatographyTarget, Ink, Pigment, SOLVENT_FRONT_MAX};
pub use decanting::{Decanting, DecantingTarget, SEDIMENT_MAX, SOURCE_REMAINDER};
pub use displacement::{
    Displacement, DisplacementTarget, Metal, COPPER_SULFATE_BLUE, SPENT_SOLUTION,
};
pub use evaporation::{Evaporation, EvaporationTarget, EVAPORATION_SECONDS};
pub use filtration::{Filtration, FiltrationTarget, FILTRATE_MAX, RESIDUE_MAX};
pub use flame_test::{FlameTarget, FlameTesting, BURNER_FLAME};
pub use gas_test::{GasTarget, GasTesting};
pub use machine::{CompletionCallback, ExperimentRun, Protocol, DEFAULT_TICK_INTERVAL};
pub use ph_testing::{PhTarget, PhTesting, PAPER_COLOR};
pub use stage::{ProcessKind, Stage};

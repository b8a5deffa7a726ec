//! Interaction Store and the lab data model
//!
//! ## Overview
//!
//! ```text
//! LabConfig ──> LabStore ──owns──> LabState
//!                  │                 ├── catalogs: Beaker, TestStrip, MetalSalt, GasTest
//!                  │                 ├── held items (one per ItemCategory)
//!                  │                 ├── last TestResult / FlameTestResult / GasTestResult
//!                  │                 └── completed_tests / total_tests
//!                  └── dispatch(LabAction) -> ActionOutcome
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use chemlab::lab::{ActionOutcome, ExperimentKind, LabStore, TestTool};
//!
//! let mut lab = LabStore::new();
//! assert!(lab.switch_experiment(ExperimentKind::GasTests).is_applied());
//!
//! // Wrong tool still counts as a completed test
//! let outcome = lab.perform_gas_test("gas-1", TestTool::GlowingSplint);
//! assert_eq!(outcome, ActionOutcome::Applied);
//!
//! let result = lab.state().last_gas_test_result.as_ref().unwrap();
//! assert!(!result.correct());
//! assert_eq!(result.result(), "No reaction");
//! ```

mod action;
mod config;
mod equipment;
mod experiment_kind;
mod fixtures;
mod outcome;
mod result_record;
mod store;

pub use action::{HeldItem, ItemCategory, LabAction};
pub use config::{Clock, LabConfig, LabConfigBuilder, DEFAULT_TOTAL_TESTS};
pub use equipment::{Beaker, GasTest, MetalSalt, Position, TestStrip, TestTool};
pub use experiment_kind::ExperimentKind;
pub use fixtures::Fixtures;
pub use outcome::{ActionOutcome, Rejection};
pub use result_record::{FlameTestResult, GasTestResult, TestResult, NO_REACTION};
pub use store::{LabState, LabStore, SubscriptionId};

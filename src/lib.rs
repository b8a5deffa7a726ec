//! # Chemlab: Interaction Store and Experiment Machines for a 3D Chemistry Lab
//!
//! **Version**: 0.3.0
//!
//! Chemlab is the logic core behind a browser-based chemistry lab. The
//! renderer draws the bench; this crate decides what each click does.
//!
//! ## Layers
//!
//! - [`chemistry`]: pure pH-to-color and classification lookups
//! - [`lab`]: the shared [`LabStore`](lab::LabStore) holding equipment,
//!   held items, test results and the progress counter
//! - [`experiments`]: one state machine per experiment, advanced by clicks
//!   and timer ticks
//! - [`runtime`] (feature `tokio`): cancelable async tick driver
//! - `wasm` (wasm32 + feature `wasm`): JavaScript bindings
//!
//! ## Example Usage
//!
//! ```rust
//! use chemlab::experiments::{ExperimentRun, PhTarget, PhTesting};
//! use chemlab::lab::LabStore;
//!
//! let mut lab = LabStore::new();
//! let mut run = ExperimentRun::<PhTesting>::new();
//!
//! let _ = run.click(&mut lab, PhTarget::Strip("strip-1".into()));
//! let _ = run.click(&mut lab, PhTarget::Beaker("beaker-3".into()));
//! while run.stage().is_processing() {
//!     let _ = run.tick(&mut lab);
//! }
//!
//! assert_eq!(lab.state().completed_tests, 1);
//! assert!((lab.progress_percent() - 10.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod chemistry;
pub mod error;
pub mod experiments;
pub mod lab;
#[cfg(feature = "tokio")]
pub mod runtime;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod wasm;

pub use error::{Error, Result};

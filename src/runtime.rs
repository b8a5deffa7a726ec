//! Async tick driver for experiment runs
//!
//! [`spawn_timer`] runs a tokio task that ticks a shared [`Workbench`] at
//! the running phase's interval. The returned [`TimerHandle`] owns the
//! task: dropping it cancels the timer, so a run that is reset, switched
//! away from or discarded mid-phase stops ticking immediately.
//!
//! The task exits on its own once the run leaves its timed phase. Phases
//! entered later (decanting's pour) need a fresh [`spawn_timer`] call.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chemlab::experiments::{Evaporation, EvaporationTarget};
//! use chemlab::runtime::{spawn_timer, Workbench};
//! use tokio::sync::Mutex;
//!
//! # async fn example() {
//! let bench = Arc::new(Mutex::new(Workbench::<Evaporation>::default()));
//! {
//!     let mut bench = bench.lock().await;
//!     let _ = bench.click(EvaporationTarget::Pour);
//!     let _ = bench.click(EvaporationTarget::Burner);
//! }
//! let timer = spawn_timer(Arc::clone(&bench));
//! timer.join().await;
//! assert!(bench.lock().await.run.protocol().salt_crystals());
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::experiments::{ExperimentRun, Protocol};
use crate::lab::{ActionOutcome, LabStore};

/// A lab store paired with one experiment run.
#[derive(Debug)]
pub struct Workbench<P: Protocol> {
    /// Shared interaction store
    pub lab: LabStore,
    /// Active experiment
    pub run: ExperimentRun<P>,
}

impl<P: Protocol> Default for Workbench<P> {
    fn default() -> Self {
        Self::new(LabStore::new())
    }
}

impl<P: Protocol> Workbench<P> {
    /// Pair `lab` with a fresh run.
    #[must_use]
    pub fn new(lab: LabStore) -> Self {
        Self {
            lab,
            run: ExperimentRun::new(),
        }
    }

    /// Forward a click to the run.
    pub fn click(&mut self, target: P::Target) -> ActionOutcome {
        self.run.click(&mut self.lab, target)
    }

    /// Run one tick.
    pub fn tick(&mut self) -> ActionOutcome {
        self.run.tick(&mut self.lab)
    }

    /// Reset the run, releasing anything it holds in the lab.
    pub fn reset(&mut self) {
        self.run.reset(&mut self.lab);
    }
}

/// Owner of a running tick task. Dropping it cancels the task.
#[derive(Debug)]
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    /// Stop ticking now.
    pub fn cancel(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether the task has exited (phase over or cancelled).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the timed phase to end.
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Tick `bench` at its running phase's interval until the phase ends.
///
/// If no phase is running the task exits on its first check.
pub fn spawn_timer<P>(bench: Arc<Mutex<Workbench<P>>>) -> TimerHandle
where
    P: Protocol + Send + 'static,
{
    let task = tokio::spawn(async move {
        loop {
            let Some(interval) = bench.lock().await.run.tick_interval() else {
                break;
            };
            tokio::time::sleep(interval).await;

            let mut bench = bench.lock().await;
            if bench.run.stage().is_processing() {
                let _ = bench.tick();
            }
        }
        debug!(experiment = %P::KIND, "Tick timer finished");
    });

    TimerHandle { task: Some(task) }
}

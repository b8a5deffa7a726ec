//! Generic experiment machine
//!
//! Every experiment shares one shape: clicks move it from `Setup` through
//! `Applying` into a timed `Processing` phase, and ticks advance that phase
//! until it hands over to the next stage (usually `Complete`). A
//! [`Protocol`] supplies the experiment-specific parts; [`ExperimentRun`]
//! owns the stage, the tick timer and the completion callback.
//!
//! The timer exists only while a processing phase is running. Leaving the
//! phase or calling [`ExperimentRun::reset`] disarms it, so a run can never
//! keep ticking in the background.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, trace};

use super::stage::{ProcessKind, Stage};
use crate::lab::{ActionOutcome, ExperimentKind, LabStore, Rejection};

/// Tick period used unless a protocol overrides it.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(300);

/// Callback receiving the result text when a run completes.
pub type CompletionCallback = Box<dyn FnMut(&str) + Send>;

/// Experiment-specific behavior plugged into an [`ExperimentRun`].
pub trait Protocol: Default {
    /// Clickable objects in this experiment's scene.
    type Target: fmt::Debug;

    /// Experiment this protocol implements.
    const KIND: ExperimentKind;

    /// Handle a click while in `Setup` or `Applying`.
    ///
    /// Returns the next stage (possibly unchanged), or the reason the click
    /// is ignored. A rejected click must leave both the protocol and the lab
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] when the click does not fit the current stage
    /// or the lab refuses the underlying action.
    fn click(
        &mut self,
        stage: &Stage,
        target: Self::Target,
        lab: &mut LabStore,
    ) -> Result<Stage, Rejection>;

    /// Derive visual quantities for `fraction` of the way through `kind`.
    fn advance(&mut self, kind: ProcessKind, fraction: f64);

    /// Stage that follows a finished processing phase.
    fn finish(&mut self, kind: ProcessKind, lab: &mut LabStore) -> Stage;

    /// Period between ticks of `kind`.
    fn tick_interval(&self, _kind: ProcessKind) -> Duration {
        DEFAULT_TICK_INTERVAL
    }

    /// Put down anything this run is holding in the lab. Called on reset.
    fn release(&mut self, _lab: &mut LabStore) {}
}

/// One experiment's state machine.
pub struct ExperimentRun<P: Protocol> {
    protocol: P,
    stage: Stage,
    /// Time accumulated toward the next tick; `None` when no timer is armed.
    timer: Option<Duration>,
    on_complete: Option<CompletionCallback>,
}

impl<P: Protocol + fmt::Debug> fmt::Debug for ExperimentRun<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExperimentRun")
            .field("protocol", &self.protocol)
            .field("stage", &self.stage)
            .field("timer", &self.timer)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl<P: Protocol> Default for ExperimentRun<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Protocol> ExperimentRun<P> {
    /// Create a run in `Setup`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            protocol: P::default(),
            stage: Stage::Setup,
            timer: None,
            on_complete: None,
        }
    }

    /// Attach a completion callback.
    #[must_use]
    pub fn with_completion<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Replace the completion callback.
    pub fn set_on_complete<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
    }

    /// Current stage.
    #[must_use]
    pub const fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Experiment-specific state, for rendering.
    #[must_use]
    pub const fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Progress fraction of the current stage.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.stage.fraction()
    }

    /// Whether a tick timer is armed.
    #[must_use]
    pub const fn timer_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Period of the running phase's ticks, if any.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.stage
            .process_kind()
            .map(|kind| self.protocol.tick_interval(kind))
    }

    /// Handle a click on a scene object.
    ///
    /// Ignored while a timed phase runs or after completion.
    pub fn click(&mut self, lab: &mut LabStore, target: P::Target) -> ActionOutcome {
        let result = match &self.stage {
            Stage::Processing { kind, .. } => Err(Rejection::precondition(format!(
                "busy until {kind:?} finishes"
            ))),
            Stage::Complete { .. } => Err(Rejection::precondition(
                "run already complete; reset to start again",
            )),
            Stage::Setup | Stage::Applying => {
                debug!(experiment = %P::KIND, ?target, "Experiment click");
                self.protocol.click(&self.stage, target, lab)
            }
        };

        match result {
            Ok(next) => {
                self.enter(next);
                ActionOutcome::Applied
            }
            Err(rejection) => {
                debug!(experiment = %P::KIND, %rejection, "Experiment click ignored");
                rejection.into()
            }
        }
    }

    /// Advance the running phase by one tick.
    pub fn tick(&mut self, lab: &mut LabStore) -> ActionOutcome {
        let Stage::Processing {
            kind,
            elapsed_ticks,
            total_ticks,
        } = &mut self.stage
        else {
            return Rejection::precondition("no timed phase is running").into();
        };

        *elapsed_ticks = (*elapsed_ticks + 1).min(*total_ticks);
        let (kind, elapsed, total) = (*kind, *elapsed_ticks, *total_ticks);
        let fraction = f64::from(elapsed) / f64::from(total);

        self.protocol.advance(kind, fraction);
        trace!(experiment = %P::KIND, ?kind, elapsed, total, "Experiment tick");

        if elapsed >= total {
            let next = self.protocol.finish(kind, lab);
            self.enter(next);
        }
        ActionOutcome::Applied
    }

    /// Feed wall-clock time to the armed timer, running every tick that
    /// falls due. Returns the number of ticks run.
    ///
    /// Time left over when the phase ends carries into the next timed phase
    /// if `finish` starts one, and is dropped otherwise.
    pub fn advance_by(&mut self, lab: &mut LabStore, elapsed: Duration) -> u32 {
        let Some(mut pending) = self.timer.map(|carried| carried.saturating_add(elapsed)) else {
            return 0;
        };

        let mut ticks = 0;
        while let Some(kind) = self.stage.process_kind() {
            let interval = self.protocol.tick_interval(kind).max(Duration::from_millis(1));
            if pending < interval {
                self.timer = Some(pending);
                break;
            }
            pending -= interval;
            let _ = self.tick(lab);
            ticks += 1;
        }
        ticks
    }

    /// Return to `Setup`, releasing held lab items and disarming the timer.
    /// The completion callback is kept.
    pub fn reset(&mut self, lab: &mut LabStore) {
        self.protocol.release(lab);
        self.protocol = P::default();
        self.stage = Stage::Setup;
        self.timer = None;
        info!(experiment = %P::KIND, "Experiment reset");
    }

    fn enter(&mut self, next: Stage) {
        let newly_complete = next.is_complete() && !self.stage.is_complete();
        self.timer = next.is_processing().then_some(Duration::ZERO);
        self.stage = next;

        if newly_complete {
            if let Stage::Complete { result_text } = &self.stage {
                info!(
                    experiment = %P::KIND,
                    shared_progress = P::KIND.counts_toward_progress(),
                    result = %result_text,
                    "Experiment complete"
                );
                if let Some(callback) = self.on_complete.as_mut() {
                    callback(result_text);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Two clicks, then a three-tick phase.
    #[derive(Debug, Default)]
    struct Kettle {
        temperature: f64,
    }

    #[derive(Debug)]
    enum KettleTarget {
        Fill,
        Switch,
    }

    impl Protocol for Kettle {
        type Target = KettleTarget;
        const KIND: ExperimentKind = ExperimentKind::Evaporation;

        fn click(
            &mut self,
            stage: &Stage,
            target: KettleTarget,
            _lab: &mut LabStore,
        ) -> Result<Stage, Rejection> {
            match (stage, target) {
                (Stage::Setup, KettleTarget::Fill) => Ok(Stage::Applying),
                (Stage::Applying, KettleTarget::Switch) => {
                    Ok(Stage::processing(ProcessKind::Heating, 3))
                }
                _ => Err(Rejection::precondition("fill the kettle first")),
            }
        }

        fn advance(&mut self, _kind: ProcessKind, fraction: f64) {
            self.temperature = 20.0 + 80.0 * fraction;
        }

        fn finish(&mut self, _kind: ProcessKind, _lab: &mut LabStore) -> Stage {
            Stage::complete("boiled")
        }
    }

    fn counted_run(calls: &Arc<AtomicUsize>) -> ExperimentRun<Kettle> {
        let calls = Arc::clone(calls);
        ExperimentRun::new().with_completion(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_click_order_enforced() {
        let mut lab = LabStore::new();
        let mut run = ExperimentRun::<Kettle>::new();
        let outcome = run.click(&mut lab, KettleTarget::Switch);
        assert!(matches!(outcome, ActionOutcome::IgnoredPreconditionNotMet(_)));
        assert_eq!(run.stage(), &Stage::Setup);
        assert!(!run.timer_armed());
    }

    #[test]
    fn test_ticks_reach_completion_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut lab = LabStore::new();
        let mut run = counted_run(&calls);

        assert!(run.click(&mut lab, KettleTarget::Fill).is_applied());
        assert!(run.click(&mut lab, KettleTarget::Switch).is_applied());
        assert!(run.timer_armed());

        for _ in 0..3 {
            assert!(run.tick(&mut lab).is_applied());
        }
        assert_eq!(run.stage().result_text(), Some("boiled"));
        assert!((run.protocol().temperature - 100.0).abs() < 1e-9);
        assert!(!run.timer_armed());

        // Further ticks and clicks are ignored and do not re-fire the callback.
        assert!(!run.tick(&mut lab).is_applied());
        assert!(!run.click(&mut lab, KettleTarget::Fill).is_applied());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_advance_by_accumulates_partial_intervals() {
        let mut lab = LabStore::new();
        let mut run = ExperimentRun::<Kettle>::new();
        assert_eq!(run.advance_by(&mut lab, Duration::from_secs(5)), 0);

        let _ = run.click(&mut lab, KettleTarget::Fill);
        let _ = run.click(&mut lab, KettleTarget::Switch);

        assert_eq!(run.advance_by(&mut lab, Duration::from_millis(200)), 0);
        assert_eq!(run.advance_by(&mut lab, Duration::from_millis(200)), 1);
        assert_eq!(run.advance_by(&mut lab, Duration::from_secs(10)), 2);
        assert!(run.stage().is_complete());
    }

    #[test]
    fn test_advance_by_huge_elapsed_saturates() {
        let mut lab = LabStore::new();
        let mut run = ExperimentRun::<Kettle>::new();
        let _ = run.click(&mut lab, KettleTarget::Fill);
        let _ = run.click(&mut lab, KettleTarget::Switch);

        assert_eq!(run.advance_by(&mut lab, Duration::from_millis(100)), 0);
        assert_eq!(run.advance_by(&mut lab, Duration::MAX), 3);
        assert!(run.stage().is_complete());
        assert!(!run.timer_armed());
    }

    #[test]
    fn test_reset_disarms_timer_and_allows_rerun() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut lab = LabStore::new();
        let mut run = counted_run(&calls);

        let _ = run.click(&mut lab, KettleTarget::Fill);
        let _ = run.click(&mut lab, KettleTarget::Switch);
        let _ = run.tick(&mut lab);
        run.reset(&mut lab);

        assert_eq!(run.stage(), &Stage::Setup);
        assert!(!run.timer_armed());
        assert!(run.protocol().temperature.abs() < f64::EPSILON);
        assert_eq!(run.advance_by(&mut lab, Duration::from_secs(60)), 0);

        let _ = run.click(&mut lab, KettleTarget::Fill);
        let _ = run.click(&mut lab, KettleTarget::Switch);
        run.advance_by(&mut lab, Duration::from_secs(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

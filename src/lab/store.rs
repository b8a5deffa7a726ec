//! Interaction Store - single source of truth for the lab
//!
//! Holds the experiment selection, equipment catalogs, held items, the
//! last result of each test kind and the shared progress counter. Every
//! mutator is synchronous and returns an [`ActionOutcome`]; ignored
//! actions leave the state untouched and are logged at debug level.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::action::{HeldItem, ItemCategory, LabAction};
use super::config::LabConfig;
use super::equipment::{Beaker, GasTest, MetalSalt, TestStrip, TestTool};
use super::experiment_kind::ExperimentKind;
use super::outcome::{ActionOutcome, Rejection};
use super::result_record::{FlameTestResult, GasTestResult, TestResult};

/// Snapshot of everything the renderer and overlay read.
///
/// Immutable catalogs are shared `Arc` slices: switching experiments keeps
/// the same allocation, a reset replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabState {
    /// Active experiment
    pub experiment: ExperimentKind,
    /// Beakers of solution
    pub beakers: Arc<[Beaker]>,
    /// Test strips (readings mutate)
    pub test_strips: Vec<TestStrip>,
    /// Flame-test salts
    pub metal_salts: Arc<[MetalSalt]>,
    /// Gas samples
    pub gas_tests: Arc<[GasTest]>,
    /// Held test strip
    pub selected_strip_id: Option<String>,
    /// Held gas identification tool
    pub selected_test_tool: Option<TestTool>,
    /// Salt on the wire loop
    pub selected_salt_id: Option<String>,
    /// Held gas sample
    pub selected_gas_id: Option<String>,
    /// Bunsen burner lit
    pub bunsen_burner_on: bool,
    /// Wire loop in hand
    pub wire_loop_selected: bool,
    /// Most recent strip reading
    pub last_test_result: Option<TestResult>,
    /// Most recent flame test
    pub last_flame_test_result: Option<FlameTestResult>,
    /// Most recent gas test
    pub last_gas_test_result: Option<GasTestResult>,
    /// Successful test actions since the last reset or switch
    pub completed_tests: u32,
    /// Progress denominator
    pub total_tests: u32,
}

impl LabState {
    fn initial(config: &LabConfig, experiment: ExperimentKind) -> Self {
        let fixtures = config.fixtures();
        Self {
            experiment,
            beakers: Arc::from(fixtures.beakers.clone()),
            test_strips: fixtures.test_strips.clone(),
            metal_salts: Arc::from(fixtures.metal_salts.clone()),
            gas_tests: Arc::from(fixtures.gas_tests.clone()),
            selected_strip_id: None,
            selected_test_tool: None,
            selected_salt_id: None,
            selected_gas_id: None,
            bunsen_burner_on: false,
            wire_loop_selected: false,
            last_test_result: None,
            last_flame_test_result: None,
            last_gas_test_result: None,
            completed_tests: 0,
            total_tests: config.total_tests(),
        }
    }

    /// Progress bar percentage. Not capped at 100.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        f64::from(self.completed_tests) / f64::from(self.total_tests) * 100.0
    }

    /// Look up a beaker by id.
    #[must_use]
    pub fn beaker(&self, id: &str) -> Option<&Beaker> {
        self.beakers.iter().find(|b| b.id() == id)
    }

    /// Look up a test strip by id.
    #[must_use]
    pub fn test_strip(&self, id: &str) -> Option<&TestStrip> {
        self.test_strips.iter().find(|s| s.id() == id)
    }

    /// Look up a metal salt by id.
    #[must_use]
    pub fn metal_salt(&self, id: &str) -> Option<&MetalSalt> {
        self.metal_salts.iter().find(|s| s.id() == id)
    }

    /// Look up a gas sample by id.
    #[must_use]
    pub fn gas_test(&self, id: &str) -> Option<&GasTest> {
        self.gas_tests.iter().find(|g| g.id() == id)
    }

    /// The item held in `category`, if any.
    #[must_use]
    pub fn held(&self, category: ItemCategory) -> Option<HeldItem> {
        match category {
            ItemCategory::TestStrip => self.selected_strip_id.clone().map(HeldItem::TestStrip),
            ItemCategory::TestTool => self.selected_test_tool.map(HeldItem::TestTool),
            ItemCategory::MetalSalt => self.selected_salt_id.clone().map(HeldItem::MetalSalt),
            ItemCategory::GasSample => self.selected_gas_id.clone().map(HeldItem::GasSample),
        }
    }

    /// Whether `item` is the one currently held in its category.
    #[must_use]
    pub fn holds(&self, item: &HeldItem) -> bool {
        self.held(item.category()).as_ref() == Some(item)
    }

    fn clear_transient(&mut self) {
        self.selected_strip_id = None;
        self.selected_test_tool = None;
        self.selected_salt_id = None;
        self.selected_gas_id = None;
        self.bunsen_burner_on = false;
        self.wire_loop_selected = false;
        self.last_test_result = None;
        self.last_flame_test_result = None;
        self.last_gas_test_result = None;
        self.completed_tests = 0;
    }
}

/// Handle returned by [`LabStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&LabState) + Send>;

/// Owner of the lab state and the only way to mutate it.
///
/// ## Example
///
/// ```rust
/// use chemlab::lab::{ActionOutcome, LabStore};
///
/// let mut lab = LabStore::new();
/// assert_eq!(lab.test_strip_in_liquid("strip-1", "beaker-2"), ActionOutcome::Applied);
///
/// let result = lab.state().last_test_result.as_ref().unwrap();
/// assert_eq!(result.solution_name(), "Distilled Water");
/// assert_eq!(lab.state().completed_tests, 1);
/// ```
pub struct LabStore {
    config: LabConfig,
    state: LabState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for LabStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabStore")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for LabStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LabStore {
    /// Create a store with the built-in catalogs and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LabConfig::default())
    }

    /// Create a store from a validated configuration.
    #[must_use]
    pub fn with_config(config: LabConfig) -> Self {
        let state = LabState::initial(&config, config.initial_experiment());
        Self {
            config,
            state,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn state(&self) -> &LabState {
        &self.state
    }

    /// Configuration the store was built with.
    #[must_use]
    pub const fn config(&self) -> &LabConfig {
        &self.config
    }

    /// Progress bar percentage. Not capped at 100.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.state.progress_percent()
    }

    /// Register a listener called with the new state after every applied action.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&LabState) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Apply any action through a single entry point.
    pub fn dispatch(&mut self, action: LabAction) -> ActionOutcome {
        match action {
            LabAction::Initialize => self.initialize(),
            LabAction::Grab { item } => self.grab(item),
            LabAction::Release { category } => self.release(category),
            LabAction::TestStripInLiquid {
                strip_id,
                beaker_id,
            } => self.test_strip_in_liquid(&strip_id, &beaker_id),
            LabAction::PerformFlameTest { salt_id } => self.perform_flame_test(&salt_id),
            LabAction::PerformGasTest { gas_id, tool } => self.perform_gas_test(&gas_id, tool),
            LabAction::ToggleBunsenBurner => self.toggle_bunsen_burner(),
            LabAction::SelectWireLoop => self.select_wire_loop(),
            LabAction::ReleaseWireLoop => self.release_wire_loop(),
            LabAction::SwitchExperiment { experiment } => self.switch_experiment(experiment),
            LabAction::ResetLab => self.reset_lab(),
        }
    }

    /// Reload catalogs from the fixtures and clear selections, results and
    /// progress. The active experiment is kept.
    pub fn initialize(&mut self) -> ActionOutcome {
        self.state = LabState::initial(&self.config, self.state.experiment);
        info!(experiment = %self.state.experiment, "Lab initialized");
        self.commit("initialize", Ok(()))
    }

    /// Full reset; identical to [`LabStore::initialize`].
    pub fn reset_lab(&mut self) -> ActionOutcome {
        self.initialize()
    }

    /// Pick up an item. Ignored if anything of the same category is already
    /// held, if the id is not in the catalog, or (for salts) if the wire
    /// loop is not in hand.
    pub fn grab(&mut self, item: HeldItem) -> ActionOutcome {
        let result = self.try_grab(item);
        self.commit("grab", result)
    }

    fn try_grab(&mut self, item: HeldItem) -> Result<(), Rejection> {
        let category = item.category();
        if let Some(current) = self.state.held(category) {
            return Err(Rejection::precondition(format!(
                "already holding {category} {current}"
            )));
        }

        match item {
            HeldItem::TestStrip(id) => {
                self.state.test_strip(&id).ok_or_else(|| Rejection::unknown(&id))?;
                self.state.selected_strip_id = Some(id);
            }
            HeldItem::TestTool(tool) => {
                self.state.selected_test_tool = Some(tool);
            }
            HeldItem::MetalSalt(id) => {
                if !self.state.wire_loop_selected {
                    return Err(Rejection::precondition(
                        "a salt can only be picked up on the wire loop",
                    ));
                }
                self.state.metal_salt(&id).ok_or_else(|| Rejection::unknown(&id))?;
                self.state.selected_salt_id = Some(id);
            }
            HeldItem::GasSample(id) => {
                self.state.gas_test(&id).ok_or_else(|| Rejection::unknown(&id))?;
                self.state.selected_gas_id = Some(id);
            }
        }
        Ok(())
    }

    /// Put down whatever is held in `category`. Always applied.
    pub fn release(&mut self, category: ItemCategory) -> ActionOutcome {
        match category {
            ItemCategory::TestStrip => self.state.selected_strip_id = None,
            ItemCategory::TestTool => self.state.selected_test_tool = None,
            ItemCategory::MetalSalt => self.state.selected_salt_id = None,
            ItemCategory::GasSample => self.state.selected_gas_id = None,
        }
        self.commit("release", Ok(()))
    }

    /// Dip a strip into a beaker: the strip takes the beaker's pH, a
    /// [`TestResult`] is recorded and the progress counter increments.
    pub fn test_strip_in_liquid(&mut self, strip_id: &str, beaker_id: &str) -> ActionOutcome {
        let result = self.try_test_strip_in_liquid(strip_id, beaker_id);
        self.commit("test_strip_in_liquid", result)
    }

    fn try_test_strip_in_liquid(
        &mut self,
        strip_id: &str,
        beaker_id: &str,
    ) -> Result<(), Rejection> {
        let beaker = self
            .state
            .beaker(beaker_id)
            .cloned()
            .ok_or_else(|| Rejection::unknown(beaker_id))?;
        let strip = self
            .state
            .test_strips
            .iter_mut()
            .find(|s| s.id() == strip_id)
            .ok_or_else(|| Rejection::unknown(strip_id))?;

        strip.record_reading(beaker.ph_value());
        let record = TestResult::new(strip_id, &beaker, self.config.now());
        info!(
            strip = strip_id,
            beaker = beaker_id,
            ph = beaker.ph_value(),
            classification = %record.classification(),
            "Test strip dipped"
        );
        self.state.last_test_result = Some(record);
        self.count_completed_test();
        Ok(())
    }

    /// Hold a salt in the flame. Needs the wire loop in hand and the
    /// burner lit.
    pub fn perform_flame_test(&mut self, salt_id: &str) -> ActionOutcome {
        let result = self.try_perform_flame_test(salt_id);
        self.commit("perform_flame_test", result)
    }

    fn try_perform_flame_test(&mut self, salt_id: &str) -> Result<(), Rejection> {
        if !self.state.wire_loop_selected {
            return Err(Rejection::precondition("wire loop not selected"));
        }
        if !self.state.bunsen_burner_on {
            return Err(Rejection::precondition("Bunsen burner is off"));
        }
        let salt = self
            .state
            .metal_salt(salt_id)
            .ok_or_else(|| Rejection::unknown(salt_id))?;

        let record = FlameTestResult::new(salt, self.config.now());
        info!(
            salt = salt_id,
            flame = record.flame_color_name(),
            "Flame test performed"
        );
        self.state.last_flame_test_result = Some(record);
        self.count_completed_test();
        Ok(())
    }

    /// Apply a tool to a gas sample. Counts toward progress whether or not
    /// the tool was the right one.
    pub fn perform_gas_test(&mut self, gas_id: &str, tool: TestTool) -> ActionOutcome {
        let result = self.try_perform_gas_test(gas_id, tool);
        self.commit("perform_gas_test", result)
    }

    fn try_perform_gas_test(&mut self, gas_id: &str, tool: TestTool) -> Result<(), Rejection> {
        let gas = self
            .state
            .gas_test(gas_id)
            .ok_or_else(|| Rejection::unknown(gas_id))?;

        let record = GasTestResult::new(gas, tool, self.config.now());
        info!(
            gas = gas_id,
            tool = %tool,
            correct = record.correct(),
            "Gas test performed"
        );
        self.state.last_gas_test_result = Some(record);
        self.count_completed_test();
        Ok(())
    }

    /// Turn the Bunsen burner on or off.
    pub fn toggle_bunsen_burner(&mut self) -> ActionOutcome {
        self.state.bunsen_burner_on = !self.state.bunsen_burner_on;
        debug!(on = self.state.bunsen_burner_on, "Bunsen burner toggled");
        self.commit("toggle_bunsen_burner", Ok(()))
    }

    /// Pick up the wire loop.
    pub fn select_wire_loop(&mut self) -> ActionOutcome {
        self.state.wire_loop_selected = true;
        self.commit("select_wire_loop", Ok(()))
    }

    /// Put down the wire loop, dropping any salt on it.
    pub fn release_wire_loop(&mut self) -> ActionOutcome {
        self.state.wire_loop_selected = false;
        self.state.selected_salt_id = None;
        self.commit("release_wire_loop", Ok(()))
    }

    /// Activate another experiment. Clears held items, burner, wire loop,
    /// results and progress; catalogs (including strip readings) are kept.
    pub fn switch_experiment(&mut self, experiment: ExperimentKind) -> ActionOutcome {
        let previous = self.state.experiment;
        self.state.experiment = experiment;
        self.state.clear_transient();
        info!(from = %previous, to = %experiment, "Experiment switched");
        self.commit("switch_experiment", Ok(()))
    }

    fn count_completed_test(&mut self) {
        self.state.completed_tests += 1;
        debug!(
            completed = self.state.completed_tests,
            total = self.state.total_tests,
            progress = self.state.progress_percent(),
            "Progress updated"
        );
    }

    fn commit(&mut self, action: &'static str, result: Result<(), Rejection>) -> ActionOutcome {
        match &result {
            Ok(()) => {
                for (_, listener) in &mut self.listeners {
                    listener(&self.state);
                }
            }
            Err(rejection) => debug!(action, %rejection, "Lab action ignored"),
        }
        result.into()
    }
}

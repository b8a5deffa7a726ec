//! Interaction Store integration tests
//!
//! Exercises the store only through its public API: direct mutators,
//! `dispatch` with JSON-decoded actions, and subscriptions.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chemlab::chemistry::{ph_to_color, PhClass};
use chemlab::lab::{
    ActionOutcome, Beaker, ExperimentKind, Fixtures, HeldItem, ItemCategory, LabAction,
    LabConfig, LabStore, TestStrip, TestTool,
};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::NamedTempFile;

fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 14, 9, 26, 53).unwrap()
}

fn fixed_lab() -> LabStore {
    LabStore::with_config(LabConfig::builder().clock(fixed_clock).build().unwrap())
}

// =============================================================================
// Held items
// =============================================================================

#[test]
fn test_grab_while_held_keeps_first_item() {
    let mut lab = LabStore::new();
    assert!(lab.grab(HeldItem::GasSample("gas-1".into())).is_applied());

    let outcome = lab.grab(HeldItem::GasSample("gas-3".into()));
    assert!(matches!(outcome, ActionOutcome::IgnoredPreconditionNotMet(_)));
    assert_eq!(lab.state().selected_gas_id.as_deref(), Some("gas-1"));

    // Re-grabbing the same item is also a no-op
    let again = lab.grab(HeldItem::GasSample("gas-1".into()));
    assert!(!again.is_applied());
}

#[test]
fn test_release_when_empty_is_applied() {
    let mut lab = LabStore::new();
    assert!(lab.release(ItemCategory::TestTool).is_applied());
    assert!(lab.state().selected_test_tool.is_none());
}

#[test]
fn test_release_wire_loop_drops_salt() {
    let mut lab = LabStore::new();
    let _ = lab.select_wire_loop();
    let _ = lab.grab(HeldItem::MetalSalt("salt-5".into()));
    assert_eq!(lab.state().selected_salt_id.as_deref(), Some("salt-5"));

    let _ = lab.release_wire_loop();
    assert!(!lab.state().wire_loop_selected);
    assert!(lab.state().selected_salt_id.is_none());
}

// =============================================================================
// pH strips
// =============================================================================

#[test]
fn test_strip_in_distilled_water() {
    let mut lab = fixed_lab();
    assert_eq!(
        lab.test_strip_in_liquid("strip-1", "beaker-2"),
        ActionOutcome::Applied
    );

    let state = lab.state();
    assert_eq!(state.test_strip("strip-1").unwrap().ph_value(), Some(7.0));
    let result = state.last_test_result.as_ref().unwrap();
    assert_eq!(result.solution_name(), "Distilled Water");
    assert_eq!(result.classification(), PhClass::Neutral);
    assert_eq!(result.timestamp(), fixed_clock());
    assert_eq!(state.completed_tests, 1);
}

#[test]
fn test_strip_in_unknown_beaker_changes_nothing() {
    let mut lab = LabStore::new();
    let before = lab.state().clone();

    assert_eq!(
        lab.test_strip_in_liquid("strip-1", "beaker-9"),
        ActionOutcome::IgnoredUnknownTarget("beaker-9".into())
    );
    assert_eq!(lab.state(), &before);
    assert!(lab.state().test_strip("strip-1").unwrap().is_unused());
}

#[test]
fn test_unknown_strip_is_unknown_target() {
    let mut lab = LabStore::new();
    assert_eq!(
        lab.test_strip_in_liquid("strip-77", "beaker-1"),
        ActionOutcome::IgnoredUnknownTarget("strip-77".into())
    );
    assert_eq!(lab.state().completed_tests, 0);
}

#[test]
fn test_progress_is_not_capped() {
    let mut lab = LabStore::with_config(LabConfig::builder().total_tests(2).build().unwrap());
    for _ in 0..3 {
        let _ = lab.test_strip_in_liquid("strip-1", "beaker-1");
    }
    assert_eq!(lab.state().completed_tests, 3);
    assert!((lab.progress_percent() - 150.0).abs() < 1e-9);
}

// =============================================================================
// Flame and gas tests
// =============================================================================

#[test]
fn test_flame_test_without_wire_loop_ignored_regardless_of_burner() {
    let mut lab = LabStore::new();
    for _ in 0..2 {
        let outcome = lab.perform_flame_test("salt-1");
        assert_eq!(
            outcome,
            ActionOutcome::IgnoredPreconditionNotMet("wire loop not selected".into())
        );
        assert!(lab.state().last_flame_test_result.is_none());
        let _ = lab.toggle_bunsen_burner();
    }
}

#[test]
fn test_flame_test_records_salt() {
    let mut lab = LabStore::new();
    let _ = lab.toggle_bunsen_burner();
    let _ = lab.select_wire_loop();
    assert!(lab.perform_flame_test("salt-2").is_applied());

    let result = lab.state().last_flame_test_result.as_ref().unwrap();
    assert_eq!(result.salt_name(), "Sodium Chloride");
    assert_eq!(result.flame_color_name(), "yellow-orange");
    assert_eq!(lab.state().completed_tests, 1);
}

#[test]
fn test_wrong_gas_tool() {
    let mut lab = LabStore::new();
    assert!(lab
        .perform_gas_test("gas-1", TestTool::GlowingSplint)
        .is_applied());

    let result = lab.state().last_gas_test_result.as_ref().unwrap();
    assert!(!result.correct());
    assert_eq!(result.result(), "No reaction");
    assert_eq!(lab.state().completed_tests, 1);
}

#[test]
fn test_right_gas_tool() {
    let mut lab = LabStore::new();
    let _ = lab.perform_gas_test("gas-3", TestTool::Limewater);
    let result = lab.state().last_gas_test_result.as_ref().unwrap();
    assert!(result.correct());
    assert_eq!(result.result(), "Limewater turns milky");
}

// =============================================================================
// Experiment switching and reset
// =============================================================================

#[test]
fn test_switch_experiment_clears_transient_state() {
    let mut lab = LabStore::new();
    let _ = lab.test_strip_in_liquid("strip-2", "beaker-4");
    let _ = lab.grab(HeldItem::TestStrip("strip-3".into()));
    let _ = lab.grab(HeldItem::TestTool(TestTool::DampLitmus));
    let _ = lab.toggle_bunsen_burner();
    let beakers = Arc::clone(&lab.state().beakers);

    assert!(lab.switch_experiment(ExperimentKind::FlameTests).is_applied());

    let state = lab.state();
    assert_eq!(state.experiment, ExperimentKind::FlameTests);
    assert!(state.selected_strip_id.is_none());
    assert!(state.selected_test_tool.is_none());
    assert!(!state.bunsen_burner_on);
    assert!(state.last_test_result.is_none());
    assert_eq!(state.completed_tests, 0);
    assert!(Arc::ptr_eq(&beakers, &state.beakers));
    // Strip readings survive a switch
    assert_eq!(state.test_strip("strip-2").unwrap().ph_value(), Some(2.5));
}

#[test]
fn test_reset_then_test_matches_fresh_lab() {
    let mut used = fixed_lab();
    let _ = used.test_strip_in_liquid("strip-1", "beaker-3");
    let _ = used.select_wire_loop();
    let _ = used.grab(HeldItem::MetalSalt("salt-4".into()));
    let _ = used.perform_gas_test("gas-2", TestTool::LitSplint);
    let _ = used.reset_lab();
    let _ = used.test_strip_in_liquid("strip-4", "beaker-5");

    let mut fresh = fixed_lab();
    let _ = fresh.initialize();
    let _ = fresh.test_strip_in_liquid("strip-4", "beaker-5");

    assert_eq!(used.state(), fresh.state());
}

#[test]
fn test_reset_keeps_selected_experiment() {
    let mut lab = LabStore::new();
    let _ = lab.switch_experiment(ExperimentKind::Decanting);
    let _ = lab.reset_lab();
    assert_eq!(lab.state().experiment, ExperimentKind::Decanting);
}

// =============================================================================
// Custom fixtures
// =============================================================================

fn vinegar_fixtures() -> Fixtures {
    Fixtures {
        beakers: vec![Beaker::new("beaker-v", "Vinegar", 2.9)],
        test_strips: vec![TestStrip::new("strip-v")],
        metal_salts: Vec::new(),
        gas_tests: Vec::new(),
    }
}

#[test]
fn test_custom_fixtures_survive_reset() {
    let config = LabConfig::builder()
        .fixtures(vinegar_fixtures())
        .build()
        .unwrap();
    let mut lab = LabStore::with_config(config);

    assert!(lab.test_strip_in_liquid("strip-v", "beaker-v").is_applied());
    assert_eq!(lab.state().test_strip("strip-v").unwrap().ph_value(), Some(2.9));
    assert_eq!(
        lab.test_strip_in_liquid("strip-v", "beaker-1"),
        ActionOutcome::IgnoredUnknownTarget("beaker-1".into())
    );

    let _ = lab.reset_lab();
    let state = lab.state();
    assert_eq!(state.beakers.len(), 1);
    assert_eq!(state.beaker("beaker-v").unwrap().solution_name(), "Vinegar");
    assert!(state.test_strip("strip-v").unwrap().is_unused());
    assert!(state.metal_salts.is_empty());
    assert_eq!(state.completed_tests, 0);
}

#[test]
fn test_fixtures_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    let json = serde_json::to_string(&vinegar_fixtures()).unwrap();
    write!(file, "{json}").unwrap();

    let loaded = Fixtures::load(file.path()).unwrap();
    assert_eq!(loaded, vinegar_fixtures());

    let config = LabConfig::builder().fixtures(loaded).build().unwrap();
    let lab = LabStore::with_config(config);
    assert!(lab.state().beaker("beaker-v").is_some());
    assert!(lab.state().gas_tests.is_empty());
}

// =============================================================================
// Dispatch and subscriptions
// =============================================================================

#[test]
fn test_dispatch_json_actions() {
    let mut lab = LabStore::new();
    let script = [
        r#"{"action":"toggleBunsenBurner"}"#,
        r#"{"action":"selectWireLoop"}"#,
        r#"{"action":"grab","item":{"metalSalt":"salt-3"}}"#,
        r#"{"action":"performFlameTest","saltId":"salt-3"}"#,
        r#"{"action":"switchExperiment","experiment":"Gas Tests"}"#,
        r#"{"action":"performGasTest","gasId":"gas-4","tool":"damp-litmus"}"#,
    ];

    for json in script {
        let action: LabAction = serde_json::from_str(json).unwrap();
        assert!(lab.dispatch(action).is_applied(), "{json}");
    }
    assert_eq!(lab.state().experiment, ExperimentKind::GasTests);
    assert!(lab.state().last_gas_test_result.as_ref().unwrap().correct());
    assert_eq!(lab.state().completed_tests, 1);
}

#[test]
fn test_listeners_see_applied_actions_only() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut lab = LabStore::new();
    let id = {
        let calls = Arc::clone(&calls);
        lab.subscribe(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    let _ = lab.toggle_bunsen_burner();
    let _ = lab.perform_flame_test("salt-1");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(lab.unsubscribe(id));
    let _ = lab.toggle_bunsen_burner();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!lab.unsubscribe(id));
}

#[test]
fn test_snapshot_serializes_camel_case() {
    let mut lab = LabStore::new();
    let _ = lab.test_strip_in_liquid("strip-5", "beaker-1");
    let json = serde_json::to_value(lab.state()).unwrap();

    assert_eq!(json["experiment"], "pH Testing");
    assert_eq!(json["completedTests"], 1);
    assert_eq!(json["totalTests"], 10);
    assert_eq!(json["lastTestResult"]["solutionName"], "Hydrochloric Acid");
    assert_eq!(json["beakers"][0]["phValue"], 1.0);
    assert_eq!(json["beakers"][0]["color"], ph_to_color(1.0).to_hex());
}

//! Lab Walkthrough Demo
//!
//! Run with: `RUST_LOG=chemlab=debug cargo run --example lab_walkthrough`
//!
//! Plays one session the way a student would: a pH reading, a flame test,
//! a wrong and a right gas guess, then an evaporation driven by the async
//! tick timer.

use std::sync::Arc;

use anyhow::Context;
use chemlab::experiments::{
    Evaporation, EvaporationTarget, ExperimentRun, FlameTarget, FlameTesting, GasTarget,
    GasTesting, PhTarget, PhTesting, Protocol,
};
use chemlab::lab::{ExperimentKind, LabConfig, LabStore, TestTool};
use chemlab::runtime::{spawn_timer, Workbench};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "chemlab=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== Chemlab Walkthrough ===\n");

    let config = LabConfig::builder()
        .total_tests(4)
        .build()
        .context("building lab config")?;
    let mut lab = LabStore::with_config(config);

    // 1. pH testing
    println!("1. pH Testing");
    let mut ph = ExperimentRun::<PhTesting>::new();
    let _ = ph.click(&mut lab, PhTarget::Strip("strip-1".into()));
    let _ = ph.click(&mut lab, PhTarget::Beaker("beaker-4".into()));
    report(&mut ph, &mut lab);

    // 2. Flame test
    println!("2. Flame Tests");
    let _ = lab.switch_experiment(ExperimentKind::FlameTests);
    let mut flame = ExperimentRun::<FlameTesting>::new();
    for target in [
        FlameTarget::BurnerKnob,
        FlameTarget::WireLoop,
        FlameTarget::Salt("salt-5".into()),
        FlameTarget::Flame,
    ] {
        let outcome = flame.click(&mut lab, target);
        anyhow::ensure!(outcome.is_applied(), "flame test click ignored: {outcome:?}");
    }
    report(&mut flame, &mut lab);

    // 3. Gas tests, wrong tool then right tool
    println!("3. Gas Tests");
    let _ = lab.switch_experiment(ExperimentKind::GasTests);
    for tool in [TestTool::Limewater, TestTool::LitSplint] {
        let mut gas = ExperimentRun::<GasTesting>::new();
        let _ = gas.click(&mut lab, GasTarget::Sample("gas-1".into()));
        let _ = gas.click(&mut lab, GasTarget::Tool(tool));
        report(&mut gas, &mut lab);
    }

    // 4. Evaporation on the async timer (eight one-second ticks)
    println!("4. Evaporation");
    let _ = lab.switch_experiment(ExperimentKind::Evaporation);
    let bench = Arc::new(Mutex::new(Workbench::<Evaporation>::new(lab)));
    {
        let mut bench = bench.lock().await;
        bench
            .run
            .set_on_complete(|text| println!("   callback: {text}"));
        let _ = bench.click(EvaporationTarget::Pour);
        let _ = bench.click(EvaporationTarget::Burner);
    }
    spawn_timer(Arc::clone(&bench)).join().await;

    let bench = bench.lock().await;
    println!(
        "   salt crystals: {}, progress: {:.0}%\n",
        bench.run.protocol().salt_crystals(),
        bench.lab.progress_percent()
    );

    println!("Walkthrough complete.");
    Ok(())
}

fn report<P: Protocol>(run: &mut ExperimentRun<P>, lab: &mut LabStore) {
    while run.stage().is_processing() {
        let _ = run.tick(lab);
    }
    println!(
        "   {}\n   progress: {:.0}%\n",
        run.stage().result_text().unwrap_or("(not finished)"),
        lab.progress_percent()
    );
}

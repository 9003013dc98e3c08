//! Native checks of the JS facade. Only paths that never touch a JS value
//! can run off-wasm; the rest is covered by `web.rs`.

use floatsim_engine::{EnginePhase, FloatSimulation};

#[test]
fn facade_builds_an_engine_from_json() {
    let sim = FloatSimulation::new(7.5, -0.2, r#"{"0": 0, "0.2": 0.06, "0.4": 0.12}"#.to_string())
        .unwrap();

    assert_eq!(sim.height(), -0.2);
    assert_eq!(sim.velocity(), Some(0.0));
    assert!(!sim.running());
    assert_eq!(sim.tick_count(), Some(0));

    let engine = sim.engine();
    let engine = engine.borrow();
    assert_eq!(engine.phase(), EnginePhase::Created);
    assert_eq!(engine.profile().samples().len(), 3);
    assert_eq!(engine.weight(), 7.5);
}

#[test]
fn facade_applies_physics_config() {
    let sim = FloatSimulation::with_config(
        2.0,
        0.0,
        r#"{"0": 0, "1": 1}"#.to_string(),
        r#"{"waterDensity": 1025, "startupDelayMs": 0}"#.to_string(),
    )
    .unwrap();

    let engine = sim.engine();
    let engine = engine.borrow();
    assert_eq!(engine.config().water_density, 1025.0);
    assert_eq!(engine.config().startup_delay_ms, 0.0);
    assert_eq!(engine.config().gravity, 9.81);
}

#[test]
fn facade_stats_before_first_tick() {
    let sim = FloatSimulation::new(1.0, 0.1, r#"{"0.5": 0.25}"#.to_string()).unwrap();
    let stats = sim.stats().unwrap();
    assert_eq!(stats.tick_count(), 0);
    assert_eq!(stats.height(), 0.1);
    assert_eq!(stats.net_force(), 0.0);
}

//! Live run of the tray-menu suite. Needs a Windows desktop session with
//! Sakura Editor resident in the tray and Appium with the Windows driver
//! installed. Run with `cargo test --test traymenu_tests -- --ignored`.

#![cfg(windows)]

use sakura_functests::cli::config::{AppConfig, load_config};
use sakura_functests::fixture::Fixture;
use sakura_functests::scenario::builtin::{show_about_dialog, show_common_prop, show_type_list};
use sakura_functests::scenario::runner::ScenarioRunner;
use sakura_functests::scenario::scenario_model::Scenario;

fn live_config() -> AppConfig {
    let mut config = load_config(None);
    config.apply_env(|k| std::env::var(k).ok());
    config
}

fn assert_scenario(fixture: &Fixture, scenario: &Scenario) {
    let result = ScenarioRunner::run(scenario, &fixture.harness);
    assert!(result.passed, "{}: {:?}", scenario.name, result);
}

#[test]
#[ignore = "drives the real desktop"]
fn tray_menu_suite() {
    let fixture = Fixture::start(&live_config()).expect("fixture starts");

    assert_scenario(&fixture, &show_type_list());
    assert_scenario(&fixture, &show_common_prop());
    assert_scenario(&fixture, &show_about_dialog());

    fixture.shutdown().expect("fixture shuts down");
}

//! Shipped configuration and scenario files

use option_pool::cli::{Scenario, Simulation};
use option_pool::config::Config;

const EXAMPLE: &str = include_str!("../../config.toml.example");
const DEMO: &str = include_str!("../../scenarios/demo.toml");

#[test]
fn test_config_example_loads() {
    let config: Config = toml::from_str(EXAMPLE).unwrap();
    assert_eq!(config.pool.treasury, "treasury");
    assert!(config.option_params().validate().is_ok());
    assert_eq!(config.calculator().unwrap().name(), "fixed");
}

#[test]
fn test_demo_scenario_runs() {
    let config: Config = toml::from_str(EXAMPLE).unwrap();
    let scenario: Scenario = toml::from_str(DEMO).unwrap();
    let mut simulation = Simulation::new(&config, scenario.start).unwrap();
    for step in &scenario.steps {
        assert!(simulation.apply(step), "step {step:?} rejected");
    }

    let report = simulation.report().unwrap();
    assert_eq!(report.positions, 2);
    assert_eq!(report.pool.locked, 0);
    assert_eq!(report.open_calls + report.open_puts, 0);
}

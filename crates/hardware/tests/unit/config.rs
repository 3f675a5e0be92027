//! Configuration Unit Tests.
//!
//! Verifies JSON loading with defaults, unit kind names, and the fatal
//! configuration checks made before the first cycle.

use pretty_assertions::assert_eq;
use tomsim_core::common::{ConfigError, SimError};
use tomsim_core::config::{Config, UnitConfig, UnitKind};
use tomsim_core::core::pipeline::reservation::StationKind;
use tomsim_core::isa::Opcode;
use tomsim_core::sim::Simulator;

#[test]
fn empty_json_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.pipeline.rob_size, 8);
    assert_eq!(config.pipeline.issue_width, 1);
    assert_eq!(config.memory.size, 1024);
    assert_eq!(config.general.program_capacity, 50);
    assert!(config.units.is_empty());
}

#[test]
fn partial_json_keeps_other_defaults() {
    let config = Config::from_json(
        r#"{
            "pipeline": { "rob_size": 4, "stations": { "load": 3 } },
            "units": [ { "kind": "Memory", "latency": 3 } ]
        }"#,
    )
    .unwrap();
    assert_eq!(config.pipeline.rob_size, 4);
    assert_eq!(config.pipeline.stations.load, 3);
    assert_eq!(config.pipeline.stations.integer, 2);
    assert_eq!(config.units, vec![UnitConfig::new(UnitKind::Memory, 3, 1)]);
}

#[test]
fn default_config_round_trips_through_json() {
    let config = Config::default().with_standard_units();
    let text = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json(&text).unwrap(), config);
}

#[test]
fn malformed_json_is_a_format_error() {
    assert!(matches!(
        Config::from_json("{ \"memory\": "),
        Err(SimError::ConfigFormat(_))
    ));
    assert!(matches!(
        Config::from_json(r#"{ "units": [ { "kind": "Shifter", "latency": 1 } ] }"#),
        Err(SimError::ConfigFormat(_))
    ));
}

#[test]
fn invalid_sizes_are_rejected() {
    assert!(matches!(
        Config::from_json(r#"{ "pipeline": { "issue_width": 0 } }"#),
        Err(SimError::Config(ConfigError::ZeroIssueWidth))
    ));
    assert!(matches!(
        Config::from_json(r#"{ "memory": { "size": 0 } }"#),
        Err(SimError::Config(ConfigError::ZeroMemory))
    ));
    assert!(matches!(
        Config::from_json(r#"{ "units": [ { "kind": "Integer", "latency": 1, "instances": 0 } ] }"#),
        Err(SimError::Config(ConfigError::ZeroInstances(UnitKind::Integer)))
    ));
}

#[test]
fn simulator_adds_configured_units() {
    let sim = Simulator::new(&Config::default().with_standard_units()).unwrap();
    assert_eq!(sim.units().units().len(), 5);
    assert_eq!(sim.units().address_units().len(), 5);
}

#[test]
fn missing_station_pool_is_fatal() {
    let mut config = Config::default().with_standard_units();
    config.pipeline.stations.mult = 0;
    let mut sim = Simulator::new(&config).unwrap();
    sim.load_program_str("MULT R1 R2 R3\nEOP").unwrap();
    match sim.run(0) {
        Err(SimError::Config(err)) => assert_eq!(
            err,
            ConfigError::MissingStation {
                kind: StationKind::Mult,
                opcode: Opcode::Mult
            }
        ),
        other => panic!("expected a missing station error, got {other:?}"),
    }
}

#[test]
fn unit_added_after_failure_allows_run() {
    let mut sim = Simulator::new(&Config::default()).unwrap();
    sim.load_program_str("ADDI R1 R0 2\nEOP").unwrap();
    assert!(sim.run(0).is_err());
    sim.init_exec_unit(UnitKind::Integer, 1, 1).unwrap();
    assert!(sim.run(0).is_ok());
    assert_eq!(sim.get_int_register(1).unwrap(), 2);
}

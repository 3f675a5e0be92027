//! Program Loader Tests.

use std::io::Write;

use tempfile::NamedTempFile;
use tomsim_core::common::SimError;
use tomsim_core::config::Config;
use tomsim_core::isa::Opcode;
use tomsim_core::sim::Simulator;
use tomsim_core::sim::loader::load_program_file;

fn listing(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(text.as_bytes()).expect("write listing");
    file
}

#[test]
fn loads_listing_at_base() {
    let file = listing("ADDI R1 R0 1\nEOP\n");
    let program = load_program_file(file.path(), 0x200, 16).expect("loads");
    assert_eq!(program.base(), 0x200);
    assert_eq!(program.fetch(0x200).expect("slot").opcode, Opcode::Addi);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_program_file(dir.path().join("absent.s"), 0, 16).expect_err("missing");
    assert!(matches!(err, SimError::Io(_)), "{err:?}");
}

#[test]
fn parse_errors_pass_through() {
    let file = listing("NOPE R1\n");
    let err = load_program_file(file.path(), 0, 16).expect_err("rejected");
    assert!(matches!(err, SimError::Parse(_)), "{err:?}");
}

#[test]
fn simulator_runs_loaded_file() {
    let file = listing("ADDI R1 R0 41\nADDI R1 R1 1\nEOP\n");
    let mut sim = Simulator::new(&Config::default().with_standard_units()).expect("builds");
    sim.load_program_file(file.path()).expect("loads");
    sim.run(0).expect("runs");
    assert_eq!(sim.get_int_register(1).expect("in range"), 42);
}

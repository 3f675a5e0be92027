//! Speculative Fault Tests.
//!
//! A malformed memory access is recorded on its ROB entry and only becomes an
//! error if the entry reaches commit.

use tomsim_core::common::{Reference, SimError, UNDEFINED};
use tomsim_core::config::Config;

use crate::common::harness::{CYCLE_BUDGET, TestContext};

#[test]
fn out_of_range_load_fails_at_commit() {
    let mut ctx = TestContext::new().program("LW R1 2000(R0)\nEOP");
    let err = ctx.sim.run(CYCLE_BUDGET).expect_err("load faults");
    assert!(
        matches!(
            err,
            SimError::InvalidReference(Reference::DataAddress { addr: 2000, len: 4 })
        ),
        "{err:?}"
    );
}

#[test]
fn wrong_path_fault_is_discarded() {
    let mut ctx = TestContext::new().program(
        "ADDI R1 R0 1
         BNEZ R1 SAFE
         LW R2 2000(R0)
         SAFE: ADDI R3 R0 9
         EOP",
    );
    ctx.run();
    assert_eq!(ctx.int(2), UNDEFINED);
    assert_eq!(ctx.int(3), 9);
}

#[test]
fn pc_leaving_the_table_is_fatal() {
    let mut config = Config::default().with_standard_units();
    config.general.program_capacity = 2;
    let mut ctx = TestContext::with_config(config).program("JUMP FAR\nFAR: ADDI R1 R0 1");
    let err = ctx.sim.run(CYCLE_BUDGET).expect_err("runs off the table");
    assert!(
        matches!(err, SimError::InvalidReference(Reference::ProgramCounter(8))),
        "{err:?}"
    );
}

//! Structural Stall Tests.
//!
//! Issue stops, in order, when the ROB or the matching station pool is full.

use pretty_assertions::assert_eq;
use tomsim_core::config::Config;

use crate::common::harness::TestContext;

#[test]
fn full_rob_blocks_issue() {
    let mut config = Config::default().with_standard_units();
    config.pipeline.rob_size = 2;
    let mut ctx = TestContext::with_config(config).program(
        "ADDI R1 R0 3
         MULT R2 R1 R1
         ADDI R3 R0 1
         ADDI R4 R0 2
         EOP",
    );

    for _ in 0..3 {
        ctx.sim.tick().expect("tick succeeds");
    }
    assert_eq!(ctx.sim.rob().len(), 2);
    assert_eq!(ctx.sim.pc(), 8);
    assert!(ctx.sim.stats().stalls_rob_full >= 1);

    ctx.run();
    assert_eq!(ctx.int(2), 9);
    assert_eq!(ctx.int(4), 2);
}

#[test]
fn full_station_pool_blocks_issue() {
    let mut config = Config::default().with_standard_units();
    config.pipeline.stations.mult = 1;
    let mut ctx = TestContext::with_config(config).program(
        "ADDI R1 R0 2
         MULT R2 R1 R1
         MULT R3 R2 R1
         EOP",
    );
    ctx.run();

    assert!(ctx.sim.stats().stalls_station_full >= 1);
    assert_eq!(ctx.int(3), 8);
}

#[test]
fn stall_does_not_skip_instructions() {
    let mut config = Config::default().with_standard_units();
    config.pipeline.rob_size = 1;
    let mut ctx = TestContext::with_config(config).program(
        "ADDI R1 R0 1
         ADDI R2 R1 1
         ADDI R3 R2 1
         EOP",
    );
    ctx.run();

    assert_eq!(ctx.int(3), 3);
    let pcs: Vec<u32> = ctx.sim.log().committed().map(|r| r.pc).collect();
    assert_eq!(pcs, vec![0, 4, 8]);
}

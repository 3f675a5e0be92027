//! End-to-End Pipeline Scenarios.
//!
//! Small programs run to completion, checking architectural results and the
//! per-stage timing the log records.

use pretty_assertions::assert_eq;
use tomsim_core::common::UNDEFINED;
use tomsim_core::core::pipeline::rob::Timing;
use tomsim_core::isa::Opcode;

use crate::common::harness::TestContext;

// ══════════════════════════════════════════════════════════
// 1. Straight-line integer code
// ══════════════════════════════════════════════════════════

#[test]
fn dependent_add_waits_for_both_producers() {
    let mut ctx = TestContext::integer_only().program(
        "ADDI R1 R0 5
         ADDI R2 R0 10
         ADD R3 R1 R2
         EOP",
    );
    ctx.run();

    assert_eq!(ctx.int(1), 5);
    assert_eq!(ctx.int(2), 10);
    assert_eq!(ctx.int(3), 15);
    assert_eq!(ctx.sim.instructions_executed(), 3);
    assert_eq!(ctx.sim.clock_cycles(), 8);
    assert!(ctx.all_tags_clear());

    let add = ctx
        .sim
        .log()
        .committed()
        .find(|r| r.inst.opcode == Opcode::Add)
        .copied()
        .expect("ADD committed");
    assert_eq!(
        add.timing,
        Timing {
            issue: Some(3),
            execute: Some(5),
            write_result: Some(6),
            commit: Some(7),
        }
    );
}

#[test]
fn stage_timestamps_never_go_backwards() {
    let mut ctx = TestContext::new().program(
        "ADDI R1 R0 6
         MULT R2 R1 R1
         SUB R3 R2 R1
         XOR R4 R3 R1
         AND R5 R4 R2
         EOP",
    );
    ctx.run();

    assert_eq!(ctx.int(2), 36);
    assert_eq!(ctx.int(3), 30);
    assert_eq!(ctx.int(4), 30 ^ 6);
    assert_eq!(ctx.int(5), (30 ^ 6) & 36);

    for record in ctx.sim.log().committed() {
        let t = record.timing;
        let stages = [t.issue, t.execute, t.write_result, t.commit];
        assert!(stages.iter().all(Option::is_some), "{record:?}");
        assert!(stages.windows(2).all(|w| w[0] < w[1]), "{record:?}");
    }
}

#[test]
fn writes_to_r0_are_discarded() {
    let mut ctx = TestContext::integer_only().program("ADDI R0 R0 9\nADD R1 R0 R0\nEOP");
    ctx.run();
    assert_eq!(ctx.int(0), 0);
    assert_eq!(ctx.int(1), 0);
}

#[test]
fn unwritten_registers_stay_undefined() {
    let mut ctx = TestContext::integer_only().program("ADDI R1 R0 1\nEOP");
    ctx.run();
    assert_eq!(ctx.int(7), UNDEFINED);
}

#[test]
fn unsigned_divide() {
    let mut ctx = TestContext::new().program(
        "ADDI R1 R0 100
         ADDI R2 R0 7
         DIV R3 R1 R2
         DIV R4 R1 R0
         EOP",
    );
    ctx.run();
    assert_eq!(ctx.int(3), 14);
    assert_eq!(ctx.int(4), u32::MAX);
}

// ══════════════════════════════════════════════════════════
// 2. Memory
// ══════════════════════════════════════════════════════════

#[test]
fn load_reads_poked_word() {
    let mut ctx = TestContext::new().program("LW R1 0(R0)\nEOP").poke(0, 42);
    ctx.run();
    assert_eq!(ctx.int(1), 42);
    assert_eq!(ctx.sim.stats().inst_load, 1);
}

#[test]
fn store_reaches_memory_only_at_commit() {
    let mut ctx = TestContext::new().program("ADDI R1 R0 77\nSW R1 40(R0)\nEOP");
    let before = ctx.sim.read_memory_u32(40).expect("in range");

    ctx.tick_until(|sim| sim.rob().iter().any(|(_, e)| e.ready && e.inst.opcode == Opcode::Sw));
    assert_eq!(ctx.sim.read_memory_u32(40).expect("in range"), before);

    ctx.run();
    assert_eq!(ctx.sim.read_memory_u32(40).expect("in range"), 77);
    assert_eq!(ctx.sim.stats().inst_store, 1);
}

// ══════════════════════════════════════════════════════════
// 3. Control flow
// ══════════════════════════════════════════════════════════

#[test]
fn counted_loop() {
    let mut ctx = TestContext::integer_only().program(
        "ADDI R1 R0 3
         LOOP: SUBI R1 R1 1
         BNEZ R1 LOOP
         EOP",
    );
    ctx.run();

    assert_eq!(ctx.int(1), 0);
    assert_eq!(ctx.sim.stats().branch_mispredictions, 2);
    assert_eq!(ctx.sim.stats().inst_branch, 3);
    assert_eq!(ctx.sim.instructions_executed(), 7);
}

#[test]
fn jump_skips_instructions() {
    let mut ctx = TestContext::integer_only().program(
        "JUMP OVER
         ADDI R1 R0 1
         OVER: ADDI R2 R0 2
         EOP",
    );
    ctx.run();
    assert_eq!(ctx.int(1), UNDEFINED);
    assert_eq!(ctx.int(2), 2);
    assert_eq!(ctx.sim.stats().branch_mispredictions, 1);
}

#[test]
fn fall_through_branch_is_not_a_misprediction() {
    let mut ctx = TestContext::integer_only().program(
        "BNEZ R0 AWAY
         ADDI R1 R0 1
         AWAY: EOP",
    );
    ctx.run();
    assert_eq!(ctx.int(1), 1);
    assert_eq!(ctx.sim.stats().branch_mispredictions, 0);
}

#[test]
fn wider_issue_finishes_sooner() {
    let text = "ADDI R1 R0 1
                ADDI R2 R0 2
                ADDI R3 R0 3
                ADDI R4 R0 4
                EOP";
    let mut narrow = TestContext::new().program(text);
    narrow.run();

    let mut config = tomsim_core::config::Config::default().with_standard_units();
    config.units[0].instances = 2;
    config.pipeline.issue_width = 2;
    config.pipeline.stations.integer = 4;
    let mut wide = TestContext::with_config(config).program(text);
    wide.run();

    assert_eq!(wide.int(4), 4);
    assert!(wide.sim.clock_cycles() < narrow.sim.clock_cycles());
}

//! Misprediction Squash Tests.
//!
//! Issue always follows the fall-through path, so a taken branch or a jump
//! flushes every younger instruction when it reaches the ROB head.

use pretty_assertions::assert_eq;
use tomsim_core::common::UNDEFINED;

use crate::common::harness::TestContext;

const TAKEN_BRANCH: &str = "ADDI R1 R0 1
                            BNEZ R1 TARGET
                            ADDI R2 R0 5
                            ADDI R3 R0 6
                            TARGET: ADDI R4 R0 7
                            EOP";

#[test]
fn squash_empties_the_pipeline() {
    let mut ctx = TestContext::integer_only().program(TAKEN_BRANCH);
    ctx.tick_until(|sim| sim.stats().branch_mispredictions == 1);

    let sim = &ctx.sim;
    assert!(sim.rob().is_empty());
    assert_eq!(sim.stations().occupied().count(), 0);
    assert!(sim.units().is_idle());
    assert!(ctx.all_tags_clear());
    assert_eq!(sim.pc(), 16);
    assert!(!sim.cpu().squash_pending);
}

#[test]
fn squashed_instructions_are_logged_not_committed() {
    let mut ctx = TestContext::integer_only().program(TAKEN_BRANCH);
    ctx.run();

    assert_eq!(ctx.int(4), 7);
    assert_eq!(ctx.int(2), UNDEFINED);
    assert_eq!(ctx.int(3), UNDEFINED);

    let log = ctx.sim.log();
    assert!(log.records().iter().any(|r| r.squashed));
    assert!(log.records().iter().filter(|r| r.squashed).all(|r| r.timing.commit.is_none()));
    let committed: Vec<u32> = log.committed().map(|r| r.pc).collect();
    assert_eq!(committed, vec![0, 4, 16]);
}

#[test]
fn nothing_issues_in_the_squash_cycle() {
    let mut ctx = TestContext::integer_only().program(TAKEN_BRANCH);
    ctx.tick_until(|sim| sim.stats().branch_mispredictions == 1);
    assert!(ctx.sim.rob().is_empty());

    ctx.sim.tick().expect("tick succeeds");
    let (_, head) = ctx.sim.rob().head().expect("target issued");
    assert_eq!(head.pc, 16);
}

#[test]
fn older_results_survive_the_flush() {
    let mut ctx = TestContext::new().program(
        "ADDI R1 R0 3
         MULT R5 R1 R1
         JUMP END
         ADDI R5 R0 0
         END: EOP",
    );
    ctx.run();
    assert_eq!(ctx.int(5), 9);
}

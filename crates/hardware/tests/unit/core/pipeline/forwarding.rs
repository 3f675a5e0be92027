//! Store-to-Load Forwarding and Memory Ordering Tests.

use pretty_assertions::assert_eq;

use crate::common::harness::TestContext;

#[test]
fn load_takes_value_from_older_store() {
    let mut ctx = TestContext::new().program(
        "ADDI R1 R0 7
         SW R1 16(R0)
         LW R2 16(R0)
         EOP",
    );
    ctx.run();

    assert_eq!(ctx.int(2), 7);
    assert_eq!(ctx.sim.read_memory_u32(16).expect("in range"), 7);
    assert_eq!(ctx.sim.stats().forwarded_loads, 1);
}

#[test]
fn load_waits_for_unknown_store_address() {
    let mut ctx = TestContext::new()
        .program(
            "ADDI R1 R0 64
             DIV R2 R1 R1
             SW R1 0(R2)
             LW R3 32(R0)
             EOP",
        )
        .poke(32, 99);
    ctx.run();

    assert!(ctx.sim.stats().stalls_memory_order > 0);
    assert_eq!(ctx.int(3), 99);
    assert_eq!(ctx.sim.read_memory_u32(1).expect("in range"), 64);
    assert_eq!(ctx.sim.stats().forwarded_loads, 0);
}

#[test]
fn youngest_matching_store_wins() {
    let mut ctx = TestContext::new().program(
        "ADDI R1 R0 1
         ADDI R2 R0 2
         SW R1 8(R0)
         SW R2 8(R0)
         LW R3 8(R0)
         EOP",
    );
    ctx.run();
    assert_eq!(ctx.int(3), 2);
    assert_eq!(ctx.sim.read_memory_u32(8).expect("in range"), 2);
}

#[test]
fn disjoint_store_does_not_forward() {
    let mut ctx = TestContext::new()
        .program(
            "ADDI R1 R0 5
             SW R1 0(R0)
             LW R2 4(R0)
             EOP",
        )
        .poke(4, 11);
    ctx.run();
    assert_eq!(ctx.int(2), 11);
    assert_eq!(ctx.sim.stats().forwarded_loads, 0);
}

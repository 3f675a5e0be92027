//! Floating-Point Pipeline Tests.

use pretty_assertions::assert_eq;

use crate::common::harness::TestContext;

#[test]
fn fp_add_reads_host_registers() {
    let mut ctx = TestContext::new().program("ADDS F3 F1 F2\nEOP");
    ctx.sim.set_fp_register(1, 1.5).expect("in range");
    ctx.sim.set_fp_register(2, 2.25).expect("in range");
    ctx.run();

    assert_eq!(ctx.fp(3), 3.75);
    assert_eq!(ctx.sim.stats().inst_fp, 1);
}

#[test]
fn fp_chain_through_memory() {
    let mut ctx = TestContext::new()
        .program(
            "LWS F1 0(R0)
             MULTS F2 F1 F1
             SUBS F3 F2 F1
             SWS F3 8(R0)
             EOP",
        )
        .poke(0, 2.5f32.to_bits());
    ctx.run();

    assert_eq!(ctx.fp(2), 6.25);
    assert_eq!(ctx.fp(3), 3.75);
    assert_eq!(
        ctx.sim.read_memory_u32(8).expect("in range"),
        3.75f32.to_bits()
    );
}

#[test]
fn fp_divide() {
    let mut ctx = TestContext::new().program("DIVS F3 F1 F2\nEOP");
    ctx.sim.set_fp_register(1, 7.0).expect("in range");
    ctx.sim.set_fp_register(2, 2.0).expect("in range");
    ctx.run();
    assert_eq!(ctx.fp(3), 3.5);
}

//! Statistics Tests.

use pretty_assertions::assert_eq;
use tomsim_core::stats::SimStats;

use crate::common::harness::TestContext;

#[test]
fn instruction_mix_by_class() {
    let mut ctx = TestContext::new()
        .program(
            "LW R1 0(R0)
             ADDI R2 R1 1
             SW R2 4(R0)
             LWS F1 8(R0)
             ADDS F2 F1 F1
             BEQZ R0 END
             END: EOP",
        )
        .poke(0, 1)
        .poke(8, 1.0f32.to_bits());
    ctx.run();

    let stats = ctx.sim.stats().clone();
    assert_eq!(
        stats,
        SimStats {
            cycles: stats.cycles,
            instructions_executed: 6,
            inst_int: 1,
            inst_fp: 1,
            inst_load: 2,
            inst_store: 1,
            inst_branch: 1,
            branch_mispredictions: 0,
            forwarded_loads: 0,
            stalls_memory_order: stats.stalls_memory_order,
            stalls_rob_full: stats.stalls_rob_full,
            stalls_station_full: stats.stalls_station_full,
        }
    );
    assert_eq!(stats.cycles, ctx.sim.clock_cycles());
}

#[test]
fn stats_serialize_as_json() {
    let mut ctx = TestContext::integer_only().program("ADDI R1 R0 1\nEOP");
    ctx.run();
    let json = serde_json::to_value(ctx.sim.stats()).expect("serializes");
    assert_eq!(json["instructions_executed"], 1);
    assert_eq!(json["inst_int"], 1);
}

#[test]
fn rendered_report_lists_counters() {
    let mut ctx = TestContext::integer_only().program("ADDI R1 R0 1\nEOP");
    ctx.run();
    let text = ctx.sim.stats().render_sections(&[]);
    assert!(text.contains("sim_insts                1"), "{text}");
    assert!(text.contains("CONTROL FLOW"));
}

//! Property Tests: out-of-order execution matches sequential execution.
//!
//! Random straight-line integer programs run on randomly sized machines. The
//! final register file must equal a simple in-order interpreter's, and the
//! renaming and ROB invariants must hold after every cycle.

use proptest::prelude::*;
use tomsim_core::common::UNDEFINED;
use tomsim_core::config::{Config, UnitConfig, UnitKind};
use tomsim_core::isa::{Instruction, Opcode, Program};

use crate::common::harness::{CYCLE_BUDGET, TestContext};

const REGS: usize = 8;

fn instruction() -> impl Strategy<Value = Instruction> {
    (0..5usize, 0..REGS, 0..REGS, 0..REGS, -64..64i32).prop_map(|(op, dest, s1, s2, imm)| {
        match op {
            0 => Instruction::reg_imm(Opcode::Addi, dest, s1, imm),
            1 => Instruction::reg(Opcode::Add, dest, s1, s2),
            2 => Instruction::reg(Opcode::Sub, dest, s1, s2),
            3 => Instruction::reg(Opcode::Xor, dest, s1, s2),
            _ => Instruction::reg(Opcode::And, dest, s1, s2),
        }
    })
}

prop_compose! {
    fn machine()(
        rob_size in 2..=8usize,
        issue_width in 1..=3usize,
        stations in 1..=4usize,
        latency in 1..=3u32,
        instances in 1..=2usize,
    ) -> Config {
        let mut config = Config::default();
        config.pipeline.rob_size = rob_size;
        config.pipeline.issue_width = issue_width;
        config.pipeline.stations.integer = stations;
        config.units = vec![UnitConfig::new(UnitKind::Integer, latency, instances)];
        config
    }
}

/// In-order reference: registers start undefined and `R0` reads zero.
fn interpret(program: &[Instruction]) -> [u32; REGS] {
    let mut regs = [UNDEFINED; REGS];
    regs[0] = 0;
    for inst in program {
        let a = regs[inst.src1];
        let b = regs[inst.src2];
        let value = match inst.opcode {
            Opcode::Addi => a.wrapping_add(inst.imm as u32),
            Opcode::Add => a.wrapping_add(b),
            Opcode::Sub => a.wrapping_sub(b),
            Opcode::Xor => a ^ b,
            _ => a & b,
        };
        if inst.dest != 0 {
            regs[inst.dest] = value;
        }
    }
    regs
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn matches_sequential_execution(
        body in prop::collection::vec(instruction(), 1..24),
        config in machine(),
    ) {
        let expected = interpret(&body);

        let mut instructions = body.clone();
        instructions.push(Instruction::eop());
        let capacity = config.general.program_capacity;
        let program = Program::new(0, capacity, instructions).expect("fits");

        let mut ctx = TestContext::with_config(config);
        ctx.sim.load_program(program);

        let mut cycles = 0;
        while !ctx.sim.cpu().is_finished() {
            prop_assert!(cycles < CYCLE_BUDGET, "did not finish");
            ctx.sim.tick().expect("tick succeeds");
            cycles += 1;

            let rob = ctx.sim.rob();
            prop_assert!(rob.len() <= rob.capacity());
            for r in 0..REGS {
                if let Some(tag) = ctx.sim.get_int_register_tag(r).expect("in range") {
                    prop_assert!(rob.is_valid(tag), "R{} names a free slot", r);
                }
            }
        }

        for (r, want) in expected.iter().enumerate() {
            prop_assert_eq!(ctx.int(r), *want, "R{}", r);
        }
        prop_assert!(ctx.all_tags_clear());

        let pcs: Vec<u32> = ctx.sim.log().committed().map(|rec| rec.pc).collect();
        prop_assert_eq!(pcs.len(), body.len());
        prop_assert!(pcs.windows(2).all(|w| w[0] < w[1]));
    }
}

//! Instruction Table Tests.

use tomsim_core::common::Reference;
use tomsim_core::isa::asm::parse_program;
use tomsim_core::isa::{Opcode, Program};

#[test]
fn unfilled_slots_hold_the_sentinel() {
    let program = parse_program("ADDI R1 R0 1", 0, 4).expect("parses");
    assert_eq!(program.len(), 1);
    assert_eq!(program.fetch(12).expect("in table").opcode, Opcode::Eop);
}

#[test]
fn pc_outside_table_is_rejected() {
    let program = Program::empty(0x40, 2);
    assert!(program.is_valid_pc(0x44));
    assert!(!program.is_valid_pc(0x48));
    assert!(!program.is_valid_pc(0x3C));
    assert_eq!(program.fetch(0x42), Err(Reference::ProgramCounter(0x42)));
}

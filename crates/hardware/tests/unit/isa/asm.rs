//! Assembly Parser Tests.
//!
//! Covers operand forms, label resolution, comments, and every parse error
//! the loader reports.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tomsim_core::common::ParseError;
use tomsim_core::isa::asm::parse_program;
use tomsim_core::isa::{Instruction, Opcode};

fn parse(text: &str) -> Vec<Instruction> {
    parse_program(text, 0, 64)
        .expect("program parses")
        .iter()
        .map(|(_, inst)| *inst)
        .collect()
}

fn parse_err(text: &str) -> ParseError {
    parse_program(text, 0, 64).expect_err("program is rejected")
}

// ══════════════════════════════════════════════════════════
// 1. Operand forms
// ══════════════════════════════════════════════════════════

#[test]
fn register_register_operands() {
    assert_eq!(
        parse("ADD R3 R1 R2"),
        vec![Instruction::reg(Opcode::Add, 3, 1, 2)]
    );
}

#[test]
fn commas_separate_operands() {
    assert_eq!(parse("SUB R3, R1, R2"), parse("SUB R3 R1 R2"));
}

#[rstest]
#[case("ADDI R1 R0 5", 5)]
#[case("ADDI R1 R0 -5", -5)]
#[case("ADDI R1 R0 0x10", 16)]
#[case("ADDI R1 R0 0xFFFFFFFF", -1)]
fn immediate_forms(#[case] text: &str, #[case] imm: i32) {
    assert_eq!(parse(text)[0], Instruction::reg_imm(Opcode::Addi, 1, 0, imm));
}

#[test]
fn load_and_store_operands() {
    let program = parse("LW R3 20(R2)\nSW R4 -8(R5)\nLWS F1 (R2)\nSWS F2 4(R0)");
    assert_eq!(program[0], Instruction::load(Opcode::Lw, 3, 20, 2));
    assert_eq!(program[1], Instruction::store(Opcode::Sw, 4, -8, 5));
    assert_eq!(program[2], Instruction::load(Opcode::Lws, 1, 0, 2));
    assert_eq!(program[3], Instruction::store(Opcode::Sws, 2, 4, 0));
}

#[test]
fn fp_alu_takes_fp_registers() {
    assert_eq!(
        parse("MULTS F3 F1 F2"),
        vec![Instruction::reg(Opcode::Mults, 3, 1, 2)]
    );
}

#[test]
fn mnemonics_are_case_insensitive() {
    assert_eq!(parse("addi r1 r0 1"), parse("ADDI R1 R0 1"));
}

// ══════════════════════════════════════════════════════════
// 2. Labels and comments
// ══════════════════════════════════════════════════════════

#[test]
fn backward_branch_offset() {
    let program = parse("ADDI R1 R0 3\nLOOP: SUBI R1 R1 1\nBNEZ R1 LOOP\nEOP");
    assert_eq!(program[2].opcode, Opcode::Bnez);
    assert_eq!(program[2].imm, -8);
}

#[test]
fn forward_jump_offset() {
    let program = parse("JUMP END\nADDI R1 R0 1\nADDI R2 R0 2\nEND: EOP");
    assert_eq!(program[0], Instruction::jump(8));
}

#[test]
fn label_on_its_own_line_names_next_instruction() {
    let program = parse("BEQZ R0 DONE\nADDI R1 R0 1\nDONE:\nEOP");
    assert_eq!(program[0].imm, 4);
    assert_eq!(program.len(), 3);
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let text = "# header\n\nADDI R1 R0 1 ; trailing\n   \nEOP # done\n";
    assert_eq!(
        parse(text),
        vec![Instruction::reg_imm(Opcode::Addi, 1, 0, 1), Instruction::eop()]
    );
}

#[test]
fn program_base_offsets_addresses() {
    let program = parse_program("ADDI R1 R0 1\nEOP", 0x100, 8).expect("parses");
    let pcs: Vec<u32> = program.iter().map(|(pc, _)| pc).collect();
    assert_eq!(pcs, vec![0x100, 0x104]);
    assert_eq!(program.capacity(), 8);
}

// ══════════════════════════════════════════════════════════
// 3. Errors
// ══════════════════════════════════════════════════════════

#[test]
fn unknown_opcode() {
    assert_eq!(
        parse_err("ADDI R1 R0 1\nFOO R1"),
        ParseError::UnknownOpcode {
            line: 2,
            token: "FOO".to_string()
        }
    );
}

#[test]
fn undefined_label() {
    assert_eq!(
        parse_err("BNEZ R1 NOWHERE"),
        ParseError::UndefinedLabel {
            line: 1,
            label: "NOWHERE".to_string()
        }
    );
}

#[test]
fn duplicate_label() {
    assert!(matches!(
        parse_err("A: EOP\nA: EOP"),
        ParseError::DuplicateLabel { line: 2, .. }
    ));
}

#[test]
fn wrong_operand_count() {
    assert_eq!(
        parse_err("ADD R1 R2"),
        ParseError::OperandCount {
            line: 1,
            opcode: Opcode::Add,
            expected: 3,
            found: 2
        }
    );
}

#[rstest]
#[case::out_of_range_register("ADD R32 R1 R2", "R32")]
#[case::fp_register_in_int_op("ADD R1 F1 R2", "F1")]
#[case::int_register_in_fp_op("ADDS F1 R1 F2", "R1")]
#[case::bad_immediate("ADDI R1 R0 abc", "abc")]
#[case::missing_paren("LW R1 4R2", "4R2")]
fn malformed_operand(#[case] text: &str, #[case] token: &str) {
    assert_eq!(
        parse_err(text),
        ParseError::BadOperand {
            line: 1,
            token: token.to_string()
        }
    );
}

#[test]
fn program_too_large() {
    assert_eq!(
        parse_program("EOP\nEOP\nEOP", 0, 2).expect_err("too large"),
        ParseError::ProgramTooLarge {
            len: 3,
            capacity: 2
        }
    );
}

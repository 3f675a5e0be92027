//! Disassembler Tests.
//!
//! Every listing the parser accepts should print back in the same syntax,
//! except that labels render as signed byte offsets.

use rstest::rstest;
use tomsim_core::isa::asm::parse_program;

fn render(line: &str) -> String {
    let program = parse_program(line, 0, 4).expect("parses");
    program.fetch(0).expect("slot 0").to_string()
}

#[rstest]
#[case("ADD R3 R1 R2")]
#[case("SUBI R4 R4 -1")]
#[case("LW R3 20(R2)")]
#[case("SW R4 -8(R5)")]
#[case("LWS F1 0(R2)")]
#[case("DIVS F3 F1 F2")]
#[case("EOP")]
fn listing_round_trips(#[case] line: &str) {
    assert_eq!(render(line), line);
}

#[test]
fn branch_targets_print_as_offsets() {
    let program = parse_program("L: BEQZ R1 L\nJUMP L", 0, 4).expect("parses");
    assert_eq!(program.fetch(0).expect("slot").to_string(), "BEQZ R1 -4");
    assert_eq!(program.fetch(4).expect("slot").to_string(), "JUMP -8");
}

//! Instruction Disassembler.
//!
//! Renders a decoded [`Instruction`] in the same syntax the assembler reads,
//! except that branch and jump targets print as signed byte offsets since
//! labels are not kept after loading.
//!
//! # Usage
//!
//! ```
//! use tomsim_core::isa::{Instruction, Opcode};
//! let text = Instruction::load(Opcode::Lw, 3, 20, 2).to_string();
//! assert_eq!(text, "LW R3 20(R2)");
//! ```

use std::fmt;

use crate::isa::instruction::Instruction;
use crate::isa::opcode::{OpClass, RegFile};

/// Formats a register of the given file, e.g. `R3` or `F1`.
struct Reg(RegFile, usize);

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0.prefix(), self.1)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode;
        match op.class() {
            OpClass::IntRegister => write!(
                f,
                "{op} {} {} {}",
                Reg(RegFile::Int, self.dest),
                Reg(RegFile::Int, self.src1),
                Reg(RegFile::Int, self.src2)
            ),
            OpClass::FpAlu => write!(
                f,
                "{op} {} {} {}",
                Reg(RegFile::Fp, self.dest),
                Reg(RegFile::Fp, self.src1),
                Reg(RegFile::Fp, self.src2)
            ),
            OpClass::IntImmediate => write!(
                f,
                "{op} {} {} {}",
                Reg(RegFile::Int, self.dest),
                Reg(RegFile::Int, self.src1),
                self.imm
            ),
            OpClass::Memory if op.is_load() => write!(
                f,
                "{op} {} {}({})",
                Reg(op.data_file(), self.dest),
                self.imm,
                Reg(RegFile::Int, self.src1)
            ),
            OpClass::Memory => write!(
                f,
                "{op} {} {}({})",
                Reg(op.data_file(), self.src1),
                self.imm,
                Reg(RegFile::Int, self.src2)
            ),
            OpClass::Branch => write!(f, "{op} {} {:+}", Reg(RegFile::Int, self.src1), self.imm),
            OpClass::Jump => write!(f, "{op} {:+}", self.imm),
            OpClass::End => write!(f, "{op}"),
        }
    }
}

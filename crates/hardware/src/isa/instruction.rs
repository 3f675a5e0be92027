//! Decoded instruction record.
//!
//! Instructions are decoded once by the loader and are read-only afterwards.
//! Field roles depend on the opcode class:
//!
//! | Class | `dest` | `src1` | `src2` | `imm` |
//! |---|---|---|---|---|
//! | register-register / FP | destination | left operand | right operand | unused |
//! | register-immediate | destination | left operand | unused | right operand |
//! | load | destination | base register | unused | address offset |
//! | store | unused | data register | base register | address offset |
//! | branch | unused | tested register | unused | pc-relative offset |
//! | jump | unused | unused | unused | pc-relative offset |

use crate::isa::opcode::Opcode;

/// A decoded instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// First source register index.
    pub src1: usize,
    /// Second source register index.
    pub src2: usize,
    /// Destination register index.
    pub dest: usize,
    /// Immediate: ALU operand, address offset, or branch offset in bytes.
    pub imm: i32,
}

impl Instruction {
    /// The end-of-program sentinel.
    pub const fn eop() -> Self {
        Self {
            opcode: Opcode::Eop,
            src1: 0,
            src2: 0,
            dest: 0,
            imm: 0,
        }
    }

    /// Register-register instruction: `OP dest src1 src2`.
    pub const fn reg(opcode: Opcode, dest: usize, src1: usize, src2: usize) -> Self {
        Self {
            opcode,
            src1,
            src2,
            dest,
            imm: 0,
        }
    }

    /// Register-immediate instruction: `OP dest src1 imm`.
    pub const fn reg_imm(opcode: Opcode, dest: usize, src1: usize, imm: i32) -> Self {
        Self {
            opcode,
            src1,
            src2: 0,
            dest,
            imm,
        }
    }

    /// Load: `OP dest offset(base)`.
    pub const fn load(opcode: Opcode, dest: usize, offset: i32, base: usize) -> Self {
        Self {
            opcode,
            src1: base,
            src2: 0,
            dest,
            imm: offset,
        }
    }

    /// Store: `OP data offset(base)`.
    pub const fn store(opcode: Opcode, data: usize, offset: i32, base: usize) -> Self {
        Self {
            opcode,
            src1: data,
            src2: base,
            dest: 0,
            imm: offset,
        }
    }

    /// Conditional branch on `src1` with a byte offset relative to `pc + 4`.
    pub const fn branch(opcode: Opcode, src1: usize, offset: i32) -> Self {
        Self {
            opcode,
            src1,
            src2: 0,
            dest: 0,
            imm: offset,
        }
    }

    /// Unconditional jump with a byte offset relative to `pc + 4`.
    pub const fn jump(offset: i32) -> Self {
        Self {
            opcode: Opcode::Jump,
            src1: 0,
            src2: 0,
            dest: 0,
            imm: offset,
        }
    }

    /// Immediate reinterpreted as a 32-bit machine word.
    #[inline]
    pub const fn imm_bits(&self) -> u32 {
        self.imm as u32
    }
}

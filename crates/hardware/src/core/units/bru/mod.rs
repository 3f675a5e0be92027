//! Branch Resolution Unit (BRU).
//!
//! Branches are never predicted dynamically: the core always fetches the
//! fall-through path and the branch unit only computes where control really
//! goes. Commit compares that target with `pc + 4` and squashes on mismatch.

use crate::common::constants::INSTRUCTION_BYTES;
use crate::isa::Opcode;

/// Branch Resolution Unit.
#[derive(Debug)]
pub struct Bru;

impl Bru {
    /// Evaluates a branch condition on a register value, read as signed.
    pub const fn taken(op: Opcode, value: u32) -> bool {
        let v = value as i32;
        match op {
            Opcode::Beqz => v == 0,
            Opcode::Bnez => v != 0,
            Opcode::Bltz => v < 0,
            Opcode::Bgtz => v > 0,
            Opcode::Blez => v <= 0,
            Opcode::Bgez => v >= 0,
            Opcode::Jump => true,
            _ => false,
        }
    }

    /// Resolves the next program counter of a branch or jump at `pc`.
    ///
    /// # Arguments
    ///
    /// * `op`    - Branch or jump opcode.
    /// * `value` - Tested register value (ignored by `JUMP`).
    /// * `imm`   - Byte offset relative to `pc + 4`.
    /// * `pc`    - Address of the branch.
    ///
    /// # Returns
    ///
    /// `pc + 4 + imm` if taken, otherwise `pc + 4`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tomsim_core::core::units::bru::Bru;
    /// use tomsim_core::isa::Opcode;
    ///
    /// assert_eq!(Bru::resolve(Opcode::Bnez, 3, -8, 0x10), 0xC);
    /// assert_eq!(Bru::resolve(Opcode::Bnez, 0, -8, 0x10), 0x14);
    /// assert_eq!(Bru::resolve(Opcode::Jump, 0, 8, 0x10), 0x1C);
    /// ```
    pub const fn resolve(op: Opcode, value: u32, imm: i32, pc: u32) -> u32 {
        let fall_through = pc.wrapping_add(INSTRUCTION_BYTES);
        if Self::taken(op, value) {
            fall_through.wrapping_add(imm as u32)
        } else {
            fall_through
        }
    }
}

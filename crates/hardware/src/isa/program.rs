//! Fixed-capacity instruction table.
//!
//! Slot `i` holds the instruction at address `base + 4 * i`. Slots the
//! loader does not fill hold the end-of-program sentinel, so fetching past
//! the last loaded instruction stops issue instead of faulting.

use crate::common::constants::{DEFAULT_PROGRAM_CAPACITY, INSTRUCTION_BYTES};
use crate::common::error::{ParseError, Reference};
use crate::isa::instruction::Instruction;

/// Instruction table addressed by program counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    base: u32,
    slots: Vec<Instruction>,
    len: usize,
}

impl Default for Program {
    fn default() -> Self {
        Self::empty(0, DEFAULT_PROGRAM_CAPACITY)
    }
}

impl Program {
    /// Creates a table of `capacity` sentinel slots starting at `base`.
    pub fn empty(base: u32, capacity: usize) -> Self {
        Self {
            base,
            slots: vec![Instruction::eop(); capacity],
            len: 0,
        }
    }

    /// Creates a table holding `instructions` from `base`, padded with sentinels.
    pub fn new(
        base: u32,
        capacity: usize,
        instructions: Vec<Instruction>,
    ) -> Result<Self, ParseError> {
        if instructions.len() > capacity {
            return Err(ParseError::ProgramTooLarge {
                len: instructions.len(),
                capacity,
            });
        }
        let len = instructions.len();
        let mut slots = instructions;
        slots.resize(capacity, Instruction::eop());
        Ok(Self { base, slots, len })
    }

    /// Address of the first slot.
    #[inline]
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Number of slots in the table.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of instructions the loader placed in the table.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True if nothing was loaded.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot index for `pc`, if `pc` is aligned and inside the table.
    pub fn index_of(&self, pc: u32) -> Option<usize> {
        let offset = pc.checked_sub(self.base)?;
        if offset % INSTRUCTION_BYTES != 0 {
            return None;
        }
        let idx = (offset / INSTRUCTION_BYTES) as usize;
        (idx < self.slots.len()).then_some(idx)
    }

    /// True if `pc` names a slot of the table.
    #[inline]
    pub fn is_valid_pc(&self, pc: u32) -> bool {
        self.index_of(pc).is_some()
    }

    /// Address of slot `idx`.
    #[inline]
    pub const fn pc_of(&self, idx: usize) -> u32 {
        self.base.wrapping_add(idx as u32 * INSTRUCTION_BYTES)
    }

    /// Fetches the instruction at `pc`.
    pub fn fetch(&self, pc: u32) -> Result<Instruction, Reference> {
        self.index_of(pc)
            .map(|idx| self.slots[idx])
            .ok_or(Reference::ProgramCounter(pc))
    }

    /// Loaded instructions with their addresses, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Instruction)> + '_ {
        self.slots[..self.len]
            .iter()
            .enumerate()
            .map(|(idx, inst)| (self.pc_of(idx), inst))
    }
}

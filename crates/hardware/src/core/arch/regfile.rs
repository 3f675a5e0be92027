//! Renamed Register File.
//!
//! This module implements the integer and floating-point register files of the
//! Tomasulo core. It performs the following:
//! 1. **Storage:** 32 registers per file, each holding a value and an optional producer tag.
//! 2. **Renaming:** Issue points a destination register at the ROB slot that will produce it.
//! 3. **Commit Guard:** A retiring instruction clears the tag only if it is still the
//!    latest producer, so a younger rename of the same register survives (WAW).
//! 4. **Invariant Enforcement:** Integer register `R0` reads as zero and is never renamed.
//!
//! While a tag is set the stored value is stale; readers must check the tag first.

use crate::common::constants::{NUM_REGS, UNDEFINED};
use crate::common::error::Reference;
use crate::core::pipeline::rob::RobTag;
use crate::isa::RegFile;

/// One architectural register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegEntry {
    /// Last committed value, or [`UNDEFINED`] if never written.
    pub value: u32,
    /// ROB slot of the latest in-flight producer.
    pub tag: Option<RobTag>,
}

impl Default for RegEntry {
    fn default() -> Self {
        Self {
            value: UNDEFINED,
            tag: None,
        }
    }
}

/// A register file with producer tags.
#[derive(Clone, Debug)]
pub struct RegisterFile {
    file: RegFile,
    regs: [RegEntry; NUM_REGS],
}

impl RegisterFile {
    /// Creates a register file with every register undefined and untagged.
    pub fn new(file: RegFile) -> Self {
        let mut rf = Self {
            file,
            regs: [RegEntry::default(); NUM_REGS],
        };
        rf.reset();
        rf
    }

    /// Which architectural file this is.
    #[inline]
    pub const fn file(&self) -> RegFile {
        self.file
    }

    /// True for integer `R0`, which is hardwired to zero.
    #[inline]
    fn is_zero_reg(&self, idx: usize) -> bool {
        self.file == RegFile::Int && idx == 0
    }

    fn check(&self, idx: usize) -> Result<usize, Reference> {
        if idx < NUM_REGS {
            Ok(idx)
        } else {
            Err(match self.file {
                RegFile::Int => Reference::IntRegister(idx),
                RegFile::Fp => Reference::FpRegister(idx),
            })
        }
    }

    /// Reads a register's value and producer tag.
    pub fn read(&self, idx: usize) -> Result<RegEntry, Reference> {
        let idx = self.check(idx)?;
        Ok(self.regs[idx])
    }

    /// Reads the stored value, ignoring any pending tag.
    pub fn value(&self, idx: usize) -> Result<u32, Reference> {
        self.read(idx).map(|entry| entry.value)
    }

    /// Reads the pending producer tag.
    pub fn tag(&self, idx: usize) -> Result<Option<RobTag>, Reference> {
        self.read(idx).map(|entry| entry.tag)
    }

    /// Writes a value directly (host access). Writes to `R0` are ignored.
    pub fn write(&mut self, idx: usize, value: u32) -> Result<(), Reference> {
        let idx = self.check(idx)?;
        if !self.is_zero_reg(idx) {
            self.regs[idx].value = value;
        }
        Ok(())
    }

    /// Points `idx` at the ROB slot that will produce its next value.
    pub fn rename(&mut self, idx: usize, tag: RobTag) -> Result<(), Reference> {
        let idx = self.check(idx)?;
        if !self.is_zero_reg(idx) {
            self.regs[idx].tag = Some(tag);
        }
        Ok(())
    }

    /// Retires a value from slot `owner`.
    ///
    /// The value is always written; the tag is cleared only if it still names
    /// `owner`.
    pub fn commit_write(&mut self, idx: usize, value: u32, owner: RobTag) -> Result<(), Reference> {
        let idx = self.check(idx)?;
        if self.is_zero_reg(idx) {
            return Ok(());
        }
        let reg = &mut self.regs[idx];
        reg.value = value;
        if reg.tag == Some(owner) {
            reg.tag = None;
        }
        Ok(())
    }

    /// Drops every pending rename; committed values are kept.
    pub fn clear_tags(&mut self) {
        for reg in &mut self.regs {
            reg.tag = None;
        }
    }

    /// Returns every register to undefined and untagged (`R0` to zero).
    pub fn reset(&mut self) {
        self.regs = [RegEntry::default(); NUM_REGS];
        if self.file == RegFile::Int {
            self.regs[0].value = 0;
        }
    }

    /// All registers with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &RegEntry)> + '_ {
        self.regs.iter().enumerate()
    }
}

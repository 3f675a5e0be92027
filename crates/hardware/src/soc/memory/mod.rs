//! Data Memory.
//!
//! Flat, byte-addressed data memory with no latency model of its own (the
//! Memory execution unit supplies the latency). It provides:
//! 1. **Word access:** Little-endian 4-byte reads and writes, bounds-checked.
//! 2. **Byte access:** Host pokes of arbitrary byte ranges.
//! 3. **Reset:** Every byte returns to the power-on fill pattern.

use crate::common::constants::{MEMORY_FILL, WORD_BYTES};
use crate::common::error::Reference;

/// Flat little-endian data memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    bytes: Vec<u8>,
}

impl DataMemory {
    /// Creates `size` bytes of memory filled with `0xFF`.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![MEMORY_FILL; size],
        }
    }

    /// Size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    fn span(&self, addr: u32, len: usize) -> Result<std::ops::Range<usize>, Reference> {
        let start = addr as usize;
        match start.checked_add(len) {
            Some(end) if end <= self.bytes.len() => Ok(start..end),
            _ => Err(Reference::DataAddress { addr, len }),
        }
    }

    /// Reads the little-endian word at `addr`.
    pub fn read_u32(&self, addr: u32) -> Result<u32, Reference> {
        let span = self.span(addr, WORD_BYTES)?;
        let mut word = [0u8; WORD_BYTES];
        word.copy_from_slice(&self.bytes[span]);
        Ok(u32::from_le_bytes(word))
    }

    /// Writes `value` little-endian at `addr`.
    pub fn write_u32(&mut self, addr: u32, value: u32) -> Result<(), Reference> {
        let span = self.span(addr, WORD_BYTES)?;
        self.bytes[span].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Copies `data` to `addr`; nothing is written if any byte is out of range.
    pub fn write_bytes(&mut self, addr: u32, data: &[u8]) -> Result<(), Reference> {
        let span = self.span(addr, data.len())?;
        self.bytes[span].copy_from_slice(data);
        Ok(())
    }

    /// Bytes in `[start, end)`.
    pub fn range(&self, start: u32, end: u32) -> Result<&[u8], Reference> {
        let len = end.saturating_sub(start) as usize;
        let span = self.span(start, len)?;
        Ok(&self.bytes[span])
    }

    /// Refills every byte with `0xFF`.
    pub fn reset(&mut self) {
        self.bytes.fill(MEMORY_FILL);
    }
}

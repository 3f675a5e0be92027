//! System-on-Chip (SoC) Components.
//!
//! The simulated machine has a single data memory; instructions live in the
//! separate instruction table owned by the core.

/// Flat little-endian data memory.
pub mod memory;

pub use memory::DataMemory;

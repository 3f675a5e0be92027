//! Core processor implementation.
//!
//! This module contains the Tomasulo core: the architectural register files,
//! the out-of-order pipeline, the execution units, and the `Cpu` container
//! that owns all of their state.

/// Architectural register files with producer tags.
pub mod arch;

/// CPU state container.
pub mod cpu;

/// Tomasulo pipeline (ROB, stations, CDB, stages, squash, log).
pub mod pipeline;

/// Execution units (pool, ALU, FPU, branch unit, load/store ordering).
pub mod units;

pub use self::cpu::Cpu;

//! Tomasulo out-of-order pipeline simulator library.
//!
//! This crate implements a cycle-accurate simulator of a dynamically scheduled
//! pipeline with a reorder buffer, with the following:
//! 1. **Core:** Register renaming, ROB, reservation stations, execution units and CDB.
//! 2. **Pipeline:** Issue, Execute, Write-Result and Commit, run in reverse order each cycle.
//! 3. **Recovery:** Commit-time branch resolution with a full squash on misprediction.
//! 4. **ISA:** A small load/store instruction set, its assembly parser and disassembler.
//! 5. **Simulation:** Configuration, program loading, statistics and state dumps.

/// Common types and constants (register counts, sentinels, errors).
pub mod common;
/// Simulator configuration (defaults, unit kinds, hierarchical config structures).
pub mod config;
/// CPU core (register files, pipeline, execution units).
pub mod core;
/// Instruction set (opcodes, instruction record, program table, assembler, disassembler).
pub mod isa;
/// Host-facing simulator, program loader and dumps.
pub mod sim;
/// Data memory.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Crate-wide error type.
pub use crate::common::SimError;
/// Main CPU type; holds every piece of processor state.
pub use crate::core::Cpu;
/// Host-facing simulator; construct with `Simulator::new`.
pub use crate::sim::{RunStatus, Simulator};

//! Simulation host surface.
//!
//! Provides the [`Simulator`] facade a host drives, the program loader, and
//! text dumps of the machine state.

/// Text dumps of registers, memory, ROB, stations and the execution log.
pub mod dump;

/// Assembly program loading from disk.
pub mod loader;

/// Host-facing simulator facade.
pub mod simulator;

pub use simulator::{RunStatus, Simulator};

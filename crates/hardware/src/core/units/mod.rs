//! Execution units and functional components.
//!
//! This module contains the functional units of the Tomasulo core: the unit
//! pool with its latency counters and address units, the integer ALU, the
//! floating-point unit, the branch resolution unit, and the load/store
//! ordering logic that decides when a load may read memory or take a
//! forwarded store value.

/// Integer Arithmetic Logic Unit.
pub mod alu;

/// Branch Resolution Unit (condition evaluation and target computation).
pub mod bru;

/// Single-precision Floating-Point Unit.
pub mod fpu;

/// Load/Store Unit: effective addresses and store-to-load ordering.
pub mod lsu;

/// Execution unit and address unit pools.
pub mod pool;

pub use pool::{AddressJob, AddressOp, AddressUnit, ExecUnit, UnitJob, UnitPool};

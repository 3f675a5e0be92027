//! Tomasulo pipeline.
//!
//! This module contains the out-of-order machinery of the core:
//! 1. **ROB:** Circular buffer of in-flight instructions; slot index is the tag.
//! 2. **Reservation Stations:** Typed pools holding operands or producer tags.
//! 3. **CDB:** Result broadcast to the ROB and every waiting station.
//! 4. **Stages:** Issue, Execute, Write-Result and Commit handlers.
//! 5. **Squash:** Full discard of speculative state after a misprediction.
//! 6. **Log:** Per-cycle record buffer flushed into the execution log.

/// Common data bus.
pub mod cdb;

/// Per-tick stage sequencing.
pub mod engine;

/// Execution log of committed and squashed instructions.
pub mod log;

/// Reservation station pools.
pub mod reservation;

/// Reorder buffer.
pub mod rob;

/// Misprediction recovery.
pub mod squash;

/// Pipeline stage implementations (issue, execute, write-result, commit).
pub mod stages;

pub use engine::tick;

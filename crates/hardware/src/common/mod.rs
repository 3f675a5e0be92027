//! Common types and constants shared across the simulator.
//!
//! This module provides the building blocks every other component relies on:
//! 1. **Constants:** Register counts, instruction width, and the undefined-value sentinel.
//! 2. **Error Handling:** The crate-wide [`SimError`] and its configuration, parse, and
//!    invalid-reference variants.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for configuration, loading, and malformed references.
pub mod error;

pub use constants::{INSTRUCTION_BYTES, NUM_REGS, UNDEFINED};
pub use error::{ConfigError, ParseError, Reference, SimError};

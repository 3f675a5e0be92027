//! Architectural state of the Tomasulo core.
//!
//! This module contains the architectural register files. Each file pairs
//! committed values with producer tags used by the renamer.

/// Integer and floating-point register files with producer tags.
pub mod regfile;

pub use regfile::{RegEntry, RegisterFile};

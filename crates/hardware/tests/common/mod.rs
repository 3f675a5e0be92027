//! Shared test infrastructure.

/// Simulator test harness.
pub mod harness;

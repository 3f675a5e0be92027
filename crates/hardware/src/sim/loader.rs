//! Program Loader.
//!
//! Reads assembly listings from disk and hands them to the parser. The
//! instruction table is placed at the configured base address.

use std::fs;
use std::path::Path;

use crate::common::error::SimError;
use crate::isa::Program;
use crate::isa::asm::parse_program;

/// Loads and parses the assembly program at `path`.
///
/// # Arguments
///
/// * `path` - Path to the assembly listing.
/// * `base` - Address of the first instruction.
/// * `capacity` - Instruction table slots.
///
/// # Returns
///
/// The parsed program, or an I/O or parse error.
pub fn load_program_file(
    path: impl AsRef<Path>,
    base: u32,
    capacity: usize,
) -> Result<Program, SimError> {
    let text = fs::read_to_string(path)?;
    Ok(parse_program(&text, base, capacity)?)
}

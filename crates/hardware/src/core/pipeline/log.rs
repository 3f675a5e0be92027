//! Execution log.
//!
//! One record per committed instruction and one per instruction discarded by a
//! misprediction squash. Stages append to a per-cycle buffer; the engine moves
//! the buffer into the log at the end of every tick.

use crate::core::pipeline::rob::{RobEntry, Timing};
use crate::isa::Instruction;

/// A retired or squashed instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogRecord {
    /// Program counter.
    pub pc: u32,
    /// Instruction.
    pub inst: Instruction,
    /// Stage timestamps.
    pub timing: Timing,
    /// Discarded by a squash instead of committed.
    pub squashed: bool,
}

impl LogRecord {
    /// Record for a ROB entry leaving the pipeline.
    pub const fn from_entry(entry: &RobEntry, squashed: bool) -> Self {
        Self {
            pc: entry.pc,
            inst: entry.inst,
            timing: entry.timing,
            squashed,
        }
    }
}

/// Append-only execution log with a per-cycle staging buffer.
#[derive(Clone, Debug, Default)]
pub struct ExecutionLog {
    records: Vec<LogRecord>,
    cycle: Vec<LogRecord>,
}

impl ExecutionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a record for the current cycle.
    pub fn record(&mut self, record: LogRecord) {
        self.cycle.push(record);
    }

    /// Moves the current cycle's records into the log.
    pub fn end_cycle(&mut self) {
        self.records.append(&mut self.cycle);
    }

    /// Flushed records, oldest first.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Number of flushed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing has been flushed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Flushed records of committed instructions.
    pub fn committed(&self) -> impl Iterator<Item = &LogRecord> + '_ {
        self.records.iter().filter(|r| !r.squashed)
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.records.clear();
        self.cycle.clear();
    }
}

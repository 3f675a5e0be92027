//! Cycle engine.
//!
//! A tick runs the four stages against the same cycle number, then flushes the
//! cycle's log records and advances the clock. Stage errors abort the tick
//! before the clock moves.

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::stages::{commit_stage, execute_stage, issue_stage, write_result_stage};

/// Advances `cpu` by one clock cycle.
pub fn tick(cpu: &mut Cpu) -> Result<(), SimError> {
    let now = cpu.cycle;
    commit_stage(cpu, now)?;
    write_result_stage(cpu, now)?;
    execute_stage(cpu, now)?;
    issue_stage(cpu, now)?;

    cpu.log.end_cycle();
    cpu.cycle += 1;
    cpu.stats.cycles = cpu.cycle;
    Ok(())
}

//! Misprediction recovery.
//!
//! The core always issues down the fall-through path. When a committing branch
//! resolves elsewhere, every in-flight instruction is younger than it and all
//! speculative state is discarded at once:
//! 1. **Log:** The branch is recorded as committed and every other drained ROB
//!    entry as squashed, in program order, into the current cycle's log buffer.
//! 2. **Reset:** ROB, reservation stations and execution units are emptied and
//!    immediately available; every register's producer tag is cleared while
//!    architectural values are kept.
//! 3. **Redirect:** The PC moves to the resolved target and the next Issue is
//!    skipped.

use tracing::info;

use crate::core::Cpu;
use crate::core::pipeline::log::LogRecord;
use crate::core::pipeline::rob::{RobState, RobTag};

/// Discards all speculative state after the branch `branch` resolved to `target`.
pub fn squash(cpu: &mut Cpu, branch: RobTag, target: u32, now: u64) {
    let mut branch_pc = None;
    for (tag, mut entry) in cpu.rob.flush_all() {
        let squashed = tag != branch;
        if !squashed {
            entry.timing.commit = Some(now);
            entry.state = RobState::Commit;
            branch_pc = Some(entry.pc);
        }
        cpu.log.record(LogRecord::from_entry(&entry, squashed));
    }

    cpu.stations.clear();
    cpu.units.clear();
    cpu.int_regs.clear_tags();
    cpu.fp_regs.clear_tags();

    cpu.pc = target;
    cpu.squash_pending = true;
    cpu.stats.branch_mispredictions += 1;
    info!(
        branch_pc = branch_pc.unwrap_or_default(),
        target = format_args!("{target:#x}"),
        cycle = now,
        "misprediction squash"
    );
}

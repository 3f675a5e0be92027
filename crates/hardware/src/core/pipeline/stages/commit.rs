//! Commit Stage: retire the ROB head in program order.
//!
//! Each cycle this stage:
//! 1. Runs housekeeping, making slots, stations and units freed in earlier
//!    cycles available again.
//! 2. Examines only the ROB head; a head that is not ready blocks retirement.
//! 3. Performs the deferred memory write of a head store through a Memory unit,
//!    retiring it once the write has completed.
//! 4. Checks a head branch against the fall-through path and squashes on mismatch.
//! 5. Writes any other head's result to its destination register and retires it.

use tracing::{trace, warn};

use crate::common::constants::INSTRUCTION_BYTES;
use crate::common::error::{Reference, SimError};
use crate::config::UnitKind;
use crate::core::Cpu;
use crate::core::pipeline::log::LogRecord;
use crate::core::pipeline::rob::{Destination, RobEntry, RobState, RobTag};
use crate::core::pipeline::squash::squash;
use crate::core::units::UnitJob;
use crate::isa::Opcode;
use crate::stats::SimStats;

/// Executes the Commit stage for cycle `now`.
pub fn commit_stage(cpu: &mut Cpu, now: u64) -> Result<(), SimError> {
    cpu.rob.refresh_availability();
    cpu.stations.refresh_availability();
    cpu.units.refresh_availability();

    let Some((tag, head)) = cpu.rob.head() else {
        return Ok(());
    };
    let head = head.clone();

    if head.inst.opcode.is_store() {
        return commit_store(cpu, tag, &head, now);
    }
    if !head.ready {
        return Ok(());
    }
    if let Some(fault) = head.fault {
        warn!(pc = head.pc, %fault, "faulting instruction reached commit");
        return Err(fault.into());
    }

    if head.inst.opcode.is_control() {
        let fall_through = head.pc.wrapping_add(INSTRUCTION_BYTES);
        if head.value != fall_through {
            count(&mut cpu.stats, head.inst.opcode);
            squash(cpu, tag, head.value, now);
            return Ok(());
        }
    } else {
        match head.dest {
            Destination::Int(r) => cpu.int_regs.commit_write(r, head.value, tag)?,
            Destination::Fp(r) => cpu.fp_regs.commit_write(r, head.value, tag)?,
            Destination::None | Destination::Memory => {}
        }
    }
    retire(cpu, now);
    Ok(())
}

/// Stores write memory only from the ROB head, through a Memory unit.
fn commit_store(cpu: &mut Cpu, tag: RobTag, head: &RobEntry, now: u64) -> Result<(), SimError> {
    match head.state {
        RobState::WriteResult => {
            let Some(idx) = cpu.units.acquire(UnitKind::Memory) else {
                return Ok(());
            };
            if let Some(unit) = cpu.units.unit_mut(idx) {
                unit.bind(UnitJob::StoreCommit { tag }, head.pc, head.inst);
            }
            if let Some(entry) = cpu.rob.get_mut(tag) {
                entry.state = RobState::Commit;
                entry.timing.commit = Some(now);
            }
            trace!(pc = head.pc, unit = idx, "store write bound");
            Ok(())
        }
        RobState::Commit => {
            let idx = cpu
                .units
                .find_store_commit(tag)
                .ok_or(Reference::Tag(tag.0))?;
            let written = cpu.units.unit(idx).is_some_and(|u| u.output.is_some());
            if written {
                if let Some(unit) = cpu.units.unit_mut(idx) {
                    unit.release();
                }
                retire(cpu, now);
            }
            Ok(())
        }
        RobState::Issue | RobState::Execute => Ok(()),
    }
}

/// Pops the head, logging and counting it.
fn retire(cpu: &mut Cpu, now: u64) {
    let Some(mut entry) = cpu.rob.pop() else {
        return;
    };
    if entry.timing.commit.is_none() {
        entry.timing.commit = Some(now);
    }
    entry.state = RobState::Commit;
    count(&mut cpu.stats, entry.inst.opcode);
    trace!(
        pc = entry.pc,
        inst = %entry.inst,
        dest = ?entry.dest,
        value = format_args!("{:#x}", entry.value),
        "commit"
    );
    cpu.log.record(LogRecord::from_entry(&entry, false));
}

fn count(stats: &mut SimStats, op: Opcode) {
    stats.instructions_executed += 1;
    if op.is_load() {
        stats.inst_load += 1;
    } else if op.is_store() {
        stats.inst_store += 1;
    } else if op.is_control() {
        stats.inst_branch += 1;
    } else if op.is_fp_alu() {
        stats.inst_fp += 1;
    } else {
        stats.inst_int += 1;
    }
}

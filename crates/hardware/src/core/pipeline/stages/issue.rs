//! Issue Stage: move instructions from the instruction table into the window.
//!
//! Up to `issue_width` instructions are issued per cycle, in program order.
//! Issue stops, without consuming width, at `EOP` or an invalid PC, when the
//! ROB is full, or when no matching reservation station is free. For each
//! issued instruction it:
//! 1. Resolves source operands through the register files and the ROB.
//! 2. Claims the ROB tail slot and fills the reservation station.
//! 3. Renames the destination register to the new tag, after the sources
//!    were read, so `ADD R1 R1 R2` sees the old `R1`.
//!
//! The cycle after a squash issues nothing.

use tracing::{debug, trace};

use crate::common::constants::INSTRUCTION_BYTES;
use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::reservation::{Operand, StationEntry};
use crate::core::pipeline::rob::Destination;
use crate::isa::{Instruction, OpClass, Opcode, RegFile};

/// Executes the Issue stage for cycle `now`.
pub fn issue_stage(cpu: &mut Cpu, now: u64) -> Result<(), SimError> {
    if cpu.squash_pending {
        cpu.squash_pending = false;
        return Ok(());
    }

    for _ in 0..cpu.issue_width {
        let pc = cpu.pc;
        let Ok(inst) = cpu.program.fetch(pc) else {
            break;
        };
        if inst.opcode == Opcode::Eop {
            break;
        }
        if !cpu.rob.can_push() {
            cpu.stats.stalls_rob_full += 1;
            debug!(pc, "issue stall: ROB full");
            break;
        }
        let Some(station) = cpu.stations.acquire(inst.opcode) else {
            cpu.stats.stalls_station_full += 1;
            debug!(pc, opcode = %inst.opcode, "issue stall: no free station");
            break;
        };

        let (vj, vk) = operands(cpu, &inst)?;
        let dest = Destination::of(&inst);
        // Destination index is checked before anything is claimed.
        let _ = match dest {
            Destination::Int(r) => cpu.int_regs.tag(r)?,
            Destination::Fp(r) => cpu.fp_regs.tag(r)?,
            Destination::None | Destination::Memory => None,
        };

        let Some(tag) = cpu.rob.push(pc, inst, now) else {
            break;
        };
        if !cpu
            .stations
            .insert(station, StationEntry::new(pc, inst, tag, vj, vk))
        {
            cpu.rob.retract(tag);
            break;
        }
        match dest {
            Destination::Int(r) => cpu.int_regs.rename(r, tag)?,
            Destination::Fp(r) => cpu.fp_regs.rename(r, tag)?,
            Destination::None | Destination::Memory => {}
        }

        trace!(pc, inst = %inst, tag = tag.0, station, "issue");
        cpu.pc = pc.wrapping_add(INSTRUCTION_BYTES);
    }
    Ok(())
}

/// Station operands: `vj` is the first source (the base for loads and
/// stores), `vk` the second source, the immediate, or a store's data.
fn operands(cpu: &Cpu, inst: &Instruction) -> Result<(Operand, Operand), SimError> {
    let op = inst.opcode;
    Ok(match op.class() {
        OpClass::IntRegister => (
            cpu.resolve_operand(RegFile::Int, inst.src1)?,
            cpu.resolve_operand(RegFile::Int, inst.src2)?,
        ),
        OpClass::IntImmediate => (
            cpu.resolve_operand(RegFile::Int, inst.src1)?,
            Operand::ready(inst.imm_bits()),
        ),
        OpClass::FpAlu => (
            cpu.resolve_operand(RegFile::Fp, inst.src1)?,
            cpu.resolve_operand(RegFile::Fp, inst.src2)?,
        ),
        OpClass::Memory if op.is_store() => (
            cpu.resolve_operand(RegFile::Int, inst.src2)?,
            cpu.resolve_operand(op.data_file(), inst.src1)?,
        ),
        OpClass::Memory => (cpu.resolve_operand(RegFile::Int, inst.src1)?, Operand::Unused),
        OpClass::Branch => (cpu.resolve_operand(RegFile::Int, inst.src1)?, Operand::Unused),
        OpClass::Jump | OpClass::End => (Operand::Unused, Operand::Unused),
    })
}

//! Execute Stage: dispatch ready stations and advance unit latencies.
//!
//! This stage performs the following:
//! 1. **Dispatch:** Every unbound station whose operands are visible this cycle
//!    is bound to a free unit, oldest instruction first. Loads and stores first
//!    bind an address unit to compute `base + offset`; a load later binds a
//!    Memory unit to read memory, or an address unit to take a forwarded store value.
//! 2. **Countdown:** Every busy unit's remaining latency drops by one.
//! 3. **Compute:** A unit reaching zero computes its output, which Write-Result
//!    publishes in a later cycle. Deferred store writes touch memory here.

use tracing::{debug, trace, warn};

use crate::common::error::{Reference, SimError};
use crate::config::UnitKind;
use crate::core::Cpu;
use crate::core::pipeline::reservation::{Binding, StationEntry};
use crate::core::pipeline::rob::{RobState, RobTag};
use crate::core::units::alu::Alu;
use crate::core::units::bru::Bru;
use crate::core::units::fpu::Fpu;
use crate::core::units::lsu::{ForwardResult, check_older_stores, effective_address};
use crate::core::units::{AddressJob, AddressOp, UnitJob};

/// Executes the Execute stage for cycle `now`.
pub fn execute_stage(cpu: &mut Cpu, now: u64) -> Result<(), SimError> {
    dispatch(cpu, now);
    advance_units(cpu, now)
}

fn dispatch(cpu: &mut Cpu, now: u64) {
    let mut order: Vec<(usize, usize)> = cpu
        .stations
        .occupied()
        .filter_map(|idx| {
            let st = cpu.stations.get(idx)?;
            st.bound.is_none().then(|| (cpu.rob.age(st.dest), idx))
        })
        .collect();
    order.sort_unstable();

    for (_, idx) in order {
        let Some(st) = cpu.stations.get(idx).cloned() else {
            continue;
        };
        let op = st.inst.opcode;
        if !op.is_memory() {
            dispatch_compute(cpu, idx, &st, now);
        } else if let Some(addr) = st.address {
            if op.is_load() {
                memory_phase(cpu, idx, &st, addr, now);
            }
        } else {
            address_phase(cpu, idx, &st, now);
        }
    }
}

fn dispatch_compute(cpu: &mut Cpu, idx: usize, st: &StationEntry, now: u64) {
    if st.vj.value_at(now).is_none() || st.vk.value_at(now).is_none() {
        return;
    }
    let Some(kind) = UnitKind::for_opcode(st.inst.opcode) else {
        return;
    };
    if let Some(unit) = cpu.units.acquire(kind) {
        bind_unit(cpu, idx, unit, st, now);
    }
}

fn address_phase(cpu: &mut Cpu, idx: usize, st: &StationEntry, now: u64) {
    let Some(base) = st.vj.value_at(now) else {
        return;
    };
    let Some(unit) = cpu.units.acquire_address() else {
        return;
    };
    let addr = effective_address(base, st.inst.imm);
    bind_address(cpu, idx, unit, st.dest, AddressOp::Compute, now);
    if let Some(entry) = cpu.stations.get_mut(idx) {
        entry.address = Some(addr);
    }
    if let Some(entry) = cpu.rob.get_mut(st.dest) {
        entry.address = Some(addr);
    }
    trace!(pc = st.pc, addr = format_args!("{addr:#x}"), unit, "address");
}

fn memory_phase(cpu: &mut Cpu, idx: usize, st: &StationEntry, addr: u32, now: u64) {
    let outcome = match st.forwarded {
        Some(fwd) => ForwardResult::Hit {
            value: fwd.value,
            visible_at: fwd.visible_at,
        },
        None => check_older_stores(&cpu.rob, st.dest, addr),
    };
    match outcome {
        ForwardResult::Hit { value, visible_at } if visible_at <= now => {
            let Some(unit) = cpu.units.acquire_address() else {
                return;
            };
            bind_address(cpu, idx, unit, st.dest, AddressOp::Forward(value), now);
            cpu.stats.forwarded_loads += 1;
            debug!(pc = st.pc, addr = format_args!("{addr:#x}"), value, "load forwarded");
        }
        ForwardResult::Hit { .. } | ForwardResult::Stall => {
            cpu.stats.stalls_memory_order += 1;
            debug!(pc = st.pc, addr = format_args!("{addr:#x}"), "load held by older store");
        }
        ForwardResult::Miss => {
            if let Some(unit) = cpu.units.acquire(UnitKind::Memory) {
                bind_unit(cpu, idx, unit, st, now);
            }
        }
    }
}

fn bind_unit(cpu: &mut Cpu, station: usize, unit: usize, st: &StationEntry, now: u64) {
    if let Some(u) = cpu.units.unit_mut(unit) {
        u.bind(UnitJob::Station { station, tag: st.dest }, st.pc, st.inst);
    }
    if let Some(entry) = cpu.stations.get_mut(station) {
        entry.bound = Some(Binding::Unit(unit));
    }
    mark_execute(cpu, st.dest, now);
    trace!(pc = st.pc, inst = %st.inst, unit, "dispatch");
}

fn bind_address(cpu: &mut Cpu, station: usize, unit: usize, tag: RobTag, op: AddressOp, now: u64) {
    if let Some(u) = cpu.units.address_unit_mut(unit) {
        u.bind(AddressJob { station, tag, op });
    }
    if let Some(entry) = cpu.stations.get_mut(station) {
        entry.bound = Some(Binding::Address(unit));
    }
    mark_execute(cpu, tag, now);
}

fn mark_execute(cpu: &mut Cpu, tag: RobTag, now: u64) {
    if let Some(entry) = cpu.rob.get_mut(tag) {
        entry.state = RobState::Execute;
        if entry.timing.execute.is_none() {
            entry.timing.execute = Some(now);
        }
    }
}

fn advance_units(cpu: &mut Cpu, now: u64) -> Result<(), SimError> {
    for idx in 0..cpu.units.units().len() {
        let Some(unit) = cpu.units.unit_mut(idx) else {
            continue;
        };
        let Some(job) = unit.job else {
            continue;
        };
        if unit.output.is_some() {
            continue;
        }
        unit.busy = unit.busy.saturating_sub(1);
        if unit.busy > 0 {
            continue;
        }
        let value = compute(cpu, job, now)?;
        if let Some(unit) = cpu.units.unit_mut(idx) {
            unit.output = Some(value);
        }
    }
    Ok(())
}

fn compute(cpu: &mut Cpu, job: UnitJob, now: u64) -> Result<u32, SimError> {
    match job {
        UnitJob::StoreCommit { tag } => {
            let entry = cpu.rob.get(tag).ok_or(Reference::Tag(tag.0))?;
            let addr = entry.address.ok_or(Reference::Tag(tag.0))?;
            let value = entry.value;
            cpu.memory.write_u32(addr, value)?;
            trace!(addr = format_args!("{addr:#x}"), value = format_args!("{value:#x}"), "store written");
            Ok(value)
        }
        UnitJob::Station { station, tag } => {
            let st = cpu.stations.get(station).ok_or(Reference::Tag(tag.0))?;
            let op = st.inst.opcode;
            let a = st.vj.value_at(now).unwrap_or_default();
            let b = st.vk.value_at(now).unwrap_or_default();
            if !op.is_load() {
                return Ok(if op.is_control() {
                    Bru::resolve(op, a, st.inst.imm, st.pc)
                } else if op.is_fp_alu() {
                    Fpu::execute(op, a, b)
                } else {
                    Alu::execute(op, a, b)
                });
            }
            let (pc, addr) = (st.pc, st.address.ok_or(Reference::Tag(tag.0))?);
            match cpu.memory.read_u32(addr) {
                Ok(value) => Ok(value),
                Err(fault) => {
                    warn!(pc, %fault, "speculative load fault recorded");
                    if let Some(entry) = cpu.rob.get_mut(tag) {
                        entry.fault = Some(fault);
                    }
                    Ok(0)
                }
            }
        }
    }
}

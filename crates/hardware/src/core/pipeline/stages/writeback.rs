//! Write-Result Stage: publish finished results on the CDB.
//!
//! This stage:
//! 1. Broadcasts the output of every execution unit whose latency has elapsed,
//!    then frees the unit and its reservation station.
//! 2. Retires address-unit work: a load's address phase frees the unit so the
//!    load can start its memory phase; a forwarded load value is broadcast like
//!    any other result; a store broadcasts its data once that data is visible.
//! 3. Broadcasts the data of stores whose address is known and whose data
//!    arrived after the address phase.
//! 4. Sweeps loads with a known address for an older store able to forward to them.
//!
//! Deferred store writes bound at Commit are not broadcast here; Commit
//! collects them itself.

use tracing::debug;

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::reservation::Forwarded;
use crate::core::pipeline::rob::RobTag;
use crate::core::units::lsu::{ForwardResult, check_older_stores};
use crate::core::units::{AddressOp, UnitJob};

/// Executes the Write-Result stage for cycle `now`.
pub fn write_result_stage(cpu: &mut Cpu, now: u64) -> Result<(), SimError> {
    cpu.cdb.begin_cycle(now);
    drain_units(cpu, now)?;
    drain_address_units(cpu, now)?;
    drain_stores(cpu, now)?;
    forward_sweep(cpu, now);
    Ok(())
}

fn drain_units(cpu: &mut Cpu, now: u64) -> Result<(), SimError> {
    for idx in 0..cpu.units.units().len() {
        let Some(unit) = cpu.units.unit(idx) else {
            continue;
        };
        let (Some(UnitJob::Station { station, tag }), Some(value)) = (unit.job, unit.output)
        else {
            continue;
        };
        cpu.cdb
            .write(&mut cpu.rob, &mut cpu.stations, tag, value, now)?;
        cpu.stations.release(station);
        if let Some(unit) = cpu.units.unit_mut(idx) {
            unit.release();
        }
    }
    Ok(())
}

fn drain_address_units(cpu: &mut Cpu, now: u64) -> Result<(), SimError> {
    for idx in 0..cpu.units.address_units().len() {
        let Some(job) = cpu.units.address_unit(idx).and_then(|u| u.job) else {
            continue;
        };
        let broadcast = match job.op {
            AddressOp::Forward(value) => Some(value),
            AddressOp::Compute => {
                let data = cpu.stations.get(job.station).and_then(|st| {
                    st.inst
                        .opcode
                        .is_store()
                        .then(|| st.vk.value_at(now))
                        .flatten()
                });
                if data.is_none() {
                    if let Some(st) = cpu.stations.get_mut(job.station) {
                        st.bound = None;
                    }
                }
                data
            }
        };
        if let Some(value) = broadcast {
            cpu.cdb
                .write(&mut cpu.rob, &mut cpu.stations, job.tag, value, now)?;
            cpu.stations.release(job.station);
        }
        if let Some(unit) = cpu.units.address_unit_mut(idx) {
            unit.release();
        }
    }
    Ok(())
}

/// Stores whose data arrived after their address phase.
fn drain_stores(cpu: &mut Cpu, now: u64) -> Result<(), SimError> {
    let ready: Vec<(usize, RobTag, u32)> = cpu
        .stations
        .occupied()
        .filter_map(|idx| {
            let st = cpu.stations.get(idx)?;
            let waiting = st.inst.opcode.is_store() && st.address.is_some() && st.bound.is_none();
            waiting
                .then(|| st.vk.value_at(now).map(|data| (idx, st.dest, data)))
                .flatten()
        })
        .collect();
    for (idx, tag, data) in ready {
        cpu.cdb
            .write(&mut cpu.rob, &mut cpu.stations, tag, data, now)?;
        cpu.stations.release(idx);
    }
    Ok(())
}

/// Hands store data to loads that already know their address.
fn forward_sweep(cpu: &mut Cpu, now: u64) {
    let loads: Vec<(usize, RobTag, u32)> = cpu
        .stations
        .occupied()
        .filter_map(|idx| {
            let st = cpu.stations.get(idx)?;
            let candidate = st.inst.opcode.is_load() && st.bound.is_none() && st.forwarded.is_none();
            candidate
                .then_some(st.address)
                .flatten()
                .map(|addr| (idx, st.dest, addr))
        })
        .collect();
    for (idx, tag, addr) in loads {
        if let ForwardResult::Hit { value, visible_at } = check_older_stores(&cpu.rob, tag, addr) {
            if let Some(st) = cpu.stations.get_mut(idx) {
                st.forwarded = Some(Forwarded { value, visible_at });
            }
            debug!(
                load = tag.0,
                addr = format_args!("{addr:#x}"),
                ready_at = visible_at,
                cycle = now,
                "store value forwarded"
            );
        }
    }
}

//! Execution unit pools.
//!
//! Two pools feed the CDB:
//! 1. **Execution units:** typed, latency-bearing units. A binding sets
//!    `busy = latency`; every cycle the counter drops by one and the result is
//!    computed when it reaches zero.
//! 2. **Address units:** zero-latency helpers used for the address phase of
//!    loads and stores and for handing forwarded store data to a load. One is
//!    created for every execution unit added.
//!
//! Units released during a cycle become bindable again only after the next
//! housekeeping pass (`refresh_availability`) at the start of Commit.

use crate::common::error::ConfigError;
use crate::config::{UnitConfig, UnitKind};
use crate::core::pipeline::rob::RobTag;
use crate::isa::Instruction;

/// Work bound to an execution unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitJob {
    /// Executing the instruction held in a reservation station.
    Station {
        /// Station index.
        station: usize,
        /// ROB slot receiving the result.
        tag: RobTag,
    },
    /// Performing the deferred memory write of the committing store `tag`.
    StoreCommit {
        /// ROB slot of the store.
        tag: RobTag,
    },
}

/// A latency-bearing execution unit.
#[derive(Clone, Debug)]
pub struct ExecUnit {
    /// Unit type.
    pub kind: UnitKind,
    /// Cycles from binding to result.
    pub latency: u32,
    /// Cycles remaining.
    pub busy: u32,
    /// Bound work.
    pub job: Option<UnitJob>,
    /// Program counter of the bound instruction.
    pub pc: Option<u32>,
    /// Bound instruction.
    pub inst: Option<Instruction>,
    /// Result, once `busy` has reached zero.
    pub output: Option<u32>,
    available: bool,
}

impl ExecUnit {
    fn new(kind: UnitKind, latency: u32) -> Self {
        Self {
            kind,
            latency,
            busy: 0,
            job: None,
            pc: None,
            inst: None,
            output: None,
            available: true,
        }
    }

    /// True if the unit may be bound this cycle.
    #[inline]
    pub const fn is_available(&self) -> bool {
        self.available && self.job.is_none()
    }

    /// Binds work; `busy` restarts at the unit latency.
    pub fn bind(&mut self, job: UnitJob, pc: u32, inst: Instruction) {
        self.job = Some(job);
        self.pc = Some(pc);
        self.inst = Some(inst);
        self.busy = self.latency;
        self.output = None;
        self.available = false;
    }

    /// True once the bound work has produced its output.
    #[inline]
    pub const fn is_done(&self) -> bool {
        self.job.is_some() && self.busy == 0 && self.output.is_some()
    }

    /// Drops the binding; the unit stays unavailable until housekeeping.
    pub fn release(&mut self) {
        self.job = None;
        self.pc = None;
        self.inst = None;
        self.output = None;
        self.busy = 0;
    }
}

/// Address unit operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressOp {
    /// Effective address computation.
    Compute,
    /// Delivers an older store's data to a load.
    Forward(u32),
}

/// Work bound to an address unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressJob {
    /// Station index of the load or store.
    pub station: usize,
    /// ROB slot of the load or store.
    pub tag: RobTag,
    /// Operation.
    pub op: AddressOp,
}

/// A zero-latency address unit.
#[derive(Clone, Debug)]
pub struct AddressUnit {
    /// Bound work.
    pub job: Option<AddressJob>,
    available: bool,
}

impl AddressUnit {
    /// True if the unit may be bound this cycle.
    #[inline]
    pub const fn is_available(&self) -> bool {
        self.available && self.job.is_none()
    }

    /// Binds work.
    pub fn bind(&mut self, job: AddressJob) {
        self.job = Some(job);
        self.available = false;
    }

    /// Drops the binding; the unit stays unavailable until housekeeping.
    pub fn release(&mut self) {
        self.job = None;
    }
}

/// All execution and address units.
#[derive(Clone, Debug, Default)]
pub struct UnitPool {
    units: Vec<ExecUnit>,
    address: Vec<AddressUnit>,
}

impl UnitPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `instances` units of `kind`, plus one address unit per instance.
    pub fn add(&mut self, kind: UnitKind, latency: u32, instances: usize) -> Result<(), ConfigError> {
        UnitConfig::new(kind, latency, instances).validate()?;
        for _ in 0..instances {
            self.units.push(ExecUnit::new(kind, latency));
            self.address.push(AddressUnit {
                job: None,
                available: true,
            });
        }
        Ok(())
    }

    /// True if no execution unit has been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// True if at least one unit of `kind` exists.
    pub fn has_kind(&self, kind: UnitKind) -> bool {
        self.units.iter().any(|u| u.kind == kind)
    }

    /// Index of the first free unit of `kind`.
    pub fn acquire(&self, kind: UnitKind) -> Option<usize> {
        self.units
            .iter()
            .position(|u| u.kind == kind && u.is_available())
    }

    /// Index of the first free address unit.
    pub fn acquire_address(&self) -> Option<usize> {
        self.address.iter().position(AddressUnit::is_available)
    }

    /// Execution unit `idx`.
    pub fn unit(&self, idx: usize) -> Option<&ExecUnit> {
        self.units.get(idx)
    }

    /// Mutable execution unit `idx`.
    pub fn unit_mut(&mut self, idx: usize) -> Option<&mut ExecUnit> {
        self.units.get_mut(idx)
    }

    /// Address unit `idx`.
    pub fn address_unit(&self, idx: usize) -> Option<&AddressUnit> {
        self.address.get(idx)
    }

    /// Mutable address unit `idx`.
    pub fn address_unit_mut(&mut self, idx: usize) -> Option<&mut AddressUnit> {
        self.address.get_mut(idx)
    }

    /// All execution units.
    pub fn units(&self) -> &[ExecUnit] {
        &self.units
    }

    /// Mutable execution units.
    pub fn units_mut(&mut self) -> &mut [ExecUnit] {
        &mut self.units
    }

    /// All address units.
    pub fn address_units(&self) -> &[AddressUnit] {
        &self.address
    }

    /// Unit performing the deferred write of store `tag`.
    pub fn find_store_commit(&self, tag: RobTag) -> Option<usize> {
        self.units
            .iter()
            .position(|u| u.job == Some(UnitJob::StoreCommit { tag }))
    }

    /// Housekeeping: units released in an earlier cycle become bindable.
    pub fn refresh_availability(&mut self) {
        for unit in &mut self.units {
            if unit.job.is_none() {
                unit.available = true;
            }
        }
        for unit in &mut self.address {
            if unit.job.is_none() {
                unit.available = true;
            }
        }
    }

    /// Drops every binding and makes every unit immediately bindable.
    pub fn clear(&mut self) {
        for unit in &mut self.units {
            unit.release();
            unit.available = true;
        }
        for unit in &mut self.address {
            unit.release();
            unit.available = true;
        }
    }

    /// True if no unit of either pool holds work.
    pub fn is_idle(&self) -> bool {
        self.units.iter().all(|u| u.job.is_none()) && self.address.iter().all(|u| u.job.is_none())
    }
}

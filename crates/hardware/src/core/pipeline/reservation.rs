//! Reservation Stations.
//!
//! Four typed pools buffer issued instructions until their operands are ready:
//! 1. **Integer:** ALU operations, branches, and jumps.
//! 2. **Add:** Floating-point add and subtract.
//! 3. **Mult:** Integer and floating-point multiply and divide.
//! 4. **Load:** Load buffers, which also track the address operands of stores.
//!
//! Each operand is either a value or the tag of the ROB slot that will produce
//! it. A value delivered by the CDB in cycle `w` becomes usable for dispatch in
//! cycle `w + 1`, so a dependent chain never completes in zero cycles.

use crate::config::StationConfig;
use crate::core::pipeline::rob::RobTag;
use crate::isa::{Instruction, OpClass, Opcode};

/// Reservation station pool type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StationKind {
    /// Integer ALU, branch, and jump operations.
    Integer,
    /// Floating-point add/subtract.
    Add,
    /// Multiply/divide, integer and floating-point.
    Mult,
    /// Loads and stores.
    Load,
}

impl StationKind {
    /// Pool an opcode issues into, or `None` for the end sentinel.
    pub const fn for_opcode(opcode: Opcode) -> Option<Self> {
        match opcode {
            Opcode::Mult | Opcode::Div | Opcode::Mults | Opcode::Divs => Some(Self::Mult),
            _ => match opcode.class() {
                OpClass::Memory => Some(Self::Load),
                OpClass::FpAlu => Some(Self::Add),
                OpClass::IntRegister | OpClass::IntImmediate | OpClass::Branch | OpClass::Jump => {
                    Some(Self::Integer)
                }
                OpClass::End => None,
            },
        }
    }
}

/// A source operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Operand {
    /// The opcode does not read this operand.
    #[default]
    Unused,
    /// Known value, usable from cycle `visible_at` on.
    Value {
        /// Operand value.
        value: u32,
        /// First cycle in which dispatch may consume the value.
        visible_at: u64,
    },
    /// Waiting for the named ROB slot to broadcast.
    Pending(RobTag),
}

impl Operand {
    /// A value that is usable immediately.
    pub const fn ready(value: u32) -> Self {
        Self::Value {
            value,
            visible_at: 0,
        }
    }

    /// Value usable for dispatch in cycle `now`; unused operands read as zero.
    pub const fn value_at(&self, now: u64) -> Option<u32> {
        match *self {
            Self::Unused => Some(0),
            Self::Value { value, visible_at } if visible_at <= now => Some(value),
            Self::Value { .. } | Self::Pending(_) => None,
        }
    }

    /// Producer tag, if still waiting.
    pub const fn tag(&self) -> Option<RobTag> {
        match *self {
            Self::Pending(tag) => Some(tag),
            _ => None,
        }
    }

    /// Installs `value` if this operand waits on `tag`.
    fn capture(&mut self, tag: RobTag, value: u32, visible_at: u64) -> bool {
        if *self == Self::Pending(tag) {
            *self = Self::Value { value, visible_at };
            true
        } else {
            false
        }
    }
}

/// Unit an entry is currently bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    /// Regular execution unit at this pool index.
    Unit(usize),
    /// Address unit at this pool index.
    Address(usize),
}

/// A store value handed to a load without touching memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Forwarded {
    /// Store data.
    pub value: u32,
    /// First cycle in which the load may use it.
    pub visible_at: u64,
}

/// An occupied reservation station.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StationEntry {
    /// Program counter.
    pub pc: u32,
    /// Instruction copy.
    pub inst: Instruction,
    /// ROB slot receiving the result.
    pub dest: RobTag,
    /// First operand (base register for loads and stores).
    pub vj: Operand,
    /// Second operand (store data for stores).
    pub vk: Operand,
    /// Effective address once computed.
    pub address: Option<u32>,
    /// Value forwarded from an older store.
    pub forwarded: Option<Forwarded>,
    /// Unit currently executing this entry.
    pub bound: Option<Binding>,
}

impl StationEntry {
    /// Creates an unbound entry.
    pub const fn new(pc: u32, inst: Instruction, dest: RobTag, vj: Operand, vk: Operand) -> Self {
        Self {
            pc,
            inst,
            dest,
            vj,
            vk,
            address: None,
            forwarded: None,
            bound: None,
        }
    }
}

/// One reservation station slot.
#[derive(Clone, Debug)]
pub struct Station {
    /// Pool type.
    pub kind: StationKind,
    /// Occupant, if busy.
    pub entry: Option<StationEntry>,
    available: bool,
}

impl Station {
    /// True if the slot may be acquired this cycle.
    #[inline]
    pub const fn is_available(&self) -> bool {
        self.available && self.entry.is_none()
    }
}

/// All reservation station pools.
#[derive(Clone, Debug)]
pub struct ReservationStations {
    stations: Vec<Station>,
}

impl ReservationStations {
    /// Creates the pools, integer first, then add, mult, and load.
    pub fn new(config: &StationConfig) -> Self {
        let pools = [
            (StationKind::Integer, config.integer),
            (StationKind::Add, config.add),
            (StationKind::Mult, config.mult),
            (StationKind::Load, config.load),
        ];
        let stations = pools
            .into_iter()
            .flat_map(|(kind, n)| {
                std::iter::repeat_with(move || Station {
                    kind,
                    entry: None,
                    available: true,
                })
                .take(n)
            })
            .collect();
        Self { stations }
    }

    /// Total number of stations.
    #[inline]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True if there are no stations at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of stations of `kind`.
    pub fn count(&self, kind: StationKind) -> usize {
        self.stations.iter().filter(|s| s.kind == kind).count()
    }

    /// True if a station of the pool `opcode` needs is free.
    pub fn is_available(&self, opcode: Opcode) -> bool {
        self.acquire(opcode).is_some()
    }

    /// Index of a free station of the pool `opcode` needs.
    pub fn acquire(&self, opcode: Opcode) -> Option<usize> {
        let kind = StationKind::for_opcode(opcode)?;
        self.stations
            .iter()
            .position(|s| s.kind == kind && s.is_available())
    }

    /// Places `entry` into station `idx`.
    ///
    /// Returns false, leaving the station untouched, if `idx` is not free.
    pub fn insert(&mut self, idx: usize, entry: StationEntry) -> bool {
        match self.stations.get_mut(idx).filter(|s| s.is_available()) {
            Some(station) => {
                station.entry = Some(entry);
                station.available = false;
                true
            }
            None => false,
        }
    }

    /// Frees station `idx`; it becomes acquirable after the next housekeeping pass.
    pub fn release(&mut self, idx: usize) {
        if let Some(station) = self.stations.get_mut(idx) {
            station.entry = None;
        }
    }

    /// Entry in station `idx`.
    pub fn get(&self, idx: usize) -> Option<&StationEntry> {
        self.stations.get(idx)?.entry.as_ref()
    }

    /// Mutable entry in station `idx`.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut StationEntry> {
        self.stations.get_mut(idx)?.entry.as_mut()
    }

    /// Index of the station holding the instruction tagged `tag`.
    pub fn find_by_tag(&self, tag: RobTag) -> Option<usize> {
        self.stations
            .iter()
            .position(|s| s.entry.as_ref().is_some_and(|e| e.dest == tag))
    }

    /// CDB snoop: every operand waiting on `tag` takes `value`.
    ///
    /// Returns the number of operands captured.
    pub fn broadcast(&mut self, tag: RobTag, value: u32, visible_at: u64) -> usize {
        let mut captured = 0;
        for entry in self.stations.iter_mut().filter_map(|s| s.entry.as_mut()) {
            captured += usize::from(entry.vj.capture(tag, value, visible_at));
            captured += usize::from(entry.vk.capture(tag, value, visible_at));
        }
        captured
    }

    /// Housekeeping: stations freed in an earlier cycle become acquirable.
    pub fn refresh_availability(&mut self) {
        for station in &mut self.stations {
            if station.entry.is_none() {
                station.available = true;
            }
        }
    }

    /// Empties every station and makes it immediately acquirable.
    pub fn clear(&mut self) {
        for station in &mut self.stations {
            station.entry = None;
            station.available = true;
        }
    }

    /// All stations with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Station)> + '_ {
        self.stations.iter().enumerate()
    }

    /// Indices of occupied stations.
    pub fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.stations
            .iter()
            .enumerate()
            .filter(|(_, s)| s.entry.is_some())
            .map(|(idx, _)| idx)
    }
}

//! Reorder Buffer (ROB) for in-order commit.
//!
//! The ROB is a circular buffer and the single source of program order. Every
//! issued instruction occupies exactly one slot from Issue until it retires.
//! It provides:
//! 1. **Allocation:** `push` claims the tail slot; the slot index is the instruction's tag.
//! 2. **Completion:** `complete` is the ROB side of a CDB broadcast (ready + value).
//! 3. **In-order Commit:** `head` and `pop` retire strictly from the oldest slot.
//! 4. **Flush:** `flush_all` discards every in-flight entry after a misprediction.
//!
//! Each slot is one in-flight instruction record: its pipeline fields and its
//! per-stage timing live together, so there is no parallel window to keep in step.
//!
//! A slot freed by `pop` is not reusable until the next cycle's housekeeping pass
//! (`refresh_availability`), matching hardware where a slot released on one clock
//! edge is seen as free on the next.

use crate::common::error::Reference;
use crate::isa::{Instruction, RegFile};

/// Tag naming an in-flight instruction: the index of its ROB slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct RobTag(pub u32);

impl RobTag {
    /// Slot index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Pipeline state of an ROB entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RobState {
    /// Issued, waiting in a reservation station.
    #[default]
    Issue,
    /// Dispatched to an execution or address unit.
    Execute,
    /// Result broadcast; waiting to commit.
    WriteResult,
    /// Retiring (stores stay here while their memory write completes).
    Commit,
}

/// Where a retiring entry writes its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Destination {
    /// Branches and jumps write nothing.
    #[default]
    None,
    /// Integer register.
    Int(usize),
    /// Floating-point register.
    Fp(usize),
    /// Data memory; the address lives in [`RobEntry::address`].
    Memory,
}

impl Destination {
    /// Destination written by `inst` at commit.
    pub fn of(inst: &Instruction) -> Self {
        match inst.opcode.dest_file() {
            Some(RegFile::Int) => Self::Int(inst.dest),
            Some(RegFile::Fp) => Self::Fp(inst.dest),
            None if inst.opcode.is_store() => Self::Memory,
            None => Self::None,
        }
    }
}

/// Cycle at which an entry entered each stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Timing {
    /// Issue cycle.
    pub issue: Option<u64>,
    /// First Execute cycle (address phase for memory operations).
    pub execute: Option<u64>,
    /// Write-Result cycle.
    pub write_result: Option<u64>,
    /// Commit cycle.
    pub commit: Option<u64>,
}

/// One in-flight instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RobEntry {
    /// Program counter.
    pub pc: u32,
    /// Instruction copy.
    pub inst: Instruction,
    /// Result (or store data) is known.
    pub ready: bool,
    /// Pipeline state.
    pub state: RobState,
    /// Commit destination.
    pub dest: Destination,
    /// Result value, branch target, or store data.
    pub value: u32,
    /// Effective address; `Some` once the address phase has run.
    pub address: Option<u32>,
    /// Malformed access made while speculative; raised if the entry commits.
    pub fault: Option<Reference>,
    /// Stage timestamps.
    pub timing: Timing,
}

impl RobEntry {
    fn new(pc: u32, inst: Instruction, cycle: u64) -> Self {
        Self {
            pc,
            inst,
            ready: false,
            state: RobState::Issue,
            dest: Destination::of(&inst),
            value: 0,
            address: None,
            fault: None,
            timing: Timing {
                issue: Some(cycle),
                ..Timing::default()
            },
        }
    }
}

#[derive(Clone, Debug)]
struct RobSlot {
    entry: Option<RobEntry>,
    available: bool,
}

/// Reorder Buffer: circular buffer for in-order commit.
#[derive(Clone, Debug)]
pub struct Rob {
    /// Fixed-size slot array.
    slots: Vec<RobSlot>,
    /// Index of the oldest entry (commit point).
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    /// Number of occupied slots.
    count: usize,
}

impl Rob {
    /// Creates a new ROB with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![
                RobSlot {
                    entry: None,
                    available: true,
                };
                capacity
            ],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Returns the ROB capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the ROB is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the ROB is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Index of the oldest slot.
    #[inline]
    pub const fn head_index(&self) -> usize {
        self.head
    }

    /// Index the next push will use.
    #[inline]
    pub const fn tail_index(&self) -> usize {
        self.tail
    }

    /// True if `push` would succeed this cycle.
    pub fn can_push(&self) -> bool {
        !self.is_full() && self.slots.get(self.tail).is_some_and(|slot| slot.available)
    }

    /// Allocates the tail slot for the instruction at `pc`.
    ///
    /// Returns `None` if the ROB is full or the tail slot was freed this cycle.
    pub fn push(&mut self, pc: u32, inst: Instruction, cycle: u64) -> Option<RobTag> {
        if !self.can_push() {
            return None;
        }
        let tag = RobTag(self.tail as u32);
        let slot = &mut self.slots[self.tail];
        slot.entry = Some(RobEntry::new(pc, inst, cycle));
        slot.available = false;
        self.tail = (self.tail + 1) % self.slots.len();
        self.count += 1;
        Some(tag)
    }

    /// Undoes the most recent `push` of `tag`.
    ///
    /// Used when station insertion fails after the slot was claimed. Does
    /// nothing unless `tag` is the youngest entry.
    pub fn retract(&mut self, tag: RobTag) {
        if self.count == 0 {
            return;
        }
        let youngest = (self.tail + self.slots.len() - 1) % self.slots.len();
        if youngest != tag.index() {
            return;
        }
        let slot = &mut self.slots[youngest];
        slot.entry = None;
        slot.available = true;
        self.tail = youngest;
        self.count -= 1;
    }

    /// True if `tag` names an occupied slot.
    #[inline]
    pub fn is_valid(&self, tag: RobTag) -> bool {
        self.get(tag).is_some()
    }

    /// Entry named by `tag`, if the slot is occupied.
    pub fn get(&self, tag: RobTag) -> Option<&RobEntry> {
        self.slots.get(tag.index())?.entry.as_ref()
    }

    /// Mutable entry named by `tag`, if the slot is occupied.
    pub fn get_mut(&mut self, tag: RobTag) -> Option<&mut RobEntry> {
        self.slots.get_mut(tag.index())?.entry.as_mut()
    }

    /// Oldest entry and its tag.
    pub fn head(&self) -> Option<(RobTag, &RobEntry)> {
        if self.count == 0 {
            return None;
        }
        let tag = RobTag(self.head as u32);
        self.get(tag).map(|entry| (tag, entry))
    }

    /// Frees the head slot and returns its entry.
    pub fn pop(&mut self) -> Option<RobEntry> {
        if self.count == 0 {
            return None;
        }
        let entry = self.slots[self.head].entry.take();
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        entry
    }

    /// Marks `tag` ready with `value` and records the Write-Result cycle.
    ///
    /// Returns false if `tag` does not name an occupied slot.
    pub fn complete(&mut self, tag: RobTag, value: u32, cycle: u64) -> bool {
        let Some(entry) = self.get_mut(tag) else {
            return false;
        };
        entry.ready = true;
        entry.value = value;
        entry.state = RobState::WriteResult;
        entry.timing.write_result = Some(cycle);
        true
    }

    /// Tag of the in-flight instruction at `pc`, searching oldest first.
    pub fn find_by_pc(&self, pc: u32) -> Option<RobTag> {
        self.iter().find(|(_, entry)| entry.pc == pc).map(|(tag, _)| tag)
    }

    /// Position of `tag` in program order (0 = head).
    pub fn age(&self, tag: RobTag) -> usize {
        let cap = self.slots.len();
        (tag.index() + cap - self.head) % cap
    }

    /// Tags of entries older than `tag`, youngest first.
    pub fn older_than(&self, tag: RobTag) -> impl Iterator<Item = RobTag> + '_ {
        let cap = self.slots.len();
        let head = self.head;
        (0..self.age(tag).min(self.count))
            .rev()
            .map(move |k| RobTag(((head + k) % cap) as u32))
    }

    /// Occupied entries in program order.
    pub fn iter(&self) -> impl Iterator<Item = (RobTag, &RobEntry)> + '_ {
        let cap = self.slots.len();
        (0..self.count).filter_map(move |k| {
            let tag = RobTag(((self.head + k) % cap) as u32);
            self.get(tag).map(|entry| (tag, entry))
        })
    }

    /// Housekeeping: slots freed in an earlier cycle become allocatable.
    pub fn refresh_availability(&mut self) {
        for slot in &mut self.slots {
            if slot.entry.is_none() {
                slot.available = true;
            }
        }
    }

    /// True if the slot at `index` may be allocated.
    pub fn is_available(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.available)
    }

    /// Discards every entry and returns them in program order.
    ///
    /// Head and tail return to zero and every slot is immediately allocatable.
    pub fn flush_all(&mut self) -> Vec<(RobTag, RobEntry)> {
        let cap = self.slots.len();
        let mut drained = Vec::with_capacity(self.count);
        for k in 0..self.count {
            let idx = (self.head + k) % cap;
            if let Some(entry) = self.slots[idx].entry.take() {
                drained.push((RobTag(idx as u32), entry));
            }
        }
        for slot in &mut self.slots {
            slot.entry = None;
            slot.available = true;
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        drained
    }
}

//! CPU Core Definition and Initialization.
//!
//! `Cpu` is the single owner of all processor state. Stage handlers receive it
//! by mutable reference, so every cross-reference between the ROB, the stations,
//! the units and the register files goes through one explicit context. It holds:
//! 1. **Architectural State:** Program counter, integer and FP register files, data memory.
//! 2. **Speculative State:** ROB, reservation stations, execution and address units.
//! 3. **Bookkeeping:** Cycle counter, CDB, execution log, statistics, squash flag.

use crate::common::error::{Reference, SimError};
use crate::config::Config;
use crate::core::arch::RegisterFile;
use crate::core::pipeline::cdb::CommonDataBus;
use crate::core::pipeline::log::ExecutionLog;
use crate::core::pipeline::reservation::{Operand, ReservationStations};
use crate::core::pipeline::rob::Rob;
use crate::core::units::UnitPool;
use crate::isa::{Program, RegFile};
use crate::soc::DataMemory;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// Program counter of the next instruction to issue.
    pub pc: u32,
    /// Integer registers.
    pub int_regs: RegisterFile,
    /// Floating-point registers.
    pub fp_regs: RegisterFile,
    /// Reorder buffer.
    pub rob: Rob,
    /// Reservation stations.
    pub stations: ReservationStations,
    /// Execution and address units.
    pub units: UnitPool,
    /// Data memory.
    pub memory: DataMemory,
    /// Instruction table.
    pub program: Program,
    /// Common data bus.
    pub cdb: CommonDataBus,
    /// Committed and squashed instructions.
    pub log: ExecutionLog,
    /// Performance statistics.
    pub stats: SimStats,
    /// Current clock cycle.
    pub cycle: u64,
    /// Maximum instructions issued per cycle.
    pub issue_width: usize,
    /// Set by a squash; the next Issue consumes it and issues nothing.
    pub squash_pending: bool,
}

impl Cpu {
    /// Creates a CPU sized by `config`, with no execution units.
    pub fn new(config: &Config) -> Self {
        let base = config.general.instr_base_address;
        Self {
            pc: base,
            int_regs: RegisterFile::new(RegFile::Int),
            fp_regs: RegisterFile::new(RegFile::Fp),
            rob: Rob::new(config.pipeline.rob_size),
            stations: ReservationStations::new(&config.pipeline.stations),
            units: UnitPool::new(),
            memory: DataMemory::new(config.memory.size),
            program: Program::empty(base, config.general.program_capacity),
            cdb: CommonDataBus::new(),
            log: ExecutionLog::new(),
            stats: SimStats::default(),
            cycle: 0,
            issue_width: config.pipeline.issue_width,
            squash_pending: false,
        }
    }

    /// Register file `file`.
    pub fn regs(&self, file: RegFile) -> &RegisterFile {
        match file {
            RegFile::Int => &self.int_regs,
            RegFile::Fp => &self.fp_regs,
        }
    }

    /// Mutable register file `file`.
    pub fn regs_mut(&mut self, file: RegFile) -> &mut RegisterFile {
        match file {
            RegFile::Int => &mut self.int_regs,
            RegFile::Fp => &mut self.fp_regs,
        }
    }

    /// Resolves a source register for Issue.
    ///
    /// An untagged register yields its value. A tagged register yields the
    /// producer's result if it has already been broadcast (usable from the cycle
    /// after the broadcast), otherwise the tag to wait on.
    pub fn resolve_operand(&self, file: RegFile, idx: usize) -> Result<Operand, SimError> {
        let reg = self.regs(file).read(idx)?;
        let Some(tag) = reg.tag else {
            return Ok(Operand::ready(reg.value));
        };
        let producer = self.rob.get(tag).ok_or(Reference::Tag(tag.0))?;
        if producer.ready {
            Ok(Operand::Value {
                value: producer.value,
                visible_at: producer.timing.write_result.map_or(0, |w| w + 1),
            })
        } else {
            Ok(Operand::Pending(tag))
        }
    }

    /// True when nothing is in flight and the PC rests on `EOP`.
    pub fn is_finished(&self) -> bool {
        self.rob.is_empty()
            && self
                .program
                .fetch(self.pc)
                .is_ok_and(|inst| inst.opcode == crate::isa::Opcode::Eop)
    }

    /// Discards all in-flight and architectural state except units and memory size.
    pub fn reset(&mut self, config: &Config) {
        let units = std::mem::take(&mut self.units);
        *self = Self::new(config);
        self.units = units;
        self.units.clear();
    }
}

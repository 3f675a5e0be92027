//! Simulator: the host-facing facade over the CPU.
//!
//! The simulator owns the configuration and the [`Cpu`]. It:
//! 1. **Builds:** Sizes the core from a [`Config`] and adds its execution units.
//! 2. **Loads:** Installs a program and points the PC at its base address.
//! 3. **Checks:** Before the first cycle, verifies every opcode in the program
//!    has an execution unit and a reservation station pool.
//! 4. **Runs:** Ticks one cycle at a time or until `EOP` retires.
//! 5. **Exposes:** Bounds-checked register, tag and memory access, statistics and dumps.

use std::path::Path;

use tracing::info;

use crate::common::error::{ConfigError, Reference, SimError};
use crate::config::{Config, UnitKind};
use crate::core::Cpu;
use crate::core::pipeline::log::ExecutionLog;
use crate::core::pipeline::reservation::{ReservationStations, StationKind};
use crate::core::pipeline::rob::{Rob, RobTag};
use crate::core::pipeline::tick;
use crate::core::units::UnitPool;
use crate::isa::Program;
use crate::isa::asm::parse_program;
use crate::sim::dump::{MemoryView, Status};
use crate::sim::loader;
use crate::stats::SimStats;

/// How a call to [`Simulator::run`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// The ROB drained with the PC on `EOP`.
    Completed,
    /// The requested number of cycles elapsed first.
    CycleLimit,
}

/// Top-level simulator.
#[derive(Clone, Debug)]
pub struct Simulator {
    config: Config,
    cpu: Cpu,
    checked: bool,
}

impl Simulator {
    /// Creates a simulator sized by `config` and adds its execution units.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        let mut sim = Self {
            config: config.clone(),
            cpu: Cpu::new(config),
            checked: false,
        };
        for group in &config.units {
            sim.init_exec_unit(group.kind, group.latency, group.instances)?;
        }
        Ok(sim)
    }

    /// Adds `instances` execution units of `kind` with `latency` cycles.
    pub fn init_exec_unit(
        &mut self,
        kind: UnitKind,
        latency: u32,
        instances: usize,
    ) -> Result<(), SimError> {
        self.cpu.units.add(kind, latency, instances)?;
        self.checked = false;
        Ok(())
    }

    /// Installs `program` and moves the PC to its base address.
    pub fn load_program(&mut self, program: Program) {
        self.cpu.pc = program.base();
        self.cpu.program = program;
        self.checked = false;
    }

    /// Parses and installs an assembly listing.
    pub fn load_program_str(&mut self, text: &str) -> Result<(), SimError> {
        let general = &self.config.general;
        let program = parse_program(text, general.instr_base_address, general.program_capacity)?;
        self.load_program(program);
        Ok(())
    }

    /// Reads, parses and installs the assembly listing at `path`.
    pub fn load_program_file(&mut self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let general = &self.config.general;
        let program = loader::load_program_file(
            path,
            general.instr_base_address,
            general.program_capacity,
        )?;
        self.load_program(program);
        Ok(())
    }

    /// Verifies the units and stations can execute the loaded program.
    fn check(&mut self) -> Result<(), ConfigError> {
        if self.checked {
            return Ok(());
        }
        if self.cpu.units.is_empty() {
            return Err(ConfigError::NoExecutionUnits);
        }
        for (_, inst) in self.cpu.program.iter() {
            let opcode = inst.opcode;
            if let Some(kind) = UnitKind::for_opcode(opcode) {
                if !self.cpu.units.has_kind(kind) {
                    return Err(ConfigError::MissingUnit { kind, opcode });
                }
            }
            if let Some(kind) = StationKind::for_opcode(opcode) {
                if self.cpu.stations.count(kind) == 0 {
                    return Err(ConfigError::MissingStation { kind, opcode });
                }
            }
        }
        self.checked = true;
        Ok(())
    }

    /// Advances exactly one clock cycle.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.check()?;
        tick(&mut self.cpu)
    }

    /// Runs until the program completes, or for `cycles` cycles if non-zero.
    ///
    /// Fails with an invalid program counter if the ROB drains while the PC
    /// is outside the instruction table.
    pub fn run(&mut self, cycles: u64) -> Result<RunStatus, SimError> {
        self.check()?;
        let mut ran = 0;
        loop {
            if self.cpu.is_finished() {
                info!(
                    cycles = self.cpu.cycle,
                    instructions = self.cpu.stats.instructions_executed,
                    ipc = self.cpu.stats.ipc(),
                    "program completed"
                );
                return Ok(RunStatus::Completed);
            }
            if self.cpu.rob.is_empty() && !self.cpu.program.is_valid_pc(self.cpu.pc) {
                return Err(Reference::ProgramCounter(self.cpu.pc).into());
            }
            if cycles != 0 && ran == cycles {
                return Ok(RunStatus::CycleLimit);
            }
            tick(&mut self.cpu)?;
            ran += 1;
        }
    }

    /// Returns every register, memory byte, queue and counter to power-on state.
    ///
    /// The instruction table is emptied; execution units are kept.
    pub fn reset(&mut self) {
        self.cpu.reset(&self.config);
        self.checked = false;
    }

    /// Integer register `idx`.
    pub fn get_int_register(&self, idx: usize) -> Result<u32, SimError> {
        Ok(self.cpu.int_regs.value(idx)?)
    }

    /// Sets integer register `idx`; writes to `R0` are ignored.
    pub fn set_int_register(&mut self, idx: usize, value: u32) -> Result<(), SimError> {
        Ok(self.cpu.int_regs.write(idx, value)?)
    }

    /// Floating-point register `idx`.
    pub fn get_fp_register(&self, idx: usize) -> Result<f32, SimError> {
        Ok(f32::from_bits(self.cpu.fp_regs.value(idx)?))
    }

    /// Sets floating-point register `idx`.
    pub fn set_fp_register(&mut self, idx: usize, value: f32) -> Result<(), SimError> {
        Ok(self.cpu.fp_regs.write(idx, value.to_bits())?)
    }

    /// Pending producer of integer register `idx`.
    pub fn get_int_register_tag(&self, idx: usize) -> Result<Option<RobTag>, SimError> {
        Ok(self.cpu.int_regs.tag(idx)?)
    }

    /// Pending producer of floating-point register `idx`.
    pub fn get_fp_register_tag(&self, idx: usize) -> Result<Option<RobTag>, SimError> {
        Ok(self.cpu.fp_regs.tag(idx)?)
    }

    /// Writes `value` little-endian at `addr`.
    pub fn write_memory(&mut self, addr: u32, value: u32) -> Result<(), SimError> {
        Ok(self.cpu.memory.write_u32(addr, value)?)
    }

    /// Copies `bytes` to memory starting at `addr`.
    pub fn write_memory_bytes(&mut self, addr: u32, bytes: &[u8]) -> Result<(), SimError> {
        Ok(self.cpu.memory.write_bytes(addr, bytes)?)
    }

    /// Little-endian word at `addr`.
    pub fn read_memory_u32(&self, addr: u32) -> Result<u32, SimError> {
        Ok(self.cpu.memory.read_u32(addr)?)
    }

    /// Bytes in `[start, end)`.
    pub fn memory_range(&self, start: u32, end: u32) -> Result<&[u8], SimError> {
        Ok(self.cpu.memory.range(start, end)?)
    }

    /// Dump of the bytes in `[start, end)`.
    pub fn memory_view(&self, start: u32, end: u32) -> Result<MemoryView<'_>, SimError> {
        let bytes = self.memory_range(start, end)?;
        Ok(MemoryView { start, bytes })
    }

    /// Combined dump of the window, ROB, stations and registers.
    pub fn status(&self) -> Status<'_> {
        Status(&self.cpu)
    }

    /// Instructions committed.
    pub fn instructions_executed(&self) -> u64 {
        self.cpu.stats.instructions_executed
    }

    /// Clock cycles elapsed.
    pub fn clock_cycles(&self) -> u64 {
        self.cpu.cycle
    }

    /// Instructions per cycle.
    pub fn ipc(&self) -> f64 {
        self.cpu.stats.ipc()
    }

    /// Program counter of the next instruction to issue.
    pub fn pc(&self) -> u32 {
        self.cpu.pc
    }

    /// Configuration the simulator was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The CPU.
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Reorder buffer.
    pub fn rob(&self) -> &Rob {
        &self.cpu.rob
    }

    /// Reservation stations.
    pub fn stations(&self) -> &ReservationStations {
        &self.cpu.stations
    }

    /// Execution and address units.
    pub fn units(&self) -> &UnitPool {
        &self.cpu.units
    }

    /// Run statistics.
    pub fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Execution log.
    pub fn log(&self) -> &ExecutionLog {
        &self.cpu.log
    }

    /// Loaded instruction table.
    pub fn program(&self) -> &Program {
        &self.cpu.program
    }
}

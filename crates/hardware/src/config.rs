//! Configuration system for the Tomasulo simulator.
//!
//! This module defines all configuration structures used to size the pipeline.
//! It provides:
//! 1. **Defaults:** Baseline sizes for memory, the ROB, and each station pool.
//! 2. **Structures:** Hierarchical config for general, memory, pipeline, and unit setup.
//! 3. **Enums:** Execution unit kinds and the opcodes each one serves.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built from
//! `Config::default()`, which carries no execution units; the host adds them
//! with `Simulator::init_exec_unit` or through the `units` list.

use serde::{Deserialize, Serialize};

use crate::common::error::{ConfigError, SimError};
use crate::isa::{OpClass, Opcode};

/// Default configuration constants for the simulator.
mod defaults {
    /// Address of the first instruction table slot.
    pub const INSTR_BASE_ADDRESS: u32 = 0;

    /// Instruction table capacity in instructions.
    pub const PROGRAM_CAPACITY: usize = crate::common::constants::DEFAULT_PROGRAM_CAPACITY;

    /// Data memory size in bytes (1 KiB).
    pub const MEMORY_SIZE: usize = 1024;

    /// Reorder buffer capacity.
    pub const ROB_SIZE: usize = 8;

    /// Instructions issued per cycle.
    pub const ISSUE_WIDTH: usize = 1;

    /// Entries in each reservation station pool.
    pub const STATIONS_PER_POOL: usize = 2;

    /// Instances created by a unit group that does not say otherwise.
    pub const UNIT_INSTANCES: usize = 1;
}

/// Execution unit types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum UnitKind {
    /// Integer ALU; also resolves branches and jumps.
    #[serde(alias = "INTEGER")]
    Integer,
    /// Floating-point adder (`ADDS`, `SUBS`).
    #[serde(alias = "ADDER")]
    Adder,
    /// Multiplier, shared by `MULT` and `MULTS`.
    #[serde(alias = "MULTIPLIER")]
    Multiplier,
    /// Divider, shared by `DIV` and `DIVS`.
    #[serde(alias = "DIVIDER")]
    Divider,
    /// Memory port for loads and committed stores.
    #[serde(alias = "MEMORY")]
    Memory,
}

impl UnitKind {
    /// Unit type that executes `opcode`, or `None` for the end sentinel.
    pub const fn for_opcode(opcode: Opcode) -> Option<Self> {
        match opcode {
            Opcode::Mult | Opcode::Mults => Some(Self::Multiplier),
            Opcode::Div | Opcode::Divs => Some(Self::Divider),
            Opcode::Adds | Opcode::Subs => Some(Self::Adder),
            _ => match opcode.class() {
                OpClass::Memory => Some(Self::Memory),
                OpClass::IntRegister
                | OpClass::IntImmediate
                | OpClass::Branch
                | OpClass::Jump => Some(Self::Integer),
                OpClass::FpAlu | OpClass::End => None,
            },
        }
    }
}

/// Root configuration structure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Instruction table placement and size.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Data memory.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// ROB, issue width, and reservation stations.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Execution unit groups created at construction.
    #[serde(default)]
    pub units: Vec<UnitConfig>,
}

impl Config {
    /// Parses a configuration from JSON; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every size and unit group.
    ///
    /// An empty unit list is allowed here because units may still be added
    /// before the first cycle; running without any is reported then.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.program_capacity == 0 {
            return Err(ConfigError::ZeroProgramCapacity);
        }
        if self.memory.size < crate::common::constants::WORD_BYTES {
            return Err(ConfigError::ZeroMemory);
        }
        if self.pipeline.rob_size == 0 {
            return Err(ConfigError::ZeroRobCapacity);
        }
        if self.pipeline.issue_width == 0 {
            return Err(ConfigError::ZeroIssueWidth);
        }
        self.units.iter().try_for_each(UnitConfig::validate)
    }

    /// Adds one instance of every unit kind with textbook latencies.
    #[must_use]
    pub fn with_standard_units(mut self) -> Self {
        self.units = vec![
            UnitConfig::new(UnitKind::Integer, 1, 1),
            UnitConfig::new(UnitKind::Adder, 2, 1),
            UnitConfig::new(UnitKind::Multiplier, 4, 1),
            UnitConfig::new(UnitKind::Divider, 8, 1),
            UnitConfig::new(UnitKind::Memory, 2, 1),
        ];
        self
    }
}

/// General simulation settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Address of the first instruction.
    #[serde(default = "GeneralConfig::default_instr_base_address")]
    pub instr_base_address: u32,

    /// Instruction table capacity.
    #[serde(default = "GeneralConfig::default_program_capacity")]
    pub program_capacity: usize,
}

impl GeneralConfig {
    const fn default_instr_base_address() -> u32 {
        defaults::INSTR_BASE_ADDRESS
    }

    const fn default_program_capacity() -> usize {
        defaults::PROGRAM_CAPACITY
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            instr_base_address: defaults::INSTR_BASE_ADDRESS,
            program_capacity: defaults::PROGRAM_CAPACITY,
        }
    }
}

/// Data memory settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Size in bytes.
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,
}

impl MemoryConfig {
    const fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_SIZE,
        }
    }
}

/// Pipeline sizing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Reorder buffer capacity.
    #[serde(default = "PipelineConfig::default_rob_size")]
    pub rob_size: usize,

    /// Instructions issued per cycle.
    #[serde(default = "PipelineConfig::default_issue_width")]
    pub issue_width: usize,

    /// Reservation station pool sizes.
    #[serde(default)]
    pub stations: StationConfig,
}

impl PipelineConfig {
    const fn default_rob_size() -> usize {
        defaults::ROB_SIZE
    }

    const fn default_issue_width() -> usize {
        defaults::ISSUE_WIDTH
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rob_size: defaults::ROB_SIZE,
            issue_width: defaults::ISSUE_WIDTH,
            stations: StationConfig::default(),
        }
    }
}

/// Entries per reservation station pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationConfig {
    /// Integer ALU, branch, and jump stations.
    #[serde(default = "StationConfig::default_pool")]
    pub integer: usize,
    /// Floating-point add/subtract stations.
    #[serde(default = "StationConfig::default_pool")]
    pub add: usize,
    /// Multiply/divide stations (integer and FP).
    #[serde(default = "StationConfig::default_pool")]
    pub mult: usize,
    /// Load buffers, used by loads and stores.
    #[serde(default = "StationConfig::default_pool")]
    pub load: usize,
}

impl StationConfig {
    const fn default_pool() -> usize {
        defaults::STATIONS_PER_POOL
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            integer: defaults::STATIONS_PER_POOL,
            add: defaults::STATIONS_PER_POOL,
            mult: defaults::STATIONS_PER_POOL,
            load: defaults::STATIONS_PER_POOL,
        }
    }
}

/// A group of identical execution units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitConfig {
    /// Unit type.
    pub kind: UnitKind,
    /// Cycles from dispatch until the result is ready.
    pub latency: u32,
    /// Number of units in the group.
    #[serde(default = "UnitConfig::default_instances")]
    pub instances: usize,
}

impl UnitConfig {
    /// Creates a unit group.
    pub const fn new(kind: UnitKind, latency: u32, instances: usize) -> Self {
        Self {
            kind,
            latency,
            instances,
        }
    }

    const fn default_instances() -> usize {
        defaults::UNIT_INSTANCES
    }

    /// Rejects zero latency and empty groups.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.latency == 0 {
            return Err(ConfigError::ZeroLatency(self.kind));
        }
        if self.instances == 0 {
            return Err(ConfigError::ZeroInstances(self.kind));
        }
        Ok(())
    }
}

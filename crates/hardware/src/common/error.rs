//! Simulator error definitions.
//!
//! This module defines the failure modes surfaced at the simulator boundary. It provides:
//! 1. **Configuration Errors:** Fatal setups for which no valid schedule exists.
//! 2. **Invalid References:** Out-of-range program counters, registers, tags, and addresses.
//!    The offending mutation is refused; nothing is read or written out of bounds.
//! 3. **Parse Errors:** Assembly loader failures, reported with 1-based line numbers.
//!
//! Structural contention (a full ROB, no free station or unit) is not an error; the
//! pipeline simply retries on the next cycle.

use std::fmt;

use thiserror::Error;

use crate::config::UnitKind;
use crate::core::pipeline::reservation::StationKind;
use crate::isa::Opcode;

/// A malformed reference made by the host or by an in-flight instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reference {
    /// Program counter outside the instruction table or not word aligned.
    ProgramCounter(u32),
    /// Integer register index out of range.
    IntRegister(usize),
    /// Floating-point register index out of range.
    FpRegister(usize),
    /// ROB tag that does not name an in-use slot.
    Tag(u32),
    /// Data memory access that does not fit inside memory.
    DataAddress {
        /// First byte of the access.
        addr: u32,
        /// Access width in bytes.
        len: usize,
    },
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProgramCounter(pc) => write!(f, "program counter {pc:#x}"),
            Self::IntRegister(idx) => write!(f, "integer register R{idx}"),
            Self::FpRegister(idx) => write!(f, "floating-point register F{idx}"),
            Self::Tag(tag) => write!(f, "ROB tag {tag}"),
            Self::DataAddress { addr, len } => {
                write!(f, "data address {addr:#x} ({len} bytes)")
            }
        }
    }
}

/// Fatal configuration errors.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No execution unit was configured before the first cycle.
    #[error("no execution units configured")]
    NoExecutionUnits,
    /// The program uses an opcode whose unit type has no instance.
    #[error("{opcode} requires a {kind:?} unit but none is configured")]
    MissingUnit {
        /// Unit type the opcode executes on.
        kind: UnitKind,
        /// Offending opcode.
        opcode: Opcode,
    },
    /// The program uses an opcode whose station pool is empty.
    #[error("{opcode} requires a {kind:?} reservation station but the pool is empty")]
    MissingStation {
        /// Station pool the opcode issues into.
        kind: StationKind,
        /// Offending opcode.
        opcode: Opcode,
    },
    /// The reorder buffer must hold at least one entry.
    #[error("ROB capacity must be non-zero")]
    ZeroRobCapacity,
    /// At least one instruction must issue per cycle.
    #[error("issue width must be non-zero")]
    ZeroIssueWidth,
    /// Execution units need at least one cycle of latency.
    #[error("{0:?} unit latency must be non-zero")]
    ZeroLatency(UnitKind),
    /// A unit group must contain at least one instance.
    #[error("{0:?} unit group must have at least one instance")]
    ZeroInstances(UnitKind),
    /// Data memory must hold at least one word.
    #[error("data memory size must be at least one word")]
    ZeroMemory,
    /// The instruction table must hold at least one slot.
    #[error("program capacity must be non-zero")]
    ZeroProgramCapacity,
}

/// Assembly loader errors.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The mnemonic is not part of the instruction set.
    #[error("line {line}: unknown opcode `{token}`")]
    UnknownOpcode {
        /// 1-based source line.
        line: usize,
        /// Offending token.
        token: String,
    },
    /// An operand could not be read as the expected register or immediate.
    #[error("line {line}: malformed operand `{token}`")]
    BadOperand {
        /// 1-based source line.
        line: usize,
        /// Offending token.
        token: String,
    },
    /// The instruction has the wrong number of operands.
    #[error("line {line}: {opcode} expects {expected} operand(s), found {found}")]
    OperandCount {
        /// 1-based source line.
        line: usize,
        /// Mnemonic being parsed.
        opcode: Opcode,
        /// Operands the mnemonic takes.
        expected: usize,
        /// Operands present on the line.
        found: usize,
    },
    /// A branch or jump names a label that is never defined.
    #[error("line {line}: undefined label `{label}`")]
    UndefinedLabel {
        /// 1-based source line.
        line: usize,
        /// Missing label.
        label: String,
    },
    /// A label is defined twice.
    #[error("line {line}: duplicate label `{label}`")]
    DuplicateLabel {
        /// 1-based source line.
        line: usize,
        /// Repeated label.
        label: String,
    },
    /// The program does not fit in the instruction table.
    #[error("program has {len} instructions but the table holds {capacity}")]
    ProgramTooLarge {
        /// Instructions in the program.
        len: usize,
        /// Instruction table capacity.
        capacity: usize,
    },
}

/// Top-level simulator error.
#[derive(Debug, Error)]
pub enum SimError {
    /// Fatal configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Configuration file could not be decoded.
    #[error("configuration format error: {0}")]
    ConfigFormat(#[from] serde_json::Error),
    /// Malformed reference; the mutation was refused.
    #[error("invalid reference: {0}")]
    InvalidReference(Reference),
    /// Assembly program could not be loaded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    /// I/O failure while reading a program or configuration.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Reference> for SimError {
    fn from(reference: Reference) -> Self {
        Self::InvalidReference(reference)
    }
}

//! Diagnostics dumps.
//!
//! Text tables for the state a host inspects between cycles. Every dump is a
//! [`fmt::Display`] value, so callers choose whether to print it, log it, or
//! compare it in a test:
//! 1. **Registers:** value or pending producer tag; never-written registers are omitted.
//! 2. **Memory:** a byte range, four bytes per row.
//! 3. **ROB and window:** slot contents and per-instruction stage timestamps.
//! 4. **Reservation stations:** operands, producer tags, destination, address.
//! 5. **Execution log:** committed and squashed instructions with their timing.

use std::fmt;

use crate::common::constants::UNDEFINED;
use crate::core::Cpu;
use crate::core::arch::RegisterFile;
use crate::core::pipeline::log::{ExecutionLog, LogRecord};
use crate::core::pipeline::reservation::{Operand, ReservationStations, StationKind};
use crate::core::pipeline::rob::{Destination, Rob, RobState, Timing};
use crate::isa::RegFile;

fn cycle(f: &mut fmt::Formatter<'_>, at: Option<u64>) -> fmt::Result {
    match at {
        Some(c) => write!(f, "{c:>7}"),
        None => write!(f, "{:>7}", "-"),
    }
}

fn timing_row(f: &mut fmt::Formatter<'_>, pc: u32, timing: &Timing) -> fmt::Result {
    write!(f, "0x{pc:08x}")?;
    cycle(f, timing.issue)?;
    cycle(f, timing.execute)?;
    cycle(f, timing.write_result)?;
    cycle(f, timing.commit)
}

const TIMING_HEADER: &str = "        PC  Issue    Exe     WR Commit";

impl fmt::Display for RobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Issue => "ISSUE",
            Self::Execute => "EXE",
            Self::WriteResult => "WR",
            Self::Commit => "COMMIT",
        })
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.pad("-"),
            Self::Int(r) => f.pad(&format!("R{r}")),
            Self::Fp(r) => f.pad(&format!("F{r}")),
            Self::Memory => f.pad("MEM"),
        }
    }
}

impl fmt::Display for StationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Integer => "Int",
            Self::Add => "Add",
            Self::Mult => "Mult",
            Self::Load => "Load",
        })
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.file().prefix();
        for (idx, reg) in self.iter() {
            let name = format!("{prefix}{idx}");
            if let Some(tag) = reg.tag {
                writeln!(f, "{name:>8}{:>22}{:>5}", "-", tag.0)?;
            } else if reg.value != UNDEFINED {
                let shown = match self.file() {
                    RegFile::Int => format!("{}", reg.value as i32),
                    RegFile::Fp => format!("{}", f32::from_bits(reg.value)),
                };
                writeln!(f, "{name:>8}{shown:>11}/0x{:08x}{:>5}", reg.value, "-")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Rob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "REORDER BUFFER")?;
        writeln!(
            f,
            "{:>5}{:>6}{:>7}{:>12}{:>8}{:>6}{:>12}",
            "Entry", "Busy", "Ready", "PC", "State", "Dest", "Value"
        )?;
        let entries: Vec<_> = self.iter().collect();
        for slot in 0..self.capacity() {
            match entries.iter().find(|(tag, _)| tag.index() == slot) {
                Some((_, e)) => {
                    let ready = if e.ready { "yes" } else { "no" };
                    write!(f, "{slot:>5}{:>6}{ready:>7}  0x{:08x}{:>8}{:>6}", "yes", e.pc, e.state, e.dest)?;
                    if e.ready {
                        writeln!(f, "  0x{:08x}", e.value)?;
                    } else {
                        writeln!(f, "{:>12}", "-")?;
                    }
                }
                None => writeln!(
                    f,
                    "{slot:>5}{:>6}{:>7}{:>12}{:>8}{:>6}{:>12}",
                    "no", "no", "-", "-", "-", "-"
                )?,
            }
        }
        Ok(())
    }
}

fn operand(f: &mut fmt::Formatter<'_>, op: Operand) -> fmt::Result {
    match op {
        Operand::Value { value, .. } => write!(f, "  0x{value:08x}"),
        Operand::Unused | Operand::Pending(_) => write!(f, "{:>12}", "-"),
    }
}

fn tag(f: &mut fmt::Formatter<'_>, op: Operand) -> fmt::Result {
    match op.tag() {
        Some(t) => write!(f, "{:>6}", t.0),
        None => write!(f, "{:>6}", "-"),
    }
}

impl fmt::Display for ReservationStations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RESERVATION STATIONS")?;
        writeln!(
            f,
            "{:>7}{:>6}{:>12}{:>12}{:>12}{:>6}{:>6}{:>6}{:>12}",
            "Name", "Busy", "PC", "Vj", "Vk", "Qj", "Qk", "Dest", "Address"
        )?;
        let mut seen: Vec<StationKind> = Vec::new();
        for (_, station) in self.iter() {
            seen.push(station.kind);
            let n = seen.iter().filter(|k| **k == station.kind).count();
            let name = format!("{}{n}", station.kind);
            let Some(e) = &station.entry else {
                writeln!(
                    f,
                    "{name:>7}{:>6}{:>12}{:>12}{:>12}{:>6}{:>6}{:>6}{:>12}",
                    "no", "-", "-", "-", "-", "-", "-", "-"
                )?;
                continue;
            };
            write!(f, "{name:>7}{:>6}  0x{:08x}", "yes", e.pc)?;
            operand(f, e.vj)?;
            operand(f, e.vk)?;
            tag(f, e.vj)?;
            tag(f, e.vk)?;
            write!(f, "{:>6}", e.dest.0)?;
            match e.address {
                Some(addr) => writeln!(f, "  0x{addr:08x}")?,
                None => writeln!(f, "{:>12}", "-")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        timing_row(f, self.pc, &self.timing)?;
        if self.squashed {
            write!(f, "  squashed")?;
        }
        Ok(())
    }
}

impl fmt::Display for ExecutionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EXECUTION LOG")?;
        writeln!(f, "{TIMING_HEADER}")?;
        for record in self.records() {
            writeln!(f, "{record}")?;
        }
        Ok(())
    }
}

/// In-flight instructions with their stage timestamps, oldest first.
#[derive(Clone, Copy, Debug)]
pub struct Window<'a>(pub &'a Rob);

impl fmt::Display for Window<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PENDING INSTRUCTIONS STATUS")?;
        writeln!(f, "{TIMING_HEADER}")?;
        for (_, entry) in self.0.iter() {
            timing_row(f, entry.pc, &entry.timing)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A byte range of data memory.
#[derive(Clone, Copy, Debug)]
pub struct MemoryView<'a> {
    /// Address of the first byte.
    pub start: u32,
    /// The bytes.
    pub bytes: &'a [u8],
}

impl fmt::Display for MemoryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self.start as usize + self.bytes.len();
        writeln!(f, "DATA MEMORY[0x{:08x}:0x{end:08x}]", self.start)?;
        for (row, chunk) in self.bytes.chunks(4).enumerate() {
            write!(f, "0x{:08x}:", self.start as usize + row * 4)?;
            for byte in chunk {
                write!(f, " {byte:02x}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Window, ROB, stations and registers together.
#[derive(Clone, Copy, Debug)]
pub struct Status<'a>(pub &'a Cpu);

impl fmt::Display for Status<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cpu = self.0;
        writeln!(f, "{}", Window(&cpu.rob))?;
        writeln!(f, "{}", cpu.rob)?;
        writeln!(f, "{}", cpu.stations)?;
        writeln!(f, "GENERAL PURPOSE REGISTERS")?;
        writeln!(f, "{:>8}{:>22}{:>5}", "Register", "Value", "ROB")?;
        write!(f, "{}", cpu.int_regs)?;
        write!(f, "{}", cpu.fp_regs)
    }
}

//! Assembly text parser.
//!
//! Turns a program listing into a [`Program`]. The accepted syntax is one
//! instruction per line:
//!
//! ```text
//! [LABEL:] OPCODE operand operand ...
//! ```
//!
//! Operands are separated by whitespace (commas are accepted too). Text after
//! `#` or `;` is a comment. A label may also stand alone on a line, in which
//! case it names the next instruction.
//!
//! Branch and jump labels resolve to byte offsets relative to the following
//! instruction, `(target - index - 1) << 2`, so the core never sees text.
//!
//! ```
//! use tomsim_core::isa::{asm, Opcode};
//!
//! let program = asm::parse_program("LOOP: SUBI R1 R1 1\nBNEZ R1 LOOP\nEOP\n", 0, 50).unwrap();
//! let branch = program.fetch(4).unwrap();
//! assert_eq!(branch.opcode, Opcode::Bnez);
//! assert_eq!(branch.imm, -8);
//! ```

use std::collections::HashMap;

use crate::common::constants::NUM_REGS;
use crate::common::error::ParseError;
use crate::isa::instruction::Instruction;
use crate::isa::opcode::{OpClass, Opcode, RegFile};
use crate::isa::program::Program;

/// One instruction line before label resolution.
struct SourceLine<'a> {
    line: usize,
    opcode: Opcode,
    operands: Vec<&'a str>,
}

/// Parses `text` into an instruction table of `capacity` slots at `base`.
pub fn parse_program(text: &str, base: u32, capacity: usize) -> Result<Program, ParseError> {
    let (lines, labels) = scan(text)?;
    let mut instructions = Vec::with_capacity(lines.len());
    for (index, src) in lines.iter().enumerate() {
        instructions.push(parse_line(src, index, &labels)?);
    }
    Program::new(base, capacity, instructions)
}

/// First pass: strip comments, split labels, and index instructions.
fn scan(text: &str) -> Result<(Vec<SourceLine<'_>>, HashMap<&str, usize>), ParseError> {
    let mut lines = Vec::new();
    let mut labels = HashMap::new();

    for (n, raw) in text.lines().enumerate() {
        let line = n + 1;
        let code = raw.split(['#', ';']).next().unwrap_or_default();
        let mut tokens = code
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .peekable();

        if let Some(label) = tokens.peek().copied().and_then(|t| t.strip_suffix(':')) {
            if labels.insert(label, lines.len()).is_some() {
                return Err(ParseError::DuplicateLabel {
                    line,
                    label: label.to_string(),
                });
            }
            let _ = tokens.next();
        }

        let Some(mnemonic) = tokens.next() else {
            continue;
        };
        let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| ParseError::UnknownOpcode {
            line,
            token: mnemonic.to_string(),
        })?;
        lines.push(SourceLine {
            line,
            opcode,
            operands: tokens.collect(),
        });
    }
    Ok((lines, labels))
}

fn parse_line(
    src: &SourceLine<'_>,
    index: usize,
    labels: &HashMap<&str, usize>,
) -> Result<Instruction, ParseError> {
    let op = src.opcode;
    let line = src.line;
    let expected = match op.class() {
        OpClass::IntRegister | OpClass::IntImmediate | OpClass::FpAlu => 3,
        OpClass::Memory | OpClass::Branch => 2,
        OpClass::Jump => 1,
        OpClass::End => 0,
    };
    if src.operands.len() != expected {
        return Err(ParseError::OperandCount {
            line,
            opcode: op,
            expected,
            found: src.operands.len(),
        });
    }
    let ops = &src.operands;

    let inst = match op.class() {
        OpClass::IntRegister => Instruction::reg(
            op,
            register(ops[0], RegFile::Int, line)?,
            register(ops[1], RegFile::Int, line)?,
            register(ops[2], RegFile::Int, line)?,
        ),
        OpClass::FpAlu => Instruction::reg(
            op,
            register(ops[0], RegFile::Fp, line)?,
            register(ops[1], RegFile::Fp, line)?,
            register(ops[2], RegFile::Fp, line)?,
        ),
        OpClass::IntImmediate => Instruction::reg_imm(
            op,
            register(ops[0], RegFile::Int, line)?,
            register(ops[1], RegFile::Int, line)?,
            immediate(ops[2], line)?,
        ),
        OpClass::Memory => {
            let data = register(ops[0], op.data_file(), line)?;
            let (offset, base) = memory_operand(ops[1], line)?;
            if op.is_load() {
                Instruction::load(op, data, offset, base)
            } else {
                Instruction::store(op, data, offset, base)
            }
        }
        OpClass::Branch => Instruction::branch(
            op,
            register(ops[0], RegFile::Int, line)?,
            label_offset(ops[1], index, labels, line)?,
        ),
        OpClass::Jump => Instruction::jump(label_offset(ops[0], index, labels, line)?),
        OpClass::End => Instruction::eop(),
    };
    Ok(inst)
}

fn bad(token: &str, line: usize) -> ParseError {
    ParseError::BadOperand {
        line,
        token: token.to_string(),
    }
}

/// Parses `R<n>` or `F<n>` for the expected file.
fn register(token: &str, file: RegFile, line: usize) -> Result<usize, ParseError> {
    let mut chars = token.chars();
    let prefix = chars.next().map(|c| c.to_ascii_uppercase());
    if prefix != Some(file.prefix()) {
        return Err(bad(token, line));
    }
    match chars.as_str().parse::<usize>() {
        Ok(idx) if idx < NUM_REGS => Ok(idx),
        _ => Err(bad(token, line)),
    }
}

/// Parses a decimal or `0x` hexadecimal immediate, optionally signed.
///
/// Values up to `0xFFFF_FFFF` are accepted and wrap into the signed range.
fn immediate(token: &str, line: usize) -> Result<i32, ParseError> {
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16)
    } else {
        digits.parse::<u32>()
    }
    .map_err(|_| bad(token, line))?;

    let value = magnitude as i32;
    Ok(if negative { value.wrapping_neg() } else { value })
}

/// Parses `offset(Rbase)`; an empty offset means zero.
fn memory_operand(token: &str, line: usize) -> Result<(i32, usize), ParseError> {
    let (offset, rest) = token.split_once('(').ok_or_else(|| bad(token, line))?;
    let base = rest.strip_suffix(')').ok_or_else(|| bad(token, line))?;
    let offset = if offset.is_empty() {
        0
    } else {
        immediate(offset, line)?
    };
    Ok((offset, register(base, RegFile::Int, line)?))
}

fn label_offset(
    label: &str,
    index: usize,
    labels: &HashMap<&str, usize>,
    line: usize,
) -> Result<i32, ParseError> {
    let target = labels
        .get(label)
        .copied()
        .ok_or_else(|| ParseError::UndefinedLabel {
            line,
            label: label.to_string(),
        })?;
    Ok((target as i32 - index as i32 - 1) << 2)
}

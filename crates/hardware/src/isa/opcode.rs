//! Opcode set and classification.
//!
//! Every opcode belongs to exactly one [`OpClass`]. The class decides which
//! operands an instruction reads, which register file it writes, and which
//! reservation station pool and execution unit it needs.

use std::fmt;

/// Architectural register file selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegFile {
    /// Integer registers `R0`-`R31` (`R0` reads as zero).
    Int,
    /// Floating-point registers `F0`-`F31`.
    Fp,
}

impl RegFile {
    /// Assembly prefix for registers in this file.
    pub const fn prefix(self) -> char {
        match self {
            Self::Int => 'R',
            Self::Fp => 'F',
        }
    }
}

/// Broad opcode classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpClass {
    /// Loads and stores, integer and floating-point.
    Memory,
    /// Integer register-register arithmetic and logic.
    IntRegister,
    /// Integer register-immediate arithmetic.
    IntImmediate,
    /// Floating-point arithmetic.
    FpAlu,
    /// Conditional branch comparing a register against zero.
    Branch,
    /// Unconditional pc-relative jump.
    Jump,
    /// End-of-program sentinel.
    End,
}

/// Instruction opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Opcode {
    /// Load integer word.
    Lw,
    /// Store integer word.
    Sw,
    /// Integer add.
    Add,
    /// Integer add immediate.
    Addi,
    /// Integer subtract.
    Sub,
    /// Integer subtract immediate.
    Subi,
    /// Bitwise exclusive or.
    Xor,
    /// Bitwise and.
    And,
    /// Integer multiply.
    Mult,
    /// Integer divide (unsigned).
    Div,
    /// Branch if equal to zero.
    Beqz,
    /// Branch if not equal to zero.
    Bnez,
    /// Branch if less than zero.
    Bltz,
    /// Branch if greater than zero.
    Bgtz,
    /// Branch if less than or equal to zero.
    Blez,
    /// Branch if greater than or equal to zero.
    Bgez,
    /// Unconditional jump.
    Jump,
    /// End of program.
    #[default]
    Eop,
    /// Load floating-point word.
    Lws,
    /// Store floating-point word.
    Sws,
    /// Floating-point add.
    Adds,
    /// Floating-point subtract.
    Subs,
    /// Floating-point multiply.
    Mults,
    /// Floating-point divide.
    Divs,
}

impl Opcode {
    /// Every opcode, in encoding order.
    pub const ALL: [Self; 24] = [
        Self::Lw,
        Self::Sw,
        Self::Add,
        Self::Addi,
        Self::Sub,
        Self::Subi,
        Self::Xor,
        Self::And,
        Self::Mult,
        Self::Div,
        Self::Beqz,
        Self::Bnez,
        Self::Bltz,
        Self::Bgtz,
        Self::Blez,
        Self::Bgez,
        Self::Jump,
        Self::Eop,
        Self::Lws,
        Self::Sws,
        Self::Adds,
        Self::Subs,
        Self::Mults,
        Self::Divs,
    ];

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Lw => "LW",
            Self::Sw => "SW",
            Self::Add => "ADD",
            Self::Addi => "ADDI",
            Self::Sub => "SUB",
            Self::Subi => "SUBI",
            Self::Xor => "XOR",
            Self::And => "AND",
            Self::Mult => "MULT",
            Self::Div => "DIV",
            Self::Beqz => "BEQZ",
            Self::Bnez => "BNEZ",
            Self::Bltz => "BLTZ",
            Self::Bgtz => "BGTZ",
            Self::Blez => "BLEZ",
            Self::Bgez => "BGEZ",
            Self::Jump => "JUMP",
            Self::Eop => "EOP",
            Self::Lws => "LWS",
            Self::Sws => "SWS",
            Self::Adds => "ADDS",
            Self::Subs => "SUBS",
            Self::Mults => "MULTS",
            Self::Divs => "DIVS",
        }
    }

    /// Looks up an opcode by mnemonic, ignoring ASCII case.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(text))
    }

    /// Opcode class.
    pub const fn class(self) -> OpClass {
        match self {
            Self::Lw | Self::Sw | Self::Lws | Self::Sws => OpClass::Memory,
            Self::Add | Self::Sub | Self::Xor | Self::And | Self::Mult | Self::Div => {
                OpClass::IntRegister
            }
            Self::Addi | Self::Subi => OpClass::IntImmediate,
            Self::Adds | Self::Subs | Self::Mults | Self::Divs => OpClass::FpAlu,
            Self::Beqz | Self::Bnez | Self::Bltz | Self::Bgtz | Self::Blez | Self::Bgez => {
                OpClass::Branch
            }
            Self::Jump => OpClass::Jump,
            Self::Eop => OpClass::End,
        }
    }

    /// True for `LW` and `LWS`.
    pub const fn is_load(self) -> bool {
        matches!(self, Self::Lw | Self::Lws)
    }

    /// True for `SW` and `SWS`.
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Sw | Self::Sws)
    }

    /// True for loads and stores.
    pub const fn is_memory(self) -> bool {
        matches!(self.class(), OpClass::Memory)
    }

    /// True for conditional branches and the unconditional jump.
    pub const fn is_control(self) -> bool {
        matches!(self.class(), OpClass::Branch | OpClass::Jump)
    }

    /// True for floating-point arithmetic.
    pub const fn is_fp_alu(self) -> bool {
        matches!(self.class(), OpClass::FpAlu)
    }

    /// Register file a load writes or a store reads its data from.
    ///
    /// Addresses are always formed from an integer base register.
    pub const fn data_file(self) -> RegFile {
        match self {
            Self::Lws | Self::Sws | Self::Adds | Self::Subs | Self::Mults | Self::Divs => {
                RegFile::Fp
            }
            _ => RegFile::Int,
        }
    }

    /// Register file written at commit, if the opcode writes a register.
    pub const fn dest_file(self) -> Option<RegFile> {
        match self.class() {
            OpClass::IntRegister | OpClass::IntImmediate => Some(RegFile::Int),
            OpClass::FpAlu => Some(RegFile::Fp),
            OpClass::Memory if self.is_load() => Some(self.data_file()),
            _ => None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

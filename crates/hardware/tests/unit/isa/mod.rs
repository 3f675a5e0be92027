pub mod asm;
pub mod disasm;
pub mod program;

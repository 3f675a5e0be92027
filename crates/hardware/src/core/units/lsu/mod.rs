//! Load/Store Unit (LSU).
//!
//! Loads and stores execute in two phases. The address phase runs on an
//! address unit and computes `base + offset`. The memory phase differs:
//! 1. **Loads:** read memory through a Memory unit, or take an older store's
//!    data through an address unit when [`forwarding`] finds a match.
//! 2. **Stores:** never touch memory while speculative. The write happens on a
//!    Memory unit once the store is the oldest instruction in the ROB.

/// Store-to-load forwarding and memory ordering checks.
pub mod forwarding;

pub use forwarding::{ForwardResult, check_older_stores, ranges_overlap};

/// Effective address `base + offset`, wrapping at 32 bits.
#[inline]
pub const fn effective_address(base: u32, offset: i32) -> u32 {
    base.wrapping_add(offset as u32)
}

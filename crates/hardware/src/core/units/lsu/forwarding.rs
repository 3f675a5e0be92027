//! Store-to-load forwarding.
//!
//! A load whose address is known checks the older stores still in the ROB,
//! youngest first, before it may read memory:
//! 1. **Unknown address:** an older store that has not computed its address
//!    might alias the load, so the load stalls.
//! 2. **Exact match:** the youngest older store to the same word supplies the
//!    value once it has broadcast its data (the load stalls until then).
//! 3. **Partial overlap:** a store covering only some of the load's bytes
//!    stalls the load until it leaves the ROB.
//! 4. **No match:** the load reads memory.
//!
//! Loads never wait for older loads, and stores never need to check younger
//! loads because memory is only written at commit.

use crate::common::constants::WORD_BYTES;
use crate::core::pipeline::rob::{Rob, RobTag};

/// Result of the store-to-load forwarding check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardResult {
    /// An older store to the same word holds the value.
    Hit {
        /// Store data.
        value: u32,
        /// First cycle the load may consume it (the cycle after the store's broadcast).
        visible_at: u64,
    },
    /// No older store can alias the load; read memory.
    Miss,
    /// An older store may alias the load; retry next cycle.
    Stall,
}

/// True if the word accesses at `a` and `b` share any byte.
#[inline]
pub const fn ranges_overlap(a: u32, b: u32) -> bool {
    a.abs_diff(b) < WORD_BYTES as u32
}

/// Checks the stores older than `load` for one that aliases `address`.
pub fn check_older_stores(rob: &Rob, load: RobTag, address: u32) -> ForwardResult {
    for tag in rob.older_than(load) {
        let Some(entry) = rob.get(tag) else {
            continue;
        };
        if !entry.inst.opcode.is_store() {
            continue;
        }
        let Some(store_addr) = entry.address else {
            return ForwardResult::Stall;
        };
        if store_addr == address {
            return match (entry.ready, entry.timing.write_result) {
                (true, Some(wr)) => ForwardResult::Hit {
                    value: entry.value,
                    visible_at: wr + 1,
                },
                _ => ForwardResult::Stall,
            };
        }
        if ranges_overlap(store_addr, address) {
            return ForwardResult::Stall;
        }
    }
    ForwardResult::Miss
}

//! Common Data Bus (CDB).
//!
//! A completed result is published once per producer per cycle. The ROB slot
//! named by the tag is updated first, then every reservation station operand
//! waiting on that tag captures the value. Captured values become usable for
//! dispatch only in the following cycle.

use tracing::trace;

use crate::common::error::{Reference, SimError};
use crate::core::pipeline::reservation::ReservationStations;
use crate::core::pipeline::rob::{Rob, RobTag};

/// One (tag, value) pair published on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Broadcast {
    /// Producer ROB slot.
    pub tag: RobTag,
    /// Result value.
    pub value: u32,
}

/// The bus, with the broadcasts made in the current cycle.
#[derive(Clone, Debug, Default)]
pub struct CommonDataBus {
    cycle: u64,
    broadcasts: Vec<Broadcast>,
}

impl CommonDataBus {
    /// Creates an idle bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new cycle, forgetting the previous cycle's broadcasts.
    pub fn begin_cycle(&mut self, now: u64) {
        self.cycle = now;
        self.broadcasts.clear();
    }

    /// Broadcasts made in the current cycle.
    pub fn broadcasts(&self) -> &[Broadcast] {
        &self.broadcasts
    }

    /// Publishes `value` for `tag` in cycle `now`.
    ///
    /// Fails with an invalid tag reference, writing nothing, if `tag` does not
    /// name an in-flight instruction. A second broadcast for the same tag in
    /// one cycle is dropped.
    pub fn write(
        &mut self,
        rob: &mut Rob,
        stations: &mut ReservationStations,
        tag: RobTag,
        value: u32,
        now: u64,
    ) -> Result<(), SimError> {
        if self.broadcasts.iter().any(|b| b.tag == tag) {
            return Ok(());
        }
        if !rob.complete(tag, value, now) {
            return Err(Reference::Tag(tag.0).into());
        }
        let captured = stations.broadcast(tag, value, now + 1);
        self.broadcasts.push(Broadcast { tag, value });
        trace!(tag = tag.0, value = format_args!("{value:#x}"), captured, "cdb");
        Ok(())
    }
}

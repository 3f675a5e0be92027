//! Pipeline stage implementations.
//!
//! One handler per Tomasulo stage. The engine calls them in reverse pipeline
//! order each cycle so that resources a later stage frees are visible to an
//! earlier stage on the same clock edge:
//! 1. **Commit:** Retires the ROB head; performs deferred store writes; squashes on misprediction.
//! 2. **Write-Result:** Publishes finished results on the CDB and frees their stations.
//! 3. **Execute:** Dispatches ready stations to units and advances unit latencies.
//! 4. **Issue:** Moves instructions into the ROB and reservation stations.

/// Commit stage implementation.
pub mod commit;

/// Execute stage implementation.
pub mod execute;

/// Issue stage implementation.
pub mod issue;

/// Write-Result stage implementation.
pub mod writeback;

/// Commit stage entry point.
pub use commit::commit_stage;
/// Execute stage entry point.
pub use execute::execute_stage;
/// Issue stage entry point.
pub use issue::issue_stage;
/// Write-Result stage entry point.
pub use writeback::write_result_stage;

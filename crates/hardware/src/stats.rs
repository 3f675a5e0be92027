//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the Tomasulo pipeline. It provides:
//! 1. **Cycle and IPC:** Total cycles, committed instructions, and derived IPC/CPI.
//! 2. **Instruction mix:** Commit counts by class (integer, FP, load, store, branch).
//! 3. **Control flow:** Branch mispredictions (full pipeline squashes).
//! 4. **Memory ordering:** Store-to-load forwards and loads held back by older stores.
//! 5. **Stalls:** Issue stalls caused by a full ROB or a full station pool.

use std::fmt::Write as _;

use serde::Serialize;

/// Simulation statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Clock cycles elapsed.
    pub cycles: u64,
    /// Instructions committed.
    pub instructions_executed: u64,

    /// Integer ALU instructions committed.
    pub inst_int: u64,
    /// Floating-point ALU instructions committed.
    pub inst_fp: u64,
    /// Loads committed (integer and FP).
    pub inst_load: u64,
    /// Stores committed (integer and FP).
    pub inst_store: u64,
    /// Branches and jumps committed.
    pub inst_branch: u64,

    /// Branches whose target was not the fall-through path.
    pub branch_mispredictions: u64,

    /// Loads satisfied by an older in-flight store.
    pub forwarded_loads: u64,
    /// Cycles a load with a known address was held back by an older store.
    pub stalls_memory_order: u64,

    /// Issue attempts refused because the ROB was full.
    pub stalls_rob_full: u64,
    /// Issue attempts refused because no matching station was free.
    pub stalls_station_full: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"branch"`, `"stalls"`.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "branch", "stalls"];

const RULE: &str = "----------------------------------------------------------";
const BANNER: &str = "==========================================================";

impl SimStats {
    /// Instructions per cycle; zero before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_executed as f64 / self.cycles as f64
        }
    }

    /// Renders the requested sections; an empty slice renders all of them.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_executed.max(1) as f64;
        let pct = |n: u64, total: f64| (n as f64 / total) * 100.0;
        let mut out = String::new();

        let _ = writeln!(out, "{BANNER}");
        let _ = writeln!(out, "TOMASULO PIPELINE STATISTICS");
        let _ = writeln!(out, "{BANNER}");
        if want("summary") {
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_executed);
            let _ = writeln!(out, "sim_ipc                  {:.4}", self.ipc());
            let _ = writeln!(out, "sim_cpi                  {:.4}", cyc / instr);
            let _ = writeln!(out, "{RULE}");
        }
        if want("instruction_mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, n) in [
                ("op.int", self.inst_int),
                ("op.fp", self.inst_fp),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
            ] {
                let _ = writeln!(out, "  {name:<21}{n} ({:.2}%)", pct(n, instr));
            }
            let _ = writeln!(out, "{RULE}");
        }
        if want("branch") {
            let _ = writeln!(out, "CONTROL FLOW");
            let _ = writeln!(out, "  branch.committed     {}", self.inst_branch);
            let _ = writeln!(out, "  branch.mispredicts   {}", self.branch_mispredictions);
            let _ = writeln!(out, "{RULE}");
        }
        if want("stalls") {
            let _ = writeln!(out, "STALLS AND FORWARDING");
            let _ = writeln!(
                out,
                "  stalls.rob_full      {} ({:.2}%)",
                self.stalls_rob_full,
                pct(self.stalls_rob_full, cyc)
            );
            let _ = writeln!(
                out,
                "  stalls.station_full  {} ({:.2}%)",
                self.stalls_station_full,
                pct(self.stalls_station_full, cyc)
            );
            let _ = writeln!(out, "  stalls.mem_order     {}", self.stalls_memory_order);
            let _ = writeln!(out, "  loads.forwarded      {}", self.forwarded_loads);
        }
        let _ = writeln!(out, "{BANNER}");
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

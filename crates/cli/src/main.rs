//! Tomasulo pipeline simulator CLI.
//!
//! This binary is a thin host around `tomsim_core`. It performs:
//! 1. **Run:** Builds a simulator from a JSON configuration, loads an assembly
//!    program, applies memory pokes, runs it, and prints the requested reports.
//! 2. **Default config:** Prints the default configuration, with a standard
//!    unit set, as a starting point for a configuration file.

use std::path::PathBuf;
use std::{fs, process};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tomsim_core::config::Config;
use tomsim_core::stats::SimStats;
use tomsim_core::{RunStatus, SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "tomsim",
    author,
    version,
    about = "Tomasulo out-of-order pipeline simulator",
    long_about = "Run an assembly program on a cycle-accurate Tomasulo pipeline with a reorder buffer.\n\nExamples:\n  tomsim run loop.s --poke 0x10=42 --memory 0x10:0x20 --log\n  tomsim run loop.s --config wide.json --cycles 100 --status\n  tomsim default-config > sim.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an assembly program.
    Run {
        /// Assembly listing to execute.
        program: PathBuf,

        /// JSON configuration; defaults to the standard unit set.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Instruction table base address (overrides the configuration).
        #[arg(long, value_parser = parse_u32)]
        base: Option<u32>,

        /// Stop after this many cycles (0 runs to completion).
        #[arg(long, default_value_t = 0)]
        cycles: u64,

        /// Store a word before running, as ADDR=VALUE (repeatable).
        #[arg(long, value_parser = parse_poke)]
        poke: Vec<(u32, u32)>,

        /// Dump data memory in START:END after the run.
        #[arg(long, value_parser = parse_range)]
        memory: Option<(u32, u32)>,

        /// Print the final window, ROB, stations and registers.
        #[arg(long)]
        status: bool,

        /// Print the execution log.
        #[arg(long)]
        log: bool,

        /// Print statistics as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Emit per-stage trace events from the core.
        #[arg(long)]
        trace: bool,
    },

    /// Print the default configuration as JSON.
    DefaultConfig,
}

/// Machine-readable run summary.
#[derive(Serialize)]
struct Report<'a> {
    completed: bool,
    ipc: f64,
    stats: &'a SimStats,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            program,
            config,
            base,
            cycles,
            poke,
            memory,
            status,
            log,
            json,
            trace,
        } => {
            init_tracing(trace);
            cmd_run(RunArgs {
                program,
                config,
                base,
                cycles,
                poke,
                memory,
                status,
                log,
                json,
            })
        }
        Commands::DefaultConfig => cmd_default_config(),
    };

    if let Err(e) = result {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("warn,tomsim_core=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct RunArgs {
    program: PathBuf,
    config: Option<PathBuf>,
    base: Option<u32>,
    cycles: u64,
    poke: Vec<(u32, u32)>,
    memory: Option<(u32, u32)>,
    status: bool,
    log: bool,
    json: bool,
}

/// Builds, loads, runs, and reports.
fn cmd_run(args: RunArgs) -> Result<(), SimError> {
    let mut config = match &args.config {
        Some(path) => Config::from_json(&fs::read_to_string(path)?)?,
        None => Config::default().with_standard_units(),
    };
    if let Some(base) = args.base {
        config.general.instr_base_address = base;
    }

    let mut sim = Simulator::new(&config)?;
    sim.load_program_file(&args.program)?;
    info!(
        program = %args.program.display(),
        instructions = sim.program().len(),
        "program loaded"
    );
    for (addr, value) in &args.poke {
        sim.write_memory(*addr, *value)?;
    }

    let outcome = sim.run(args.cycles)?;

    if args.json {
        let report = Report {
            completed: outcome == RunStatus::Completed,
            ipc: sim.ipc(),
            stats: sim.stats(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if outcome == RunStatus::CycleLimit {
            println!("[*] Stopped after {} cycles", sim.clock_cycles());
        }
        sim.stats().print();
    }
    if args.log {
        println!("{}", sim.log());
    }
    if args.status {
        println!("{}", sim.status());
    }
    if let Some((start, end)) = args.memory {
        println!("{}", sim.memory_view(start, end)?);
    }
    Ok(())
}

fn cmd_default_config() -> Result<(), SimError> {
    let config = Config::default().with_standard_units();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Parses a decimal or `0x`-prefixed hexadecimal address or value.
fn parse_u32(text: &str) -> Result<u32, String> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|e| format!("`{text}`: {e}"))
}

fn parse_poke(text: &str) -> Result<(u32, u32), String> {
    let (addr, value) = text
        .split_once('=')
        .ok_or_else(|| format!("`{text}`: expected ADDR=VALUE"))?;
    Ok((parse_u32(addr)?, parse_u32(value)?))
}

fn parse_range(text: &str) -> Result<(u32, u32), String> {
    let (start, end) = text
        .split_once(':')
        .ok_or_else(|| format!("`{text}`: expected START:END"))?;
    Ok((parse_u32(start)?, parse_u32(end)?))
}

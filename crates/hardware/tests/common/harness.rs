use tomsim_core::config::{Config, UnitKind};
use tomsim_core::sim::{RunStatus, Simulator};
use tracing_subscriber::EnvFilter;

/// Upper bound on cycles for scenarios expected to terminate.
pub const CYCLE_BUDGET: u64 = 10_000;

pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Default sizes with one unit of every kind.
    pub fn new() -> Self {
        Self::with_config(Config::default().with_standard_units())
    }

    /// Default sizes with a single one-cycle integer unit.
    pub fn integer_only() -> Self {
        let mut ctx = Self::with_config(Config::default());
        ctx.sim
            .init_exec_unit(UnitKind::Integer, 1, 1)
            .expect("integer unit");
        ctx
    }

    pub fn with_config(config: Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
        let sim = Simulator::new(&config).expect("valid test configuration");
        Self { sim }
    }

    /// Loads an assembly listing.
    pub fn program(mut self, text: &str) -> Self {
        self.sim.load_program_str(text).expect("program parses");
        self
    }

    /// Stores a word before the run.
    pub fn poke(mut self, addr: u32, value: u32) -> Self {
        self.sim.write_memory(addr, value).expect("poke in range");
        self
    }

    /// Runs to completion within [`CYCLE_BUDGET`].
    pub fn run(&mut self) -> &mut Self {
        let status = self.sim.run(CYCLE_BUDGET).expect("run succeeds");
        assert_eq!(status, RunStatus::Completed, "program did not finish");
        self
    }

    /// Ticks until `done` holds, failing after [`CYCLE_BUDGET`] cycles.
    pub fn tick_until(&mut self, mut done: impl FnMut(&Simulator) -> bool) {
        for _ in 0..CYCLE_BUDGET {
            self.sim.tick().expect("tick succeeds");
            if done(&self.sim) {
                return;
            }
        }
        panic!("condition not reached within {CYCLE_BUDGET} cycles");
    }

    /// Integer register value.
    pub fn int(&self, reg: usize) -> u32 {
        self.sim.get_int_register(reg).expect("register in range")
    }

    /// Floating-point register value.
    pub fn fp(&self, reg: usize) -> f32 {
        self.sim.get_fp_register(reg).expect("register in range")
    }

    /// Every register tag in both files is clear.
    pub fn all_tags_clear(&self) -> bool {
        (0..32).all(|r| {
            self.sim.get_int_register_tag(r).expect("in range").is_none()
                && self.sim.get_fp_register_tag(r).expect("in range").is_none()
        })
    }
}

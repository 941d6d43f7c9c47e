use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, info};

use npc_sim::simulation::{
    AgentStore, BoundaryPolicies, BoundaryPolicy, Command, DuckDbStore, MemoryStore, Session,
    SimConfig, TickInput, DEFAULT_HEIGHT, DEFAULT_INITIAL_AGENTS, DEFAULT_WIDTH,
};

#[derive(Parser)]
#[command(name = "npc_sim")]
#[command(about = "Zoned NPC simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "600")]
    ticks: u64,

    /// World width in world units
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// World height in world units
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Agents to create when the store has none
    #[arg(long, default_value_t = DEFAULT_INITIAL_AGENTS)]
    agents: usize,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated milliseconds per tick
    #[arg(long, default_value = "33")]
    tick_ms: u64,

    /// Simulated seconds between periodic saves (0 disables them)
    #[arg(long, default_value = "5.0")]
    save_interval: f64,

    /// DuckDB database file holding the agents
    #[arg(long, default_value = "npc_sim.duckdb")]
    db: String,

    /// Keep agents in memory only
    #[arg(long)]
    memory: bool,

    /// Boundary handling for agents heading to a zone
    #[arg(long, value_enum, default_value = "clamp")]
    seek_boundary: BoundaryArg,

    /// Boundary handling for wandering agents
    #[arg(long, value_enum, default_value = "clamp")]
    roam_boundary: BoundaryArg,

    /// Per-tick chance that a wandering agent nudges its heading
    #[arg(long, default_value = "0.0")]
    roam_jitter: f64,

    /// Print the ASCII map with each progress report in headless mode
    #[arg(long)]
    map: bool,

    /// Pace headless ticks at the tick rate instead of running flat out
    #[arg(long)]
    realtime: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum BoundaryArg {
    Clamp,
    Reflect,
}

impl From<BoundaryArg> for BoundaryPolicy {
    fn from(arg: BoundaryArg) -> Self {
        match arg {
            BoundaryArg::Clamp => BoundaryPolicy::Clamp,
            BoundaryArg::Reflect => BoundaryPolicy::Reflect,
        }
    }
}

impl Cli {
    fn sim_config(&self) -> Result<SimConfig> {
        let save_interval = Duration::try_from_secs_f64(self.save_interval)
            .context("--save-interval must be a non-negative number of seconds")?;
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.roam_jitter),
            "--roam-jitter must be between 0 and 1"
        );

        Ok(SimConfig {
            width: self.width,
            height: self.height,
            initial_agents: self.agents,
            seed: self.seed,
            tick_duration: Duration::from_millis(self.tick_ms.max(1)),
            save_interval,
            boundaries: BoundaryPolicies {
                seeking: self.seek_boundary.into(),
                roaming: self.roam_boundary.into(),
            },
            roam_jitter_chance: self.roam_jitter,
        })
    }

    /// DuckDB store, or an in-memory one when asked for or when the file
    /// can't be opened
    fn open_store(&self) -> Box<dyn AgentStore + Send> {
        if self.memory {
            return Box::new(MemoryStore::new());
        }
        match DuckDbStore::open(&self.db) {
            Ok(store) => {
                info!("Using agent store {}", self.db);
                Box::new(store)
            }
            Err(err) => {
                error!(
                    "Could not open agent store {}: {}. Continuing in memory",
                    self.db, err
                );
                Box::new(MemoryStore::new())
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.sim_config()?;

    if cli.ui {
        return run_ui(&cli, config);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,npc_sim=info"))
        .init();
    let store = cli.open_store();
    run_headless(&config, store, cli.ticks, cli.map, cli.realtime)
}

#[cfg(feature = "ui")]
fn run_ui(cli: &Cli, config: SimConfig) -> Result<()> {
    println!("Starting NPC Sim UI...");
    println!();
    println!("Controls:");
    println!("  W/A/S/D, arrows  - Move player");
    println!("  Mouse            - Aim player");
    println!("  N                - Add agent");
    println!("  Backspace/Delete - Remove last agent");
    println!("  Q/ESC            - Save and exit");
    println!();

    npc_sim::ui::run_with_ui(config, cli.open_store())
}

#[cfg(not(feature = "ui"))]
fn run_ui(_cli: &Cli, _config: SimConfig) -> Result<()> {
    anyhow::bail!("UI feature is not enabled. Rebuild with --features ui")
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(
    config: &SimConfig,
    store: Box<dyn AgentStore + Send>,
    ticks: u64,
    show_map: bool,
    realtime: bool,
) -> Result<()> {
    println!("Running NPC simulation in headless mode...");
    println!(
        "Ticks: {}, Tick: {}ms",
        ticks,
        config.tick_duration.as_millis()
    );
    println!();

    let mut session = Session::start(config, store).context("Failed to build the world")?;
    let ticks_per_second = session.clock().ticks_per_second();

    println!("Initial state:");
    session.print_summary();
    session.world().draw_map();

    let idle = TickInput::idle();
    for tick in 1..=ticks {
        session.step(&idle);

        if tick % ticks_per_second == 0 {
            let counts = session
                .world()
                .state_counts()
                .iter()
                .map(|(state, count)| format!("{}={}", state.label(), count))
                .collect::<Vec<_>>()
                .join(" ");
            info!(
                "After tick {} ({:.1}s simulated): {} agents, {}",
                tick,
                session.clock().elapsed().as_secs_f32(),
                session.world().agents.len(),
                counts
            );
            if show_map {
                session.world().draw_map();
            }
        }

        if realtime {
            std::thread::sleep(config.tick_duration);
        }
    }

    session.step(&TickInput::with_command(Command::Quit));

    let stats = session.stats();
    info!("=== SIMULATION COMPLETE ===");
    info!("Ticks run: {}", session.clock().ticks());
    info!("Active agents: {}", session.world().agents.len());
    info!("Agents restored: {}", stats.agents_restored);
    info!("Records rejected: {}", stats.records_rejected);
    info!("Saves: {}", stats.saves);
    info!("Failed saves: {}", stats.failed_saves);

    println!("=== Final State ===");
    session.print_summary();
    session.world().draw_map();
    Ok(())
}

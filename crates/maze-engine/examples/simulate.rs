//! Maze simulation: explore a random maze, persist it, and replay the fast run.
//!
//! Demonstrates:
//!   1. Loading a `NavConfig` from TOML (or using the defaults)
//!   2. Generating a seeded perfect maze and a simulated vehicle
//!   3. Running the controller through Exploring, GoalReached and FastRun
//!   4. Starting a second run from the persisted map
//!   5. Rendering the discovered map and reporting metrics
//!
//! Run with:
//!   cargo run -p maze-engine --example simulate [config.toml] [seed]
//!
//! Set `RUST_LOG=maze_engine=debug` to trace every control cycle.

use std::error::Error;

use maze_core::{Pose, RunPhase};
use maze_engine::{Hardware, NavConfig, RunController, RunError, RunReport};
use maze_grid::render_ascii;
use maze_test_utils::{MazeLayout, MemoryStorage, SimRobot};

// ─── Defaults ───────────────────────────────────────────────────

const DEFAULT_SEED: u64 = 42;

// ─── Configuration ──────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<NavConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(NavConfig::from_toml_str(&text)?)
        }
        None => Ok(NavConfig::default()),
    }
}

// ─── One run against the simulator ──────────────────────────────

/// Run to completion, printing the map as known at the end. A fast run
/// trusts the explored map, so it can stall on a wall exploration never saw.
fn run_once(
    config: &NavConfig,
    layout: &MazeLayout,
    storage: &mut MemoryStorage,
) -> Result<Option<RunReport>, Box<dyn Error>> {
    let start = Pose::new(config.start, config.start_heading);
    let sim = SimRobot::new(layout.clone(), start);
    let hardware = Hardware {
        ranger: sim.ranger(),
        drive: sim.drive(),
        odometry: sim.odometry(),
        gyro: sim.gyro(),
        storage,
        clock: sim.clock(),
    };

    let mut controller = RunController::new(config.clone(), hardware)?;
    let outcome = controller.run();
    println!(
        "  simulated time: {:.2} s, restarts: {}",
        sim.now_us() as f64 / 1e6,
        sim.restart_count()
    );
    println!("  {}", controller.metrics());
    println!();
    println!("{}", render_ascii(controller.grid(), Some(controller.pose())));

    match outcome {
        Ok(report) => Ok(Some(report)),
        Err(e @ RunError::Motion(_)) if controller.phase() == RunPhase::FastRun => {
            println!("  fast run stopped: {e}");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let config = load_config(args.next().as_deref())?;
    let seed = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => DEFAULT_SEED,
    };

    let layout = MazeLayout::random_perfect(config.side, seed)?;
    let mut storage = MemoryStorage::new(config.storage.required_capacity(config.side));

    println!("maze: {0}x{0}, seed {seed}", config.side);
    println!("start {} -> goal {}", config.start, config.goal);
    println!();
    println!("{}", render_ascii(layout.grid(), None));

    // ─── First run: explore, save, fast run ─────────────────────

    println!("run 1");
    let first = run_once(&config, &layout, &mut storage)?;
    println!("  storage writes: {}", storage.write_count());
    println!();

    if first.is_none() {
        println!("skipping run 2: the persisted map would stall again");
        return Ok(());
    }

    // ─── Second run: reuse the persisted map ────────────────────

    let writes_before = storage.write_count();
    println!("run 2");
    if let Some(second) = run_once(&config, &layout, &mut storage)? {
        println!(
            "  storage writes: {}",
            storage.write_count() - writes_before
        );
        if second.metrics.from_persisted_map {
            println!(
                "  skipped exploration; fast run took {} cells",
                second.metrics.fast_run_cells
            );
        }
    }
    Ok(())
}

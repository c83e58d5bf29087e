use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use wrongway_sim::simulation::{export_detections, SimConfig, SimWorld};

#[derive(Parser)]
#[command(name = "wrongway_sim")]
#[command(about = "Wrong-way vehicle detection simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "1800")]
    ticks: u32,

    /// Wall-clock pause after each headless tick, in milliseconds
    #[arg(long, default_value = "16")]
    frame_ms: u64,

    /// Print a summary and map every N ticks (0 disables)
    #[arg(long, default_value = "300")]
    summary_every: u32,

    /// Skip the ASCII camera feed in summaries
    #[arg(long)]
    no_map: bool,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding simulation parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the chance that a spawned vehicle drives the wrong way
    #[arg(long)]
    wrong_way_rate: Option<f64>,

    /// Override the live vehicle cap
    #[arg(long)]
    max_vehicles: Option<usize>,

    /// Directory to write vehicle_detections_log.json into when the run ends
    /// (the UI writes there when E is pressed)
    #[arg(long)]
    export: Option<PathBuf>,
}

impl Cli {
    fn sim_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_json_file(path)?,
            None => SimConfig::default(),
        };
        if let Some(rate) = self.wrong_way_rate {
            config.wrong_way_probability = rate;
        }
        if let Some(max) = self.max_vehicles {
            config.max_vehicles = max;
        }
        config.validate().context("Invalid simulation parameters")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.sim_config()?;

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(config, cli.seed, cli.export.clone())
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    } else {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("warn,wrongway_sim=info"),
        )
        .init();
        run_headless(&cli, config)
    }
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli, config: SimConfig) -> Result<()> {
    println!("Running wrong-way detection simulation in headless mode...");
    println!("Ticks: {}, Frame pause: {}ms", cli.ticks, cli.frame_ms);
    println!();

    let mut world = SimWorld::with_config(config, cli.seed)?;
    let mut ctx = world.new_context(Instant::now());
    ctx.start(Instant::now());
    info!("=== SIMULATION STARTED ===");

    for tick in 1..=cli.ticks {
        world.tick(&mut ctx, Instant::now());

        if cli.summary_every > 0 && tick % cli.summary_every == 0 {
            println!("--- After tick {} ---", tick);
            world.print_summary();
            if !cli.no_map {
                world.draw_map();
            }
            println!();
        }

        if cli.frame_ms > 0 {
            std::thread::sleep(Duration::from_millis(cli.frame_ms));
        }
    }
    ctx.stop();

    println!("=== Final State ===");
    world.print_summary();

    let stats = &world.stats;
    info!("=== SIMULATION COMPLETE ===");
    info!("Ticks processed: {}", ctx.total_ticks());
    info!("Total vehicles: {}", stats.total_vehicles);
    info!("Wrong-way vehicles: {}", stats.wrong_way_vehicles);
    info!("Plates recognized: {}", stats.plates_recognized);
    info!("Live vehicles: {}", world.vehicles.len());
    info!("Alerts in log: {}", world.alerts.len());
    info!("Detections in log: {}", world.recent_detections.len());
    info!("Last FPS: {}", stats.fps);
    info!("Wrong-way rate: {:.1}%", stats.wrong_way_rate());
    info!("Plate read rate: {:.1}%", stats.plate_read_rate());

    if let Some(dir) = &cli.export {
        let path = export_detections(&world, dir)?;
        println!("Detections written to {}", path.display());
    }

    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(config: SimConfig, seed: Option<u64>, export_dir: Option<PathBuf>) -> Result<()> {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;
    use wrongway_sim::ui;

    let world = SimWorld::with_config(config, seed)?;

    println!("Starting Wrong-Way Detection UI...");
    println!();
    println!("Controls:");
    println!("  Space  - Start / pause");
    println!("  R      - Reset");
    println!("  E      - Export detection log");
    println!("  ESC    - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,wrongway_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Smart Wrong-Way Vehicle Detection System".into(),
                        resolution: (ui::WINDOW_WIDTH, ui::WINDOW_HEIGHT).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(ui::WrongWayUIPlugin {
            world,
            export_dir: export_dir.unwrap_or_else(|| PathBuf::from(".")),
        })
        .run();

    Ok(())
}

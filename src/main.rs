mod simulation;

#[cfg(feature = "ui")]
mod ui;

use anyhow::Result;
use clap::Parser;

use simulation::{SimConfig, SimWorld};

#[derive(Parser)]
#[command(name = "freight_sim")]
#[command(about = "Tile-grid freight simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "1000")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.1")]
    delta: f32,

    /// Seed for reproducible world generation
    #[arg(long)]
    seed: Option<u64>,

    /// Grid width in tiles
    #[arg(long, default_value = "32")]
    width: i32,

    /// Grid height in tiles
    #[arg(long, default_value = "32")]
    height: i32,

    /// Number of producers to place
    #[arg(long, default_value = "3")]
    producers: usize,

    /// Number of consumers to place
    #[arg(long, default_value = "6")]
    consumers: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Bevy installs its own logger when the UI runs
    if !cli.ui {
        env_logger::init();
    }

    let config = SimConfig {
        grid_width: cli.width,
        grid_height: cli.height,
        producer_count: cli.producers,
        consumer_count: cli.consumers,
        ..SimConfig::default()
    };

    let mut world = match cli.seed {
        Some(seed) => SimWorld::generate_with_seed(config, seed)?,
        None => SimWorld::generate(config)?,
    };

    for event in world.establish_associations() {
        log::debug!("{:?}", event);
    }

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(world);
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    } else {
        run_headless(&mut world, cli.ticks, cli.delta);
    }

    Ok(())
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(world: &mut SimWorld, ticks: u32, delta: f32) {
    println!("Running freight simulation in headless mode...");
    println!("Ticks: {}, Delta: {}s", ticks, delta);

    // Calculate how many ticks equal 1 second of simulation time
    let ticks_per_second = (1.0 / delta).ceil() as u32;
    println!("Running {} ticks per second (simulated time)", ticks_per_second);
    println!();

    println!("Initial state:");
    world.print_summary();
    world.draw_map();
    println!();

    // Run simulation
    let mut tick = 0;
    while tick < ticks {
        // Run ticks_per_second ticks (or remaining ticks if fewer)
        let ticks_to_run = ticks_per_second.min(ticks - tick);

        for _ in 0..ticks_to_run {
            tick += 1;
            for event in world.tick(delta) {
                log::debug!("{:?}", event);
            }
        }

        // Print summary after running 1 second worth of ticks
        println!(
            "--- After tick {} ({:.1}s simulated time) ---",
            tick,
            tick as f32 * delta
        );
        world.print_summary();
        world.draw_map();
        println!();

        if tick < ticks {
            std::thread::sleep(std::time::Duration::from_millis(500));
        }
    }

    println!("=== Final State ===");
    world.print_summary();
    world.draw_map();
}

#[cfg(feature = "ui")]
fn run_with_ui(world: SimWorld) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    println!("Starting Freight Sim UI...");
    println!();
    println!("Camera Controls:");
    println!("  W/A/S/D  - Pan camera");
    println!("  Z/X      - Zoom in/out");
    println!("  ESC      - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,freight_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Freight Sim - Bevy Game".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(ui::SimWorldResource(world))
        .add_plugins(ui::FreightSimUIPlugin)
        .run();
}

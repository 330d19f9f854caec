use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cubesat_core::{Swarm, Vector2D};
use cubesat_shared::{BoundaryMode, SwarmSettings};
use cubesat_sim::{load_settings, to_config, JsonLinesSink, Overrides, Runner};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Boundary {
    /// Shift the whole swarm back toward the arena center
    Recenter,
    /// Clamp bodies inside the margin
    Contain,
}

impl From<Boundary> for BoundaryMode {
    fn from(boundary: Boundary) -> Self {
        match boundary {
            Boundary::Recenter => BoundaryMode::Recenter,
            Boundary::Contain => BoundaryMode::Contain,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless CubeSat swarm tracking simulator", long_about = None)]
struct Args {
    /// JSON settings file; unspecified fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Arena width in pixels, overriding the settings file
    #[arg(long)]
    width: Option<f32>,

    /// Arena height in pixels, overriding the settings file
    #[arg(long)]
    height: Option<f32>,

    /// Boundary policy, overriding the settings file
    #[arg(long, value_enum)]
    boundary: Option<Boundary>,

    /// Number of tracking agents
    #[arg(short, long, default_value_t = 1)]
    agents: usize,

    /// How many of the agents are impaired (cannot rotate and move in the same tick)
    #[arg(short, long, default_value_t = 0)]
    impaired: usize,

    /// Ticks to simulate; runs until interrupted when omitted
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Park the target at the arena center
    #[arg(short, long)]
    fixed_target: bool,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Emit a frame every N ticks (0 disables frame output)
    #[arg(short, long, default_value_t = 1)]
    report_every: u64,

    /// Ticks per second (0 runs as fast as possible)
    #[arg(long, default_value_t = 0)]
    fps: u32,

    /// Write frames here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    if args.impaired > args.agents {
        anyhow::bail!(
            "Cannot have {} impaired agents out of {}",
            args.impaired,
            args.agents
        );
    }

    let mut settings = match &args.config {
        Some(path) => load_settings(path)?,
        None => SwarmSettings::default(),
    };
    Overrides {
        width: args.width,
        height: args.height,
        boundary: args.boundary.map(BoundaryMode::from),
        fixed_target: args.fixed_target,
    }
    .apply(&mut settings);
    let config = to_config(&settings)?;

    log::info!("CubeSat simulator starting...");
    log::info!("Arena: {}x{}", config.arena.width, config.arena.height);
    log::info!("Agents: {} ({} impaired)", args.agents, args.impaired);

    let mut builder = Swarm::builder(config).random_agents(args.agents, args.impaired);
    if config.target.fixed {
        let center = Vector2D::new(config.arena.width, config.arena.height) / 2.0;
        builder = builder.fixed_target(center);
    }
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let swarm = builder.build().context("Failed to build swarm")?;
    for (body, mode) in swarm.agents() {
        log::debug!("Agent {} at {:?} ({:?})", body.id, body.position, mode);
    }
    log::debug!("Target at {:?}", swarm.target().position);

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut sink = JsonLinesSink::new(writer);

    let mut runner = Runner::new(swarm)
        .report_every(args.report_every)
        .fps(args.fps);
    runner.run(args.ticks, &mut sink).context("Simulation error")?;

    Ok(())
}

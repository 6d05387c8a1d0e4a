//! Headless driver for the wave engine.
//!
//! Stands in for the render/input layer: runs a fixed number of frames at a
//! fixed timestep, optionally scripts a pointer splash mid-run, and prints
//! periodic stats instead of rasterizing the field.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use wave_sim_core::{PaintPolarity, SimCommand, SimConfig, WaveSimulation};

/// Wave field simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "wave-sim-demo")]
#[command(about = "Interactive wave-field simulation, headless", long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Timestep per frame in seconds
    #[arg(short, long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Frames between stats reports
    #[arg(short, long, default_value_t = 60)]
    report_interval: u32,

    /// JSON configuration file (defaults to the built-in scene)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable the oscillating line source
    #[arg(long)]
    no_oscillator: bool,

    /// Disable the wall rectangles
    #[arg(long)]
    no_walls: bool,

    /// Inject a pointer splash at the grid center mid-run
    #[arg(long)]
    splash: bool,
}

fn load_config(args: &Args) -> Result<SimConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            serde_json::from_str(&text)
                .map_err(|e| format!("cannot parse {}: {e}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if args.no_oscillator {
        config.oscillator.enabled = false;
    }
    if args.no_walls {
        config.obstacles_enabled = false;
    }
    Ok(config)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let mut sim = match WaveSimulation::new(config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let cols = sim.field().width();
    let rows = sim.field().height();
    println!("=== Wave Simulation Demo ===");
    println!(
        "{cols}x{rows} cells | damping {:.3} | period {:.2}s | walls {}",
        sim.damping(),
        sim.oscillator().period(),
        if sim.obstacles().enabled() { "on" } else { "off" }
    );

    let splash_frame = args.frames / 3;
    for frame in 0..args.frames {
        if args.splash && frame == splash_frame {
            sim.submit(SimCommand::Paint {
                col: cols / 2,
                row: rows / 2,
                polarity: PaintPolarity::Crest,
            });
            println!("[frame {frame}] splash at ({}, {})", cols / 2, rows / 2);
        }

        sim.update(args.dt);

        if args.report_interval > 0 && frame % args.report_interval == 0 {
            let stats = sim.stats();
            println!(
                "[frame {frame}] t={:.2}s total |amp|={:.1} osc amp={:.1}",
                stats.simulation_time,
                stats.total_amplitude,
                sim.oscillator().amplitude()
            );
        }
    }

    let stats = sim.stats();
    println!(
        "done: {} frames, {:.2}s simulated, total |amp| {:.1}",
        stats.frame_number, stats.simulation_time, stats.total_amplitude
    );
    ExitCode::SUCCESS
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ropesim::{RopeConfig, RopeSimulator, Viewer};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Simulate a hanging rope and show it in a window.
#[derive(Debug, Parser)]
#[command(name = "ropesim", version, about)]
struct Args {
    /// JSON configuration file. Missing keys take the defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of nodes, anchors included.
    #[arg(long)]
    nodes: Option<usize>,

    /// Mass of every node.
    #[arg(long)]
    mass: Option<f32>,

    /// Rest length of each segment.
    #[arg(long)]
    segment_length: Option<f32>,

    /// Gravitational acceleration.
    #[arg(long)]
    gravity: Option<f32>,

    /// Damping of the first node at layout.
    #[arg(long)]
    initial_damping: Option<f32>,

    /// Damping ceiling.
    #[arg(long)]
    max_damping: Option<f32>,

    /// Damping increase per second.
    #[arg(long)]
    damping_rate: Option<f32>,

    /// Spring stiffness.
    #[arg(long)]
    tension: Option<f32>,

    /// Rendered line width.
    #[arg(long)]
    line_width: Option<f32>,

    /// Step by a fixed dt (seconds) instead of measured frame time. Used as
    /// given, without the frame-time clamp.
    #[arg(long, value_name = "SECONDS")]
    fixed_dt: Option<f32>,

    /// Simulated seconds per wall second.
    #[arg(long, default_value_t = 1.0)]
    time_scale: f32,

    /// Run this many steps without a window and print the final positions.
    #[arg(long, value_name = "STEPS")]
    headless: Option<u32>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn rope_config(&self) -> Result<RopeConfig, ropesim::ConfigError> {
        let mut config = match &self.config {
            Some(path) => RopeConfig::load(path)?,
            None => RopeConfig::default(),
        };

        if let Some(v) = self.nodes {
            config.node_count = v;
        }
        if let Some(v) = self.mass {
            config.node_mass = v;
        }
        if let Some(v) = self.segment_length {
            config.segment_length = v;
        }
        if let Some(v) = self.gravity {
            config.gravity = v;
        }
        if let Some(v) = self.initial_damping {
            config.initial_damping = v;
        }
        if let Some(v) = self.max_damping {
            config.max_damping = v;
        }
        if let Some(v) = self.damping_rate {
            config.damping_increase_rate = v;
        }
        if let Some(v) = self.tension {
            config.tension = v;
        }
        if let Some(v) = self.line_width {
            config.line_width = v;
        }

        config.validate()?;
        Ok(config)
    }
}

fn run_headless(config: RopeConfig, steps: u32, dt: f32) -> Result<(), ropesim::RopeError> {
    let mut rope = RopeSimulator::new(config)?;
    for _ in 0..steps {
        rope.step(dt);
    }

    println!("# t = {:.3}s", rope.elapsed());
    for (i, p) in rope.positions().iter().enumerate() {
        println!("{i}\t{:.5}\t{:.5}\t{:.5}", p.x, p.y, p.z);
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match args.rope_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if args.print_config {
        println!("{}", config.to_json());
        return ExitCode::SUCCESS;
    }

    let result = match args.headless {
        Some(steps) => run_headless(config, steps, args.fixed_dt.unwrap_or(1.0 / 60.0))
            .map_err(|e| e.to_string()),
        None => Viewer::new(config)
            .with_fixed_delta(args.fixed_dt)
            .with_time_scale(args.time_scale)
            .run()
            .map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "ropesim failed");
            ExitCode::FAILURE
        }
    }
}

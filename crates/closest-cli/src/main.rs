//! Closest CLI - times every nearest-distance engine and checks it against
//! the naive baseline.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use closest_core::{ClosestConfig, Harness, PointSet, Variant};

mod report;

#[derive(Parser, Debug)]
#[command(name = "closest")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./closest.toml when present)
    #[arg(short, long, env = "CLOSEST_CONFIG")]
    config: Option<PathBuf>,

    /// Number of random points
    #[arg(short = 'n', long)]
    points: Option<usize>,

    /// Worker threads for the parallel variants
    #[arg(short, long)]
    workers: Option<usize>,

    /// Cache tile size in points
    #[arg(short, long)]
    tile_size: Option<usize>,

    /// Seed for the point generator
    #[arg(short, long)]
    seed: Option<u64>,

    /// Timed runs per variant
    #[arg(short, long)]
    repetitions: Option<usize>,

    /// Variant to run (repeatable; defaults to all)
    #[arg(long = "variant", value_parser = parse_variant)]
    variants: Vec<Variant>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    s.parse().map_err(|e: closest_core::ConfigError| e.to_string())
}

impl Args {
    fn apply(&self, config: &mut ClosestConfig) {
        if let Some(points) = self.points {
            config.points = points;
        }
        if let Some(workers) = self.workers {
            config.engine.workers = workers;
        }
        if let Some(tile_size) = self.tile_size {
            config.engine.tile_size = tile_size;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(repetitions) = self.repetitions {
            config.repetitions = repetitions;
        }
        if !self.variants.is_empty() {
            config.variants.clone_from(&self.variants);
        }
    }
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> anyhow::Result<bool> {
    let mut config =
        ClosestConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    args.apply(&mut config);

    init_tracing(&config.logging.level);
    config.validate().context("invalid engine geometry")?;

    tracing::info!(
        points = config.points,
        workers = config.engine.workers,
        tile_size = config.engine.tile_size,
        seed = ?config.seed,
        "starting harness"
    );

    let points =
        PointSet::random(config.points, config.seed).context("failed to generate points")?;
    let report = Harness::new(&points, config.engine)
        .run(&config.variants, config.repetitions)
        .context("harness run failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report::print_report(&report);
    }

    Ok(report.all_passed())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}

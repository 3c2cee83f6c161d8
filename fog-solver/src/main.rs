use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use fog_solver::session::SEED_ENV;
use fog_solver::{run_session, Dimensions, SessionConfig};

#[derive(Parser, Debug)]
#[command(name = "fog-solver")]
#[command(about = "Explores a maze under fog of war and reports what it saw", long_about = None)]
struct Args {
    /// Maze width in cells (prompted for when omitted)
    #[arg(long)]
    width: Option<i64>,

    /// Maze height in cells (prompted for when omitted)
    #[arg(long)]
    height: Option<i64>,

    /// Seed for maze generation (defaults to FOG_MAZE_SEED, then entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Print statistics as JSON instead of the text block
    #[arg(long)]
    json: bool,
}

fn prompt_dimension(name: &str) -> Result<i64> {
    print!("Enter maze {}: ", name);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .with_context(|| format!("failed to read maze {}", name))?;
    let trimmed = line.trim();
    trimmed
        .parse::<i64>()
        .with_context(|| format!("maze {} must be an integer, got '{}'", name, trimmed))
}

fn resolve_seed(arg: Option<u64>) -> Result<Option<u64>> {
    if arg.is_some() {
        return Ok(arg);
    }
    match std::env::var(SEED_ENV) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .with_context(|| format!("{} must be an unsigned integer, got '{}'", SEED_ENV, raw)),
        Err(_) => Ok(None),
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let width = match args.width {
        Some(w) => w,
        None => prompt_dimension("width")?,
    };
    let height = match args.height {
        Some(h) => h,
        None => prompt_dimension("height")?,
    };
    let dimensions = Dimensions::new(width, height)?;
    let seed = resolve_seed(args.seed)?;

    let report = run_session(&SessionConfig::new(dimensions, seed))
        .context("exploration failed")?;

    println!("=== Maze {}x{} (seed {}) ===", width, height, report.seed);
    print!("{}", report.truth_view());
    println!();

    println!("=== Agent View After Exploration ===");
    print!("{}", report.fog_view());
    println!();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.summary())?);
    } else {
        println!("{}", report.stats);
        if let Some(reference) = &report.reference_path {
            println!("Reference path: {} cells", reference.len());
        }
    }
    println!();

    println!("=== Discovered Path On Full Maze ===");
    print!("{}", report.comparison_view());

    report.exploration.require_solved()?;
    Ok(())
}

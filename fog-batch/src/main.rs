use anyhow::{Context, Result};
use clap::Parser;
use fog_solver::{run_session, Dimensions, SessionConfig, SessionSummary};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "fog-batch")]
#[command(about = "Runs many seeded fog-of-war explorations and summarises them", long_about = None)]
struct Args {
    /// Verbose output level
    #[arg(short, long, default_value_t = 0)]
    verbose: u8,

    /// Number of mazes to explore
    #[arg(short, long, default_value_t = 20)]
    runs: u64,

    /// Maze width in cells
    #[arg(long, default_value_t = 16)]
    width: i64,

    /// Maze height in cells
    #[arg(long, default_value_t = 16)]
    height: i64,

    /// Base seed; run i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output JSON path ("-" for stdout)
    #[arg(short, long, default_value = "-")]
    output: String,
}

#[derive(Debug, Serialize)]
struct Aggregate {
    runs: usize,
    solved: usize,
    mean_observed_pct: f64,
    mean_visited_pct: f64,
    mean_path_pct: f64,
    mean_backtracks: f64,
}

#[derive(Debug, Serialize)]
struct BatchOutput {
    width: i64,
    height: i64,
    base_seed: u64,
    aggregate: Aggregate,
    sessions: Vec<SessionSummary>,
}

fn mean(sessions: &[SessionSummary], f: impl Fn(&SessionSummary) -> f64) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    sessions.iter().map(f).sum::<f64>() / sessions.len() as f64
}

fn aggregate(sessions: &[SessionSummary]) -> Aggregate {
    Aggregate {
        runs: sessions.len(),
        solved: sessions.iter().filter(|s| s.stats.solved).count(),
        mean_observed_pct: mean(sessions, |s| s.stats.percent(s.stats.observed)),
        mean_visited_pct: mean(sessions, |s| s.stats.percent(s.stats.visited)),
        mean_path_pct: mean(sessions, |s| s.stats.percent(s.stats.path)),
        mean_backtracks: mean(sessions, |s| s.backtracks as f64),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.verbose > 0 {
        eprintln!(
            "fog-batch: {} runs of {}x{} from seed {}",
            args.runs, args.width, args.height, args.seed
        );
    }

    let dimensions = Dimensions::new(args.width, args.height)?;
    let mut sessions = Vec::new();
    for i in 0..args.runs {
        let seed = args.seed.wrapping_add(i);
        let report = run_session(&SessionConfig::new(dimensions, Some(seed)))
            .with_context(|| format!("run {} (seed {}) failed", i, seed))?;
        if args.verbose > 1 {
            eprintln!(
                "  run {}: solved={} visited={} path={}",
                i, report.stats.solved, report.stats.visited, report.stats.path
            );
        }
        sessions.push(report.summary());
    }

    let out = BatchOutput {
        width: args.width,
        height: args.height,
        base_seed: args.seed,
        aggregate: aggregate(&sessions),
        sessions,
    };
    let serialized = serde_json::to_string_pretty(&out)?;

    if args.output == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(serialized.as_bytes())?;
        stdout.write_all(b"\n")?;
    } else {
        fs::write(&args.output, serialized)
            .with_context(|| format!("failed to write output file: {}", &args.output))?;
    }

    Ok(())
}

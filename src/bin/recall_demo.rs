//! Hopfield recall demonstration.
//!
//! Trains the built-in ring images (or random patterns), then recalls the
//! distorted probes and any extra noisy copies, printing each grid.
//! Optionally writes one JSONL event per recall.

use clap::{Parser, ValueEnum};
use hopfield::data::{self, render_grid};
use hopfield::{Config, LearningRule, LogObserver, Network, Pattern, PseudoinverseBatching};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RuleArg {
    Hebbian,
    Pseudoinverse,
}

impl From<RuleArg> for LearningRule {
    fn from(arg: RuleArg) -> Self {
        match arg {
            RuleArg::Hebbian => LearningRule::Hebbian,
            RuleArg::Pseudoinverse => LearningRule::Pseudoinverse,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BatchingArg {
    PerCall,
    Accumulate,
}

impl From<BatchingArg> for PseudoinverseBatching {
    fn from(arg: BatchingArg) -> Self {
        match arg {
            BatchingArg::PerCall => PseudoinverseBatching::PerCall,
            BatchingArg::Accumulate => PseudoinverseBatching::Accumulate,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "hopfield-recall",
    about = "Train a Hopfield network and recall distorted patterns"
)]
struct Args {
    /// Learning rule
    #[arg(long, value_enum, default_value_t = RuleArg::Pseudoinverse)]
    rule: RuleArg,

    /// Pseudoinverse batch composition
    #[arg(long, value_enum, default_value_t = BatchingArg::Accumulate)]
    batching: BatchingArg,

    /// Grid side length (random mode only; the ring images are fixed at 10x10)
    #[arg(long)]
    dimension: Option<usize>,

    /// Train this many random patterns instead of the ring images (0 = rings)
    #[arg(long, default_value_t = 0)]
    random: usize,

    /// Maximum synchronous update steps per recall
    #[arg(long, default_value_t = hopfield::DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Number of previous states checked for repeats (1 = fixed points only)
    #[arg(long, default_value_t = 1)]
    history_window: usize,

    /// Extra probes: flip this many units of every stored pattern (0 = none)
    #[arg(long, default_value_t = 0)]
    noise: usize,

    /// RNG seed for random patterns and noise
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Append recall events as JSONL to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

/// Grid side for this run. The ring images only come in one size.
fn grid_side(random: usize, dimension: Option<usize>) -> Result<usize, String> {
    match (random, dimension) {
        (0, Some(d)) if d != data::GRID_SIDE => Err(format!(
            "--dimension {} needs --random; the ring images are {}x{}",
            d,
            data::GRID_SIDE,
            data::GRID_SIDE
        )),
        (_, Some(d)) => Ok(d),
        (_, None) => Ok(data::GRID_SIDE),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let dimension = grid_side(args.random, args.dimension)?;

    let (stored, mut probes) = if args.random > 0 {
        let size = dimension.checked_mul(dimension).ok_or("--dimension is too large")?;
        let stored: Vec<Pattern> = (0..args.random)
            .map(|_| data::random_pattern(size, &mut rng))
            .collect();
        (stored, Vec::new())
    } else {
        (data::demo_patterns()?, data::distorted_probes()?)
    };

    for pattern in &stored {
        if args.noise > 0 {
            probes.push(data::corrupt(pattern, args.noise, &mut rng)?);
        }
    }

    let config = Config {
        max_iterations: args.max_iterations,
        history_window: args.history_window,
        batching: args.batching.into(),
    };
    let rule: LearningRule = args.rule.into();
    let mut network =
        Network::with_config(dimension, rule, config)?.with_observer(Box::new(LogObserver));

    eprintln!("Hopfield Recall Demo");
    eprintln!("  Grid: {}x{} ({} units)", dimension, dimension, network.size());
    eprintln!("  Rule: {}", rule.name());
    eprintln!("  Batching: {:?}", network.config().batching);
    eprintln!("  Max iterations: {}", args.max_iterations);
    eprintln!("  Stored patterns: {}", stored.len());
    eprintln!("  Probes: {}", probes.len());
    eprintln!();

    for (i, pattern) in stored.iter().enumerate() {
        println!("Training pattern {}:", i + 1);
        print!("{}", render_grid(pattern, dimension)?);
        network.train(pattern)?;
    }

    let mut report = match &args.report {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            Some(OpenOptions::new().create(true).append(true).open(path)?)
        }
        None => None,
    };

    for (i, probe) in probes.iter().enumerate() {
        println!("Distorted probe {}:", i + 1);
        print!("{}", render_grid(probe, dimension)?);

        let outcome = network.recall(probe)?;
        println!(
            "Recalled ({} after {} step(s)):",
            if outcome.converged { "converged" } else { "not converged" },
            outcome.steps
        );
        print!("{}", render_grid(&outcome.pattern, dimension)?);

        let nearest = stored
            .iter()
            .enumerate()
            .filter_map(|(m, s)| s.hamming_distance(&outcome.pattern).ok().map(|d| (m, d)))
            .min_by_key(|&(_, d)| d);

        if let Some(file) = report.as_mut() {
            let event = serde_json::json!({
                "type": "recall",
                "probe": i,
                "rule": rule.name(),
                "converged": outcome.converged,
                "steps": outcome.steps,
                "cycle_period": outcome.cycle_period,
                "nearest_stored": nearest.map(|(m, _)| m),
                "nearest_distance": nearest.map(|(_, d)| d),
                "pattern": outcome.pattern,
            });
            writeln!(file, "{}", event)?;
        }
    }

    Ok(())
}

//! Run a simulation batch under one stopping rule and report statistics.
//!
//! The rule is either the DP-optimal policy (`--rule dp`) or a fixed top-k
//! threshold (`--rule topk:K`). With `--output`, the aggregated statistics
//! are written as JSON.

use std::path::Path;

use diehold::env_config;
use diehold::heuristic::TopKRule;
use diehold::policy::extract_policy;
use diehold::simulation::engine::{simulate_batch, SimulationResult};
use diehold::simulation::statistics::{aggregate_statistics, save_statistics};
use diehold::solver::solve;
use diehold::types::GameParams;

struct Args {
    rounds: usize,
    faces: usize,
    trials: usize,
    seed: u64,
    rule: String,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut rounds = 100usize;
    let mut faces = 6usize;
    let mut trials = 100_000usize;
    let mut seed = 42u64;
    let mut rule = "dp".to_string();
    let mut output = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rounds" => {
                i += 1;
                rounds = parse_value(&args, i, "--rounds");
            }
            "--faces" => {
                i += 1;
                faces = parse_value(&args, i, "--faces");
            }
            "--trials" => {
                i += 1;
                trials = parse_value(&args, i, "--trials");
            }
            "--seed" => {
                i += 1;
                seed = parse_value(&args, i, "--seed");
            }
            "--rule" => {
                i += 1;
                if i < args.len() {
                    rule = args[i].clone();
                }
            }
            "--output" => {
                i += 1;
                if i < args.len() {
                    output = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                println!("Usage: simulate [OPTIONS]");
                println!();
                println!("Simulate the hold-or-reroll game under a stopping rule.");
                println!();
                println!("Options:");
                println!("  --rounds N     Number of rounds (default 100)");
                println!("  --faces D      Die faces (default 6)");
                println!("  --trials K     Number of trials (default 100000)");
                println!("  --seed S       Base seed (default 42)");
                println!("  --rule R       dp | topk:K (default dp)");
                println!("  --output FILE  Write statistics JSON to FILE");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Args {
        rounds,
        faces,
        trials,
        seed,
        rule,
        output,
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    args.get(i)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("Invalid or missing value for {}", flag);
            std::process::exit(1)
        })
}

fn run(args: &Args, params: GameParams) -> Result<(SimulationResult, Option<f64>), String> {
    if args.rule == "dp" {
        let table = solve(params).map_err(|e| e.to_string())?;
        let policy = extract_policy(&table).map_err(|e| e.to_string())?;
        let result = simulate_batch(&policy, params, args.trials, args.seed);
        return Ok((result, Some(table.starting_value())));
    }
    if let Some(k_str) = args.rule.strip_prefix("topk:") {
        let k: usize = k_str
            .parse()
            .map_err(|_| format!("Invalid topk threshold: {}", k_str))?;
        let rule = TopKRule::new(params, k).map_err(|e| e.to_string())?;
        let result = simulate_batch(&rule, params, args.trials, args.seed);
        return Ok((result, None));
    }
    Err(format!("Unknown rule '{}' (expected dp or topk:K)", args.rule))
}

fn main() {
    let args = parse_args();
    env_config::init_rayon_threads();

    let params = match GameParams::new(args.rounds, args.faces) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let (result, analytic) = match run(&args, params) {
        Ok(r) => r,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(1);
        }
    };

    println!(
        "Simulated {} trials of N={} D={} under '{}' in {:.2}s",
        args.trials,
        params.rounds,
        params.faces,
        args.rule,
        result.elapsed.as_secs_f64()
    );
    println!(
        "mean={:.4}  std_dev={:.4}  se={:.4}  min={}  median={}  max={}",
        result.mean,
        result.std_dev,
        result.std_error(),
        result.min,
        result.median,
        result.max
    );
    if let Some(opt) = analytic {
        println!(
            "OPT(1,1)={:.4}  deviation={:.4} ({:.1} standard errors)",
            opt,
            result.mean - opt,
            (result.mean - opt).abs() / result.std_error().max(f64::MIN_POSITIVE)
        );
    }

    if let Some(path) = &args.output {
        let stats = aggregate_statistics(&result.profits, args.seed);
        if let Err(e) = save_statistics(&stats, Path::new(path)) {
            eprintln!("Failed to write {}: {}", path, e);
            std::process::exit(1);
        }
        println!("Wrote {}", path);
    }
}

//! Compare the DP optimum against the top-k heuristic for one (N, D) point.
//!
//! Prints the per-round cutoffs, both expected profits, and the differential.
//! With `--trials > 0`, also runs both policies through the simulator and
//! cross-checks the DP mean against OPT(1,1).

use diehold::compare::{compare, compare_with_simulation};
use diehold::env_config;
use diehold::policy::extract_policy;
use diehold::solver::solve;
use diehold::types::GameParams;

struct Args {
    rounds: usize,
    faces: usize,
    trials: usize,
    seed: u64,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut rounds = 100usize;
    let mut faces = 6usize;
    let mut trials = 0usize;
    let mut seed = 42u64;

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
            "--help" | "-h" => {
                println!("Usage: compare [OPTIONS]");
                println!();
                println!("Compare optimal play against the top-k heuristic.");
                println!();
                println!("Options:");
                println!("  --rounds N    Number of rounds (default 100)");
                println!("  --faces D     Die faces (default 6)");
                println!("  --trials K    Cross-check via K simulation trials (default 0 = off)");
                println!("  --seed S      Simulation seed (default 42)");
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

    let table = solve(params).expect("validated params");
    let policy = extract_policy(&table).expect("solver-produced table");

    println!("N={} rounds, D={} faces", params.rounds, params.faces);
    println!("Cutoffs (round -> smallest TAKE face):");
    for n in 1..=params.rounds.min(20) {
        let cutoff = policy.cutoff(n);
        if cutoff > params.faces {
            println!("  round {:>3}: always reroll", n);
        } else {
            println!("  round {:>3}: take at face >= {}", n, cutoff);
        }
    }
    if params.rounds > 20 {
        println!("  ... ({} more rounds)", params.rounds - 20);
    }

    let result = if args.trials > 0 {
        compare_with_simulation(params, args.trials, args.seed)
    } else {
        compare(params)
    };

    match result {
        Ok(record) => {
            println!();
            println!("dp_profit        = {:.6}  (OPT(1,1))", record.dp_profit);
            println!(
                "heuristic_profit = {:.6}  (top-k, k*={})",
                record.heuristic_profit, record.heuristic_k
            );
            println!("difference       = {:.6}", record.difference);
            if let (Some(dp), Some(h)) = (record.dp_sim_mean, record.heuristic_sim_mean) {
                println!();
                println!("simulated over {} trials (seed {}):", args.trials, args.seed);
                println!("  dp policy mean    = {:.6}", dp);
                println!("  top-k rule mean   = {:.6}", h);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

//! Sweep the comparator over an (N, D) grid and persist the records.
//!
//! Outputs:
//! - `<output>/comparison.csv`: one row per grid point
//! - `<output>/comparison.json`: same records as a JSON array

use std::path::Path;
use std::time::Instant;

use diehold::env_config;
use diehold::simulation::sweep::{
    range_grid, resolve_grid, run_sweep, save_records_csv, save_records_json,
};

struct Args {
    grid: String,
    output: String,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut grid = "standard".to_string();
    let mut output = "outputs/sweep".to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--grid" => {
                i += 1;
                if i < args.len() {
                    grid = args[i].clone();
                }
            }
            "--output" => {
                i += 1;
                if i < args.len() {
                    output = args[i].clone();
                }
            }
            "--help" | "-h" => {
                println!("Usage: sweep [OPTIONS]");
                println!();
                println!("Compare DP vs heuristic profit over a parameter grid.");
                println!();
                println!("Options:");
                println!("  --grid NAME    Named grid: standard | dense | wide (default standard)");
                println!("  --output DIR   Output directory (default outputs/sweep)");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Args { grid, output }
}

fn main() {
    let args = parse_args();
    env_config::init_base_path();
    env_config::init_rayon_threads();

    let grid = resolve_grid(&args.grid).unwrap_or_else(|| {
        eprintln!(
            "Unknown grid '{}'; falling back to rounds 10..=60 x d6",
            args.grid
        );
        range_grid(10, 60, 10, &[6])
    });

    println!("Sweeping {} grid points...", grid.len());
    let t0 = Instant::now();
    let records = match run_sweep(&grid) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    println!("Swept in {:.2}s", t0.elapsed().as_secs_f64());

    // Largest and smallest differentials are the interesting rows.
    let widest = records
        .iter()
        .max_by(|a, b| a.difference.total_cmp(&b.difference));
    let tightest = records
        .iter()
        .min_by(|a, b| a.difference.total_cmp(&b.difference));
    if let (Some(w), Some(t)) = (widest, tightest) {
        println!(
            "Widest gap:   N={:>3} D={:>3}  dp={:.4} heuristic={:.4} diff={:.4}",
            w.rounds, w.faces, w.dp_profit, w.heuristic_profit, w.difference
        );
        println!(
            "Tightest gap: N={:>3} D={:>3}  dp={:.4} heuristic={:.4} diff={:.4}",
            t.rounds, t.faces, t.dp_profit, t.heuristic_profit, t.difference
        );
    }

    let out_dir = Path::new(&args.output);
    if let Err(e) = std::fs::create_dir_all(out_dir) {
        eprintln!("Failed to create {}: {}", args.output, e);
        std::process::exit(1);
    }
    let csv_path = out_dir.join("comparison.csv");
    let json_path = out_dir.join("comparison.json");
    if let Err(e) = save_records_csv(&records, &csv_path) {
        eprintln!("Failed to write {}: {}", csv_path.display(), e);
        std::process::exit(1);
    }
    if let Err(e) = save_records_json(&records, &json_path) {
        eprintln!("Failed to write {}: {}", json_path.display(), e);
        std::process::exit(1);
    }
    println!("Wrote {} and {}", csv_path.display(), json_path.display());
}

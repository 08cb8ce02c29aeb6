//! Parameter-grid sweep infrastructure: named grids, ranges, and persistence
//! of comparison records.
//!
//! A sweep runs the comparator over a list of (N, D) grid points in parallel
//! and collects one [`ComparisonRecord`] per point. Persistence (CSV and
//! JSON) is the comparator's boundary responsibility and happens here, after
//! the compute pass — the solver and simulator never touch I/O.

use std::io::Write;
use std::path::Path;

use rayon::prelude::*;

use crate::compare::compare;
use crate::error::GameError;
use crate::types::{ComparisonRecord, GameParams};

/// Parse a named grid of (rounds, faces) points. Returns None if the grid
/// name is unknown.
///
/// All named grids stay in the long-horizon regime (N well above D) where
/// the closed-form heuristic is a meaningful baseline.
pub fn resolve_grid(grid_name: &str) -> Option<Vec<(usize, usize)>> {
    match grid_name {
        "standard" => Some(range_grid(10, 60, 10, &[2, 4, 6, 8, 10, 12])),
        "dense" => Some(range_grid(20, 100, 5, &[6])),
        "wide" => Some(range_grid(60, 200, 20, &[6, 10, 20, 30, 50])),
        _ => None,
    }
}

/// Cartesian grid: rounds from `lo` to `hi` in steps of `step`, crossed with
/// the given face counts.
pub fn range_grid(lo: usize, hi: usize, step: usize, faces: &[usize]) -> Vec<(usize, usize)> {
    let mut points = Vec::new();
    let mut rounds = lo;
    while rounds <= hi {
        for &f in faces {
            points.push((rounds, f));
        }
        rounds += step;
    }
    points
}

/// Compare every grid point in parallel. Fails on the first invalid point or
/// consistency violation; records come back in grid order.
pub fn run_sweep(grid: &[(usize, usize)]) -> Result<Vec<ComparisonRecord>, GameError> {
    grid.par_iter()
        .map(|&(rounds, faces)| compare(GameParams::new(rounds, faces)?))
        .collect()
}

/// Write records as CSV, one row per grid point.
pub fn save_records_csv(records: &[ComparisonRecord], path: &Path) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(
        file,
        "rounds,faces,dp_profit,heuristic_profit,heuristic_k,difference"
    )?;
    for r in records {
        writeln!(
            file,
            "{},{},{:.9},{:.9},{},{:.9}",
            r.rounds, r.faces, r.dp_profit, r.heuristic_profit, r.heuristic_k, r.difference
        )?;
    }
    Ok(())
}

/// Write records as a pretty-printed JSON array.
pub fn save_records_json(records: &[ComparisonRecord], path: &Path) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, records)?;
    Ok(())
}

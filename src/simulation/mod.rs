//! Monte Carlo simulation and statistics.
//!
//! - [`engine`]: trial execution under a stopping rule (DP policy or top-k)
//! - [`statistics`]: aggregate statistics from a profit sample
//! - [`sweep`]: (N, D) parameter-grid sweeps and persistence

pub mod engine;
pub mod statistics;
pub mod sweep;

// Re-export commonly used items
pub use engine::{
    simulate_batch, simulate_batch_cancellable, simulate_trial, SimulationResult, StoppingRule,
};
pub use statistics::{aggregate_statistics, save_statistics, ProfitStatistics};
pub use sweep::{range_grid, resolve_grid, run_sweep, save_records_csv, save_records_json};

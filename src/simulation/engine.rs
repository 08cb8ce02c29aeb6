//! Trial execution — plays the hold-or-reroll game under a stopping rule.
//!
//! Each trial starts with the die showing face 1. The first TAKE banks the
//! current face for every remaining round (profit = face × rounds left), a
//! shortcut justified by the absorbing-take property verified in
//! [`crate::policy::verify_absorbing_take`]: a banked face never changes, so
//! once TAKE is optimal it stays optimal. Reaching round N without a prior
//! TAKE forces one (terminal rule), regardless of what the rule reports.
//!
//! Trials are independent and run in parallel with rayon; trial i uses its
//! own `SmallRng` seeded `seed + i`, so results are reproducible per seed
//! and independent of thread scheduling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::types::{Action, GameParams, Policy};

/// A stopping rule the simulator can execute.
pub trait StoppingRule: Send + Sync {
    /// True if the rule banks the current face at (round, face).
    fn takes(&self, round: usize, face: usize) -> bool;
}

impl StoppingRule for Policy {
    #[inline]
    fn takes(&self, round: usize, face: usize) -> bool {
        self.action(round, face) == Action::Take
    }
}

impl StoppingRule for crate::heuristic::TopKRule {
    #[inline]
    fn takes(&self, round: usize, face: usize) -> bool {
        round >= self.rounds || face > self.faces - self.k
    }
}

/// Results of a batch simulation.
pub struct SimulationResult {
    pub profits: Vec<f64>,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub elapsed: std::time::Duration,
}

impl SimulationResult {
    /// Standard error of the mean.
    pub fn std_error(&self) -> f64 {
        self.std_dev / (self.profits.len() as f64).sqrt()
    }
}

#[inline(always)]
fn roll_face(rng: &mut SmallRng, faces: usize) -> usize {
    rng.random_range(1..=faces)
}

/// Play one trial, returning the realized profit.
pub fn simulate_trial<R: StoppingRule + ?Sized>(
    rule: &R,
    params: GameParams,
    rng: &mut SmallRng,
) -> f64 {
    let mut face = 1usize;
    for round in 1..params.rounds {
        if rule.takes(round, face) {
            return (face * (params.rounds - round + 1)) as f64;
        }
        face = roll_face(rng, params.faces);
    }
    // Round N: forced take.
    face as f64
}

/// Simulate `num_trials` trials in parallel, returning profits and summary
/// statistics. Reproducible for a fixed seed.
pub fn simulate_batch<R: StoppingRule>(
    rule: &R,
    params: GameParams,
    num_trials: usize,
    seed: u64,
) -> SimulationResult {
    let start = Instant::now();

    let profits: Vec<f64> = (0..num_trials)
        .into_par_iter()
        .map(|i| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));
            simulate_trial(rule, params, &mut rng)
        })
        .collect();

    let elapsed = start.elapsed();
    summarize(profits, elapsed)
}

/// Like [`simulate_batch`], but stops launching trials once `cancel` is set.
///
/// Cancellation is a normal termination with partial results, not an error:
/// the returned profits cover however many trials completed. Trial indices
/// that did run keep their deterministic per-index seeds.
pub fn simulate_batch_cancellable<R: StoppingRule>(
    rule: &R,
    params: GameParams,
    num_trials: usize,
    seed: u64,
    cancel: &AtomicBool,
) -> Vec<f64> {
    (0..num_trials)
        .into_par_iter()
        .filter_map(|i| {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));
            Some(simulate_trial(rule, params, &mut rng))
        })
        .collect()
}

fn summarize(mut profits: Vec<f64>, elapsed: std::time::Duration) -> SimulationResult {
    if profits.is_empty() {
        return SimulationResult {
            profits: Vec::new(),
            mean: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
            median: 0.0,
            elapsed,
        };
    }

    let n = profits.len() as f64;
    let sum: f64 = profits.iter().sum();
    let mean = sum / n;
    let variance: f64 = profits.iter().map(|&p| (p - mean).powi(2)).sum::<f64>() / n;

    profits.sort_unstable_by(f64::total_cmp);
    let min = profits[0];
    let max = profits[profits.len() - 1];
    let median = profits[profits.len() / 2];

    SimulationResult {
        profits,
        mean,
        std_dev: variance.sqrt(),
        min,
        max,
        median,
        elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::TopKRule;
    use crate::policy::extract_policy;
    use crate::solver::solve;

    fn dp_policy(rounds: usize, faces: usize) -> (GameParams, Policy) {
        let params = GameParams::new(rounds, faces).unwrap();
        let table = solve(params).unwrap();
        (params, extract_policy(&table).unwrap())
    }

    #[test]
    fn trial_profit_within_bounds() {
        let (params, policy) = dp_policy(5, 6);
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let profit = simulate_trial(&policy, params, &mut rng);
            assert!(profit >= 1.0, "profit {profit} below forced-take floor");
            assert!(profit <= (5 * 6) as f64, "profit {profit} above face*rounds cap");
        }
    }

    #[test]
    fn single_round_always_banks_starting_face() {
        let (params, policy) = dp_policy(1, 6);
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(simulate_trial(&policy, params, &mut rng), 1.0);
    }

    #[test]
    fn batch_reproducible_per_seed() {
        let (params, policy) = dp_policy(5, 6);
        let a = simulate_batch(&policy, params, 2_000, 123);
        let b = simulate_batch(&policy, params, 2_000, 123);
        assert_eq!(a.profits, b.profits);
        let c = simulate_batch(&policy, params, 2_000, 124);
        assert_ne!(a.profits, c.profits);
    }

    #[test]
    fn topk_rule_takes_on_top_faces_only() {
        let params = GameParams::new(5, 6).unwrap();
        let rule = TopKRule::new(params, 2).unwrap();
        assert!(!rule.takes(1, 4));
        assert!(rule.takes(1, 5));
        assert!(rule.takes(1, 6));
        // Terminal round forces a take on any face.
        assert!(rule.takes(5, 1));
    }

    #[test]
    fn cancelled_batch_returns_partial_results() {
        let (params, policy) = dp_policy(5, 6);
        let cancel = AtomicBool::new(true);
        let profits = simulate_batch_cancellable(&policy, params, 10_000, 42, &cancel);
        assert!(profits.len() < 10_000);
    }

    #[test]
    fn empty_batch_is_not_an_error() {
        let (params, policy) = dp_policy(5, 6);
        let result = simulate_batch(&policy, params, 0, 42);
        assert!(result.profits.is_empty());
        assert_eq!(result.mean, 0.0);
    }
}

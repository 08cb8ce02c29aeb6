//! Backward induction over the (round, face) grid.
//!
//! Fills OPT(n, d) from the terminal row N down to round 1. Row n reads only
//! row n+1, and the reroll branch is identical for every face in a row (a
//! reroll discards the current face), so each row's reroll value — the mean
//! of the successor row — is computed once. That gives O(N·D) time and
//! space; the straightforward per-cell mean would be O(N·D²) with identical
//! results, and tests assert the value contract, not the complexity class.
//!
//! The solver is pure: no I/O, no randomness, bit-for-bit reproducible for
//! a given (N, D).

use crate::error::GameError;
use crate::types::{GameParams, ValueTable};

/// Solve the full value table for the given parameters.
///
/// Terminal row: `OPT(N, d) = d` — no rolls remain, the player must bank.
/// Interior rows: `OPT(n, d) = max(d + OPT(n+1, d), mean_i OPT(n+1, i))`.
/// With N = 1 only the terminal row exists and no backward step executes.
pub fn solve(params: GameParams) -> Result<ValueTable, GameError> {
    params.validate()?;
    let (rounds, faces) = (params.rounds, params.faces);

    let mut values = vec![0.0f64; rounds * faces];
    let row_start = |n: usize| (n - 1) * faces;

    for d in 1..=faces {
        values[row_start(rounds) + (d - 1)] = d as f64;
    }

    for n in (1..rounds).rev() {
        // Split so row n is written while row n+1 is read.
        let (head, tail) = values.split_at_mut(row_start(n + 1));
        let current = &mut head[row_start(n)..];
        let next = &tail[..faces];

        let reroll = row_mean(next);
        for d in 1..=faces {
            let take = d as f64 + next[d - 1];
            current[d - 1] = if take >= reroll { take } else { reroll };
        }
    }

    ValueTable::from_values(params, values)
}

/// Mean of one value-table row (the reroll branch of the recurrence).
#[inline]
pub fn row_mean(row: &[f64]) -> f64 {
    row.iter().sum::<f64>() / row.len() as f64
}

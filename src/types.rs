//! Core value objects: game parameters, the DP value table, extracted
//! policies, and comparison records.
//!
//! The central type is [`ValueTable`], which holds OPT(n, d) — the optimal
//! expected remaining profit at the start of round n with the die showing d.
//! It is built once by [`crate::solver::solve`] and then read immutably by
//! the policy extractor, the comparator, and tests. No global state: the
//! table is an explicit value object passed by reference downstream.

use serde::Serialize;

use crate::error::GameError;

/// Game parameters: N rounds played with a D-faced die.
///
/// Immutable once a solve begins. Both fields are public so that callers can
/// describe invalid inputs; every entry point re-validates via [`GameParams::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GameParams {
    pub rounds: usize,
    pub faces: usize,
}

impl GameParams {
    /// Construct validated parameters (N >= 1, D >= 1).
    pub fn new(rounds: usize, faces: usize) -> Result<Self, GameError> {
        let params = Self { rounds, faces };
        params.validate()?;
        Ok(params)
    }

    /// Check N >= 1 and D >= 1.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.rounds < 1 || self.faces < 1 {
            return Err(GameError::InvalidParameter {
                rounds: self.rounds,
                faces: self.faces,
            });
        }
        Ok(())
    }

    /// Mean of the uniform distribution over faces 1..=D.
    #[inline]
    pub fn uniform_mean(&self) -> f64 {
        (self.faces as f64 + 1.0) / 2.0
    }
}

/// OPT(n, d) for every round n in [1, N] and face d in [1, D].
///
/// Row-major flat storage: row n occupies `values[(n-1)*faces..n*faces]`.
/// Invariants (checked by [`crate::compare::compare`]):
/// - terminal row: `OPT(N, d) = d` for every face d
/// - recurrence: `OPT(n, d) = max(d + OPT(n+1, d), mean_i OPT(n+1, i))`
#[derive(Clone, Debug)]
pub struct ValueTable {
    pub params: GameParams,
    pub values: Vec<f64>,
}

impl ValueTable {
    /// Wrap precomputed values, rejecting storage that does not match the
    /// declared rounds x faces shape.
    pub fn from_values(params: GameParams, values: Vec<f64>) -> Result<Self, GameError> {
        if values.len() != params.rounds * params.faces {
            return Err(GameError::ShapeMismatch {
                rounds: params.rounds,
                faces: params.faces,
                len: values.len(),
            });
        }
        Ok(Self { params, values })
    }

    /// Flat index for (round, face), both 1-indexed.
    #[inline(always)]
    fn index(&self, round: usize, face: usize) -> usize {
        debug_assert!((1..=self.params.rounds).contains(&round));
        debug_assert!((1..=self.params.faces).contains(&face));
        (round - 1) * self.params.faces + (face - 1)
    }

    /// OPT(round, face).
    #[inline(always)]
    pub fn get(&self, round: usize, face: usize) -> f64 {
        self.values[self.index(round, face)]
    }

    /// The full row for one round: OPT(round, 1..=D).
    #[inline]
    pub fn row(&self, round: usize) -> &[f64] {
        let start = (round - 1) * self.params.faces;
        &self.values[start..start + self.params.faces]
    }

    /// Expected total profit of optimal play starting fresh: OPT(1, 1).
    #[inline]
    pub fn starting_value(&self) -> f64 {
        self.get(1, 1)
    }
}

/// The action at a (round, face) state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Action {
    Take,
    Reroll,
}

/// Optimal policy derived from a [`ValueTable`]: one cutoff per round.
///
/// `cutoffs[n-1]` is the smallest face at which TAKE is optimal at round n,
/// or `faces + 1` when no face qualifies (always reroll). Round N's cutoff
/// is always 1: the terminal rule forces a take. The per-face action is
/// derived from the cutoff — `take_value(n, d)` is nondecreasing in d while
/// `reroll_value(n)` is constant, so the TAKE region is upward-closed.
#[derive(Clone, Debug, Serialize)]
pub struct Policy {
    pub rounds: usize,
    pub faces: usize,
    pub cutoffs: Vec<usize>,
}

impl Policy {
    /// The cutoff for one round (1-indexed).
    #[inline]
    pub fn cutoff(&self, round: usize) -> usize {
        self.cutoffs[round - 1]
    }

    /// The action at (round, face). Ties between take and reroll resolve to
    /// TAKE during extraction, so the cutoff already encodes them.
    #[inline]
    pub fn action(&self, round: usize, face: usize) -> Action {
        if face >= self.cutoff(round) {
            Action::Take
        } else {
            Action::Reroll
        }
    }
}

/// Result of the closed-form top-k heuristic evaluation.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct HeuristicResult {
    /// The threshold k in [1, D] maximizing the closed-form profit.
    pub best_k: usize,
    /// Closed-form expected profit at `best_k`. An approximation: it ignores
    /// the finite-horizon boundary the DP captures exactly.
    pub expected_profit: f64,
}

/// One row of the (N, D) comparison grid.
#[derive(Clone, Debug, Serialize)]
pub struct ComparisonRecord {
    pub rounds: usize,
    pub faces: usize,
    /// OPT(1, 1) from the DP solve.
    pub dp_profit: f64,
    /// Closed-form profit of the best top-k rule.
    pub heuristic_profit: f64,
    /// The winning threshold k of the heuristic.
    pub heuristic_k: usize,
    /// dp_profit - heuristic_profit; nonnegative for every valid grid point.
    pub difference: f64,
    /// Empirical mean profit of the DP policy, when simulation was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp_sim_mean: Option<f64>,
    /// Empirical mean profit of the top-k rule, when simulation was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heuristic_sim_mean: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_reject_zero() {
        assert!(GameParams::new(0, 6).is_err());
        assert!(GameParams::new(5, 0).is_err());
        assert!(GameParams::new(1, 1).is_ok());
    }

    #[test]
    fn uniform_mean_d6() {
        let p = GameParams::new(5, 6).unwrap();
        assert_eq!(p.uniform_mean(), 3.5);
    }

    #[test]
    fn from_values_checks_shape() {
        let p = GameParams::new(2, 3).unwrap();
        assert!(ValueTable::from_values(p, vec![0.0; 6]).is_ok());
        let err = ValueTable::from_values(p, vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, GameError::ShapeMismatch { len: 5, .. }));
    }

    #[test]
    fn table_indexing_row_major() {
        let p = GameParams::new(2, 3).unwrap();
        let t = ValueTable::from_values(p, vec![10.0, 11.0, 12.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(t.get(1, 1), 10.0);
        assert_eq!(t.get(1, 3), 12.0);
        assert_eq!(t.get(2, 2), 2.0);
        assert_eq!(t.row(2), &[1.0, 2.0, 3.0]);
        assert_eq!(t.starting_value(), 10.0);
    }

    #[test]
    fn policy_action_from_cutoff() {
        let policy = Policy {
            rounds: 3,
            faces: 6,
            cutoffs: vec![4, 2, 1],
        };
        assert_eq!(policy.action(1, 3), Action::Reroll);
        assert_eq!(policy.action(1, 4), Action::Take);
        assert_eq!(policy.action(2, 2), Action::Take);
        assert_eq!(policy.action(3, 1), Action::Take);
    }
}

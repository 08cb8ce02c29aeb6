//! Comparator — aggregates DP, heuristic, and simulation outputs into
//! profit differentials for one (N, D) grid point.

use crate::error::GameError;
use crate::heuristic::{evaluate_heuristic, TopKRule};
use crate::policy::{extract_policy, verify_absorbing_take};
use crate::simulation::engine::simulate_batch;
use crate::solver::solve;
use crate::types::{ComparisonRecord, GameParams, Policy, ValueTable};

/// Absolute slack for exact-arithmetic invariants (terminal row, dominance).
const VALUE_EPSILON: f64 = 1e-9;

/// Compare the DP optimum against the best top-k heuristic.
///
/// Runs the solver and the policy extractor, evaluates the heuristic, and
/// checks the internal invariants: the terminal row must equal the face
/// values, the extracted policy must be absorbing, and the difference must
/// be nonnegative — the DP policy is optimal over all stopping policies,
/// including the heuristic's class, so a negative difference is a bug.
pub fn compare(params: GameParams) -> Result<ComparisonRecord, GameError> {
    compare_parts(params).map(|(_, _, record)| record)
}

/// Like [`compare`], but also runs both policies through the Monte Carlo
/// simulator and cross-checks the DP simulation mean against OPT(1, 1)
/// within 3 standard errors.
///
/// The heuristic simulation mean is recorded but not asserted against the
/// closed form: the closed form ignores the finite-horizon boundary and the
/// fixed starting face, so only the DP policy has an exact analytic target.
pub fn compare_with_simulation(
    params: GameParams,
    num_trials: usize,
    seed: u64,
) -> Result<ComparisonRecord, GameError> {
    let (table, policy, mut record) = compare_parts(params)?;

    let dp_sim = simulate_batch(&policy, params, num_trials, seed);
    let tolerance = 3.0 * dp_sim.std_error() + VALUE_EPSILON;
    if (dp_sim.mean - table.starting_value()).abs() > tolerance {
        return Err(GameError::ConsistencyViolation(format!(
            "DP simulation mean {:.6} deviates from OPT(1,1) = {:.6} beyond 3 standard errors ({:.6})",
            dp_sim.mean,
            table.starting_value(),
            tolerance
        )));
    }

    // Decorrelate the heuristic run from the DP run.
    let rule = TopKRule::new(params, record.heuristic_k)?;
    let heuristic_sim = simulate_batch(&rule, params, num_trials, seed ^ 0x9E37_79B9_7F4A_7C15);

    record.dp_sim_mean = Some(dp_sim.mean);
    record.heuristic_sim_mean = Some(heuristic_sim.mean);
    Ok(record)
}

/// Shared body: solve, validate, extract, evaluate.
fn compare_parts(
    params: GameParams,
) -> Result<(ValueTable, Policy, ComparisonRecord), GameError> {
    let table = solve(params)?;

    for d in 1..=params.faces {
        let terminal = table.get(params.rounds, d);
        if (terminal - d as f64).abs() > VALUE_EPSILON {
            return Err(GameError::ConsistencyViolation(format!(
                "terminal row: OPT(N, {d}) = {terminal}, expected {d}"
            )));
        }
    }

    let policy = extract_policy(&table)?;
    verify_absorbing_take(&policy)?;

    let dp_profit = table.starting_value();
    let heuristic = evaluate_heuristic(params)?;
    let difference = dp_profit - heuristic.expected_profit;
    if difference < -VALUE_EPSILON {
        return Err(GameError::ConsistencyViolation(format!(
            "dominance: dp_profit {:.6} < heuristic_profit {:.6} at N={}, D={}",
            dp_profit, heuristic.expected_profit, params.rounds, params.faces
        )));
    }

    let record = ComparisonRecord {
        rounds: params.rounds,
        faces: params.faces,
        dp_profit,
        heuristic_profit: heuristic.expected_profit,
        heuristic_k: heuristic.best_k,
        difference,
        dp_sim_mean: None,
        heuristic_sim_mean: None,
    };
    Ok((table, policy, record))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_n10_d6() {
        let record = compare(GameParams::new(10, 6).unwrap()).unwrap();
        // OPT(1,1) = 46109/1152; the heuristic lands on exactly 40 at k = 3.
        assert!((record.dp_profit - 46109.0 / 1152.0).abs() < 1e-9);
        assert!((record.heuristic_profit - 40.0).abs() < 1e-12);
        assert_eq!(record.heuristic_k, 3);
        // 46109/1152 - 40 = 29/1152.
        assert!((record.difference - 29.0 / 1152.0).abs() < 1e-9);
        assert!(record.dp_sim_mean.is_none());
    }

    #[test]
    fn difference_nonnegative_across_grid() {
        for (rounds, faces) in [
            (10, 6),
            (50, 6),
            (8, 2),
            (30, 3),
            (40, 12),
            (100, 30),
            (1, 1),
            (17, 1),
        ] {
            let record = compare(GameParams::new(rounds, faces).unwrap()).unwrap();
            assert!(
                record.difference >= -1e-9,
                "negative difference at N={rounds}, D={faces}: {}",
                record.difference
            );
        }
    }

    #[test]
    fn short_horizon_overshoot_is_surfaced() {
        // The closed form assumes a uniform starting face, so for short
        // horizons it can exceed the true optimum (at D = 6 the overshoot
        // persists through N = 5). The comparator refuses to emit such a
        // record.
        for rounds in [2, 5] {
            let err = compare(GameParams::new(rounds, 6).unwrap()).unwrap_err();
            assert!(matches!(err, GameError::ConsistencyViolation(_)));
        }
    }

    #[test]
    fn invalid_params_propagate() {
        assert!(compare(GameParams { rounds: 0, faces: 6 }).is_err());
    }
}

//! Policy extraction — derives per-round TAKE/REROLL cutoffs from a value table.

use crate::error::GameError;
use crate::solver::row_mean;
use crate::types::{GameParams, Policy, ValueTable};

/// Derive the optimal policy from a solved value table.
///
/// Round N maps every face to TAKE (terminal rule). For n < N, face d is
/// TAKE when `d + OPT(n+1, d) >= mean_i OPT(n+1, i)` — ties resolve to TAKE,
/// since indifference means no benefit from further randomness. The cutoff
/// for a round is the smallest qualifying face, or `faces + 1` when none
/// qualifies (always reroll).
///
/// Fails with [`GameError::ShapeMismatch`] when the table's storage does not
/// match its declared dimensions. Cutoff monotonicity across rounds is NOT
/// assumed here; it is checked empirically by [`verify_absorbing_take`].
pub fn extract_policy(table: &ValueTable) -> Result<Policy, GameError> {
    let GameParams { rounds, faces } = table.params;
    if table.values.len() != rounds * faces {
        return Err(GameError::ShapeMismatch {
            rounds,
            faces,
            len: table.values.len(),
        });
    }

    let mut cutoffs = vec![faces + 1; rounds];
    cutoffs[rounds - 1] = 1; // terminal row: forced take on every face

    for n in 1..rounds {
        let next = table.row(n + 1);
        let reroll = row_mean(next);
        cutoffs[n - 1] = (1..=faces)
            .find(|&d| d as f64 + next[d - 1] >= reroll)
            .unwrap_or(faces + 1);
    }

    Ok(Policy {
        rounds,
        faces,
        cutoffs,
    })
}

/// Check the absorbing-take property: TAKE at (n, d) implies TAKE at
/// (n+1, d), i.e. cutoffs never rise toward round N on the TAKE region.
///
/// This is the property that lets the simulator bank `face × remaining
/// rounds` at the first TAKE instead of replaying the unchanged face every
/// round. It follows from the recurrence but is verified rather than
/// assumed.
pub fn verify_absorbing_take(policy: &Policy) -> Result<(), GameError> {
    for n in 1..policy.rounds {
        let cur = policy.cutoff(n);
        let next = policy.cutoff(n + 1);
        if cur <= policy.faces && next > cur {
            return Err(GameError::ConsistencyViolation(format!(
                "take at round {} face {} would not be absorbing: round {} cutoff is {}",
                n,
                cur,
                n + 1,
                next
            )));
        }
    }
    Ok(())
}

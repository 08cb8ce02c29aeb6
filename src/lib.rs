//! # Diehold — optimal stopping for the hold-or-reroll die game
//!
//! A player holds a D-faced die showing some face and, in each of N rounds,
//! either **takes** (banks the current face as profit for this and every
//! remaining round) or **rerolls** (discards the face, draws uniformly from
//! 1..=D, forfeits the round). This crate computes the exact optimal policy
//! by **backward induction** over the (round, face) grid and compares it
//! against a closed-form "top-k" threshold heuristic, analytically and by
//! Monte Carlo simulation.
//!
//! ## Pipeline
//!
//! | Stage | Rust module | Description |
//! |-------|-------------|-------------|
//! | 1 | [`solver`] | Fill OPT(n, d) from the terminal row N down to round 1 |
//! | 2 | [`policy`] | Derive per-round TAKE cutoffs from the value table |
//! | 3 | [`heuristic`] | Closed-form expected profit of the top-k rule, maximized over k |
//! | 4 | [`simulation`] | Play both policies on seeded random roll sequences |
//! | 5 | [`compare`] | Aggregate profit differentials over an (N, D) grid |
//!
//! The recurrence (OPT(N, d) = d; OPT(n, d) = max(d + OPT(n+1, d),
//! mean_i OPT(n+1, i))) depends only on the row below, so each row's reroll
//! value is computed once and the whole solve is O(N·D). All value
//! computation is f64 and deterministic; randomness lives exclusively in the
//! simulator, which seeds one `SmallRng` per trial for reproducibility.

pub mod compare;
pub mod env_config;
pub mod error;
pub mod heuristic;
pub mod policy;
pub mod simulation;
pub mod solver;
pub mod types;

//! Staged CFOP solver for the 3x3x3 cube.
//!
//! This crate provides a bounded solver that takes a scrambled cube state
//! and produces a step-by-step CFOP solution: cross, F2L pair by pair,
//! OLL, PLL and a final top-face adjustment. Stages that cannot finish
//! within their bounds are annotated on the result instead of aborting
//! the whole solve.

pub mod algs;
pub mod cube;
pub mod search;
pub mod solver;

// Re-export main types
pub use algs::{match_algorithm, AlgMatch, NamedAlg, OLL_CASES, PLL_CASES};
pub use cube::{
    format_moves, inverse_moves, parse_moves, CubeState, Face, Fingerprint, Move, ParseMoveError,
    ALL_MOVES,
};
pub use search::search;
pub use solver::{solve, Solution, SolveStep, SolverConfig, StepOutcome};

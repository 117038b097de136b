//! Bounded breadth-first search over move sequences.
//!
//! Every solving stage is phrased as "reach a goal predicate from here
//! within N moves of some alphabet". The search carries the move path with
//! each frontier state instead of keeping parent pointers; the depth bounds
//! in use keep frontiers small.

use fxhash::FxHashSet;
use log::debug;
use smallvec::SmallVec;

use crate::cube::{CubeState, Fingerprint, Move};

/// Inline path storage; deep enough for every depth bound in use.
type Path = SmallVec<[Move; 16]>;

/// Breadth-first search from `start` for a state satisfying `goal`, trying
/// `alphabet` moves in order at each level.
///
/// The first sequence reaching the goal is returned, so the result is
/// minimal for the given alphabet and ties break on alphabet order. The
/// validator, when present, gates admission to the next frontier only; it
/// is never consulted on a goal hit. Returns `None` once `max_depth` levels
/// or the reachable space are exhausted; exhaustion is an expected outcome,
/// not an error.
pub fn search(
    start: &CubeState,
    goal: &dyn Fn(&CubeState) -> bool,
    max_depth: usize,
    alphabet: &[Move],
    validator: Option<&dyn Fn(&CubeState) -> bool>,
) -> Option<Vec<Move>> {
    if goal(start) {
        return Some(Vec::new());
    }

    let mut visited: FxHashSet<Fingerprint> = FxHashSet::default();
    visited.insert(start.fingerprint());
    let mut frontier: Vec<(CubeState, Path)> = vec![(*start, Path::new())];

    for depth in 1..=max_depth {
        let mut next_frontier: Vec<(CubeState, Path)> = Vec::new();
        for (state, path) in &frontier {
            for &mv in alphabet {
                let candidate = state.apply(mv);
                if goal(&candidate) {
                    debug!("goal reached at depth {depth}");
                    let mut solution = path.to_vec();
                    solution.push(mv);
                    return Some(solution);
                }
                if let Some(validator) = validator {
                    if !validator(&candidate) {
                        continue;
                    }
                }
                if visited.insert(candidate.fingerprint()) {
                    let mut next_path = path.clone();
                    next_path.push(mv);
                    next_frontier.push((candidate, next_path));
                }
            }
        }
        frontier = next_frontier;
        debug!("depth {depth} exhausted, {} states in frontier", frontier.len());
        if frontier.is_empty() {
            break;
        }
    }

    None
}

//! The staged solving pipeline: Cross, F2L, OLL, PLL, AUF.
//!
//! Each stage advances the threaded state and reports a named step, so a
//! consumer can replay the solve stage by stage. Stages whose goal already
//! holds are skipped without a step. Failures are annotated on the step
//! rather than raised; only an unsolvable cross halts the run, since no
//! later stage can anchor without it.

use std::fmt;

use log::debug;

use crate::algs::{match_algorithm, NamedAlg, OLL_CASES, PLL_CASES};
use crate::cube::{
    first_u_adjustment, format_moves, CubeState, Move, ALL_MOVES, B1, F1, F3, L1, L3, R1, R2, R3,
    U1, U3,
};
use crate::search::search;

/// Bounds and tables for a pipeline run. All tunables live here; nothing is
/// read from globals.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Depth bound for the cross search.
    pub cross_depth: usize,
    /// Depth bound per F2L pair search.
    pub f2l_depth: usize,
    /// Depth bound for the top-cross orientation search.
    pub oll_cross_depth: usize,
    /// Depth bound for the OLL fallback search.
    pub oll_depth: usize,
    /// Depth bound for the PLL fallback search.
    pub pll_depth: usize,
    /// OLL table probed before falling back to search.
    pub oll_cases: &'static [NamedAlg],
    /// PLL table probed before falling back to search.
    pub pll_cases: &'static [NamedAlg],
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            cross_depth: 6,
            f2l_depth: 8,
            oll_cross_depth: 6,
            oll_depth: 8,
            pll_depth: 14,
            oll_cases: OLL_CASES,
            pll_cases: PLL_CASES,
        }
    }
}

/// The four F2L pairs in solve order.
struct F2lPair {
    name: &'static str,
    edge: usize,
    corner: usize,
}

const F2L_PAIRS: [F2lPair; 4] = [
    F2lPair {
        name: "F2L 1 (FR)",
        edge: 8,
        corner: 4,
    },
    F2lPair {
        name: "F2L 2 (FL)",
        edge: 9,
        corner: 5,
    },
    F2lPair {
        name: "F2L 3 (BL)",
        edge: 11,
        corner: 6,
    },
    F2lPair {
        name: "F2L 4 (BR)",
        edge: 10,
        corner: 7,
    },
];

// Restricted alphabets for the last-layer stages, kept as written in the
// reference move lists.
const OLL_CROSS_MOVES: [Move; 6] = [F1, R1, U1, R3, U3, F3];
const OLL_SEARCH_MOVES: [Move; 9] = [R1, U1, R3, U3, L1, U1, L3, B1, F1];
const PLL_SEARCH_MOVES: [Move; 11] = [R2, U1, R1, U1, R3, U3, R3, U3, R3, U1, R3];

/// Failure annotation shared by the bounded stages.
const SEARCH_FAILED: &str = "Search failed (too complex)";

/// How a stage ended.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The stage advanced the cube with these moves.
    Moves(Vec<Move>),
    /// The stage goal already held; nothing to do.
    AlreadySolved,
    /// The stage gave up; the message says why.
    Failed(String),
}

impl StepOutcome {
    fn from_moves(moves: Vec<Move>) -> Self {
        if moves.is_empty() {
            StepOutcome::AlreadySolved
        } else {
            StepOutcome::Moves(moves)
        }
    }

    fn failed() -> Self {
        StepOutcome::Failed(SEARCH_FAILED.to_string())
    }

    /// Moves contributed by this outcome; empty for the sentinel and for
    /// failures.
    pub fn moves(&self) -> &[Move] {
        match self {
            StepOutcome::Moves(moves) => moves,
            _ => &[],
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Moves(moves) => write!(f, "{}", format_moves(moves)),
            StepOutcome::AlreadySolved => write!(f, "Already Solved"),
            StepOutcome::Failed(message) => write!(f, "{message}"),
        }
    }
}

/// One named pipeline step.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveStep {
    /// Stage label, e.g. "Cross" or "OLL (Sune)"
    pub name: String,
    /// What the stage did
    pub outcome: StepOutcome,
}

impl SolveStep {
    fn new(name: impl Into<String>, outcome: StepOutcome) -> Self {
        Self {
            name: name.into(),
            outcome,
        }
    }
}

/// A full pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Steps in stage order, one per attempted stage
    pub steps: Vec<SolveStep>,
    /// Whether the final threaded state is fully solved
    pub solved: bool,
}

impl Solution {
    /// The moves of all successful steps, flattened in order.
    pub fn all_moves(&self) -> Vec<Move> {
        self.steps
            .iter()
            .flat_map(|step| step.outcome.moves().iter().copied())
            .collect()
    }
}

/// Run the full pipeline on `state`.
pub fn solve(state: &CubeState, config: &SolverConfig) -> Solution {
    let mut steps = Vec::new();
    let mut current = *state;

    // Cross anchors everything after it, so a miss is fatal.
    match search(
        &current,
        &CubeState::is_cross_solved,
        config.cross_depth,
        &ALL_MOVES,
        None,
    ) {
        Some(moves) => {
            debug!("cross solved in {} moves", moves.len());
            current = current.apply_moves(&moves);
            steps.push(SolveStep::new("Cross", StepOutcome::from_moves(moves)));
        }
        None => {
            steps.push(SolveStep::new(
                "Error",
                StepOutcome::Failed("Cross search failed. Solve cross manually first.".to_string()),
            ));
            return Solution {
                steps,
                solved: false,
            };
        }
    }

    // F2L pairs, one bounded search each. A stuck pair is reported and the
    // remaining pairs still get their chance; partial progress is useful.
    for pair in &F2L_PAIRS {
        let goal = |s: &CubeState| s.is_pair_solved(pair.edge, pair.corner);
        match search(
            &current,
            &goal,
            config.f2l_depth,
            &ALL_MOVES,
            Some(&CubeState::is_cross_solved),
        ) {
            Some(moves) => {
                debug!("{} solved in {} moves", pair.name, moves.len());
                current = current.apply_moves(&moves);
                steps.push(SolveStep::new(pair.name, StepOutcome::from_moves(moves)));
            }
            None => {
                debug!("{} search exhausted", pair.name);
                steps.push(SolveStep::new(pair.name, StepOutcome::failed()));
            }
        }
    }

    // OLL runs in two passes: orient the top edges, then the corners.
    if !current.is_top_cross_oriented() {
        match search(
            &current,
            &CubeState::is_top_cross_oriented,
            config.oll_cross_depth,
            &OLL_CROSS_MOVES,
            Some(&CubeState::is_f2l_solved),
        ) {
            Some(moves) => {
                current = current.apply_moves(&moves);
                steps.push(SolveStep::new(
                    "OLL (Cross)",
                    StepOutcome::from_moves(moves),
                ));
            }
            None => steps.push(SolveStep::new("OLL (Cross)", StepOutcome::failed())),
        }
    }

    if !current.is_top_corners_oriented() {
        let validator = |s: &CubeState| s.is_f2l_solved() && s.is_top_cross_oriented();
        match match_algorithm(
            &current,
            config.oll_cases,
            &CubeState::is_top_corners_oriented,
            &validator,
        ) {
            Some(found) => {
                debug!("OLL case {} matched", found.name);
                current = current.apply_moves(&found.moves);
                steps.push(SolveStep::new(
                    format!("OLL ({})", found.name),
                    StepOutcome::Moves(found.moves),
                ));
            }
            None => match search(
                &current,
                &CubeState::is_oll_solved,
                config.oll_depth,
                &OLL_SEARCH_MOVES,
                Some(&CubeState::is_f2l_solved),
            ) {
                Some(moves) => {
                    current = current.apply_moves(&moves);
                    steps.push(SolveStep::new(
                        "OLL (Search)",
                        StepOutcome::from_moves(moves),
                    ));
                }
                None => steps.push(SolveStep::new("OLL (Search)", StepOutcome::failed())),
            },
        }
    }

    if !current.is_solved_up_to_auf() {
        match match_algorithm(
            &current,
            config.pll_cases,
            &CubeState::is_solved_up_to_auf,
            &CubeState::is_oll_solved,
        ) {
            Some(found) => {
                debug!("PLL case {} matched", found.name);
                current = current.apply_moves(&found.moves);
                steps.push(SolveStep::new(
                    format!("PLL ({})", found.name),
                    StepOutcome::Moves(found.moves),
                ));
            }
            None => match search(
                &current,
                &CubeState::is_pll_solved,
                config.pll_depth,
                &PLL_SEARCH_MOVES,
                Some(&CubeState::is_oll_solved),
            ) {
                Some(moves) => {
                    current = current.apply_moves(&moves);
                    steps.push(SolveStep::new(
                        "PLL (Search)",
                        StepOutcome::from_moves(moves),
                    ));
                }
                None => steps.push(SolveStep::new("PLL (Search)", StepOutcome::failed())),
            },
        }
    }

    // Final adjustment, reported only when a turn is actually needed.
    if let Some(adjustment) = first_u_adjustment(&current, CubeState::is_solved) {
        if !adjustment.is_empty() {
            current = current.apply_moves(adjustment);
            steps.push(SolveStep::new(
                "AUF",
                StepOutcome::Moves(adjustment.to_vec()),
            ));
        }
    }

    let solved = current.is_solved();
    debug!("pipeline finished, solved: {solved}");
    Solution { steps, solved }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::{inverse_moves, parse_moves, B3, F3};

    fn step_names(solution: &Solution) -> Vec<&str> {
        solution.steps.iter().map(|s| s.name.as_str()).collect()
    }

    #[test_log::test]
    fn test_solved_input_reports_trivial_steps() {
        let solution = solve(&CubeState::solved(), &SolverConfig::default());

        assert!(solution.solved);
        assert_eq!(
            step_names(&solution),
            ["Cross", "F2L 1 (FR)", "F2L 2 (FL)", "F2L 3 (BL)", "F2L 4 (BR)"]
        );
        assert!(solution
            .steps
            .iter()
            .all(|s| s.outcome == StepOutcome::AlreadySolved));
        assert!(solution.all_moves().is_empty());
    }

    #[test_log::test]
    fn test_two_move_cross_scramble() {
        let state = CubeState::solved().apply_moves(&parse_moves("F B").unwrap());
        let solution = solve(&state, &SolverConfig::default());

        assert!(solution.solved);
        assert_eq!(solution.steps.len(), 5);
        assert_eq!(solution.steps[0].outcome, StepOutcome::Moves(vec![F3, B3]));
        assert!(solution.steps[1..]
            .iter()
            .all(|s| s.outcome == StepOutcome::AlreadySolved));
        assert_eq!(solution.all_moves(), parse_moves("F' B'").unwrap());
    }

    #[test_log::test]
    fn test_sune_case_end_to_end() {
        let sune = parse_moves("R U R' U R U2 R'").unwrap();
        let state = CubeState::solved().apply_moves(&inverse_moves(&sune));
        let solution = solve(&state, &SolverConfig::default());

        assert!(solution.solved);
        assert_eq!(
            step_names(&solution),
            [
                "Cross",
                "F2L 1 (FR)",
                "F2L 2 (FL)",
                "F2L 3 (BL)",
                "F2L 4 (BR)",
                "OLL (Sune)"
            ]
        );
        assert!(solution.steps[..5]
            .iter()
            .all(|s| s.outcome == StepOutcome::AlreadySolved));
        assert_eq!(solution.steps[5].outcome, StepOutcome::Moves(sune.clone()));
        assert_eq!(solution.all_moves(), sune);
    }

    #[test_log::test]
    fn test_t_perm_case_end_to_end() {
        let t_perm = parse_moves("R U R' U' R' F R2 U' R' U' R U R' F'").unwrap();
        let state = CubeState::solved().apply_moves(&inverse_moves(&t_perm));
        let solution = solve(&state, &SolverConfig::default());

        assert!(solution.solved);
        assert_eq!(
            step_names(&solution),
            [
                "Cross",
                "F2L 1 (FR)",
                "F2L 2 (FL)",
                "F2L 3 (BL)",
                "F2L 4 (BR)",
                "PLL (T-Perm)"
            ]
        );
        assert_eq!(solution.steps[5].outcome, StepOutcome::Moves(t_perm));
    }

    #[test_log::test]
    fn test_lone_top_turn_needs_only_auf() {
        let state = CubeState::solved().apply_moves(&parse_moves("U").unwrap());
        let solution = solve(&state, &SolverConfig::default());

        assert!(solution.solved);
        assert_eq!(
            step_names(&solution),
            ["Cross", "F2L 1 (FR)", "F2L 2 (FL)", "F2L 3 (BL)", "F2L 4 (BR)", "AUF"]
        );
        assert_eq!(solution.all_moves(), parse_moves("U'").unwrap());
    }

    #[test_log::test]
    fn test_cross_failure_halts_pipeline() {
        let state = CubeState::solved().apply_moves(&parse_moves("R").unwrap());
        let config = SolverConfig {
            cross_depth: 0,
            ..SolverConfig::default()
        };
        let solution = solve(&state, &config);

        assert!(!solution.solved);
        assert_eq!(solution.steps.len(), 1);
        assert_eq!(solution.steps[0].name, "Error");
        assert_eq!(
            solution.steps[0].outcome,
            StepOutcome::Failed("Cross search failed. Solve cross manually first.".to_string())
        );
    }

    #[test_log::test]
    fn test_stuck_pair_is_annotated_and_pipeline_continues() {
        // The sexy move displaces only the FR pair's corner (plus top-layer
        // pieces); with the pair search disabled the pipeline must report
        // the stuck pair and still run every later stage.
        let state = CubeState::solved().apply_moves(&parse_moves("R U R' U'").unwrap());
        let config = SolverConfig {
            f2l_depth: 0,
            ..SolverConfig::default()
        };
        let solution = solve(&state, &config);

        assert!(!solution.solved);
        assert_eq!(
            step_names(&solution),
            [
                "Cross",
                "F2L 1 (FR)",
                "F2L 2 (FL)",
                "F2L 3 (BL)",
                "F2L 4 (BR)",
                "OLL (Search)",
                "PLL (Search)"
            ]
        );
        assert_eq!(solution.steps[1].outcome, StepOutcome::failed());
        assert_eq!(solution.steps[2].outcome, StepOutcome::AlreadySolved);
        assert_eq!(solution.steps[5].outcome, StepOutcome::failed());
        assert_eq!(solution.steps[6].outcome, StepOutcome::failed());
    }

    #[test]
    fn test_step_outcome_rendering() {
        assert_eq!(
            StepOutcome::Moves(parse_moves("R U2 B'").unwrap()).to_string(),
            "R U2 B'"
        );
        assert_eq!(StepOutcome::AlreadySolved.to_string(), "Already Solved");
        assert_eq!(StepOutcome::failed().to_string(), "Search failed (too complex)");
    }
}

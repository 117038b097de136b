//! Curated OLL and PLL algorithm tables and the pattern matcher.
//!
//! The tables are ordered: the matcher probes the four top-face
//! pre-rotations in turn and, within each, the entries in table order, so
//! earlier entries take priority. Entries are stored exactly as written in
//! the reference tables; a few use slice, wide-turn or rotation notation
//! outside the face-turn alphabet and are skipped at parse time, leaving
//! those cases to the fallback search.

use log::debug;

use crate::cube::{parse_moves, CubeState, Move, U_ADJUSTMENTS};

/// A named algorithm. The move string is kept verbatim and parsed on use.
#[derive(Debug, Clone, Copy)]
pub struct NamedAlg {
    pub name: &'static str,
    pub moves: &'static str,
}

/// Common PLL cases, in match-priority order.
pub static PLL_CASES: &[NamedAlg] = &[
    NamedAlg {
        name: "T-Perm",
        moves: "R U R' U' R' F R2 U' R' U' R U R' F'",
    },
    NamedAlg {
        name: "Ua-Perm",
        moves: "R2 U R U R' U' R' U' R' U R'",
    },
    NamedAlg {
        name: "Ub-Perm",
        moves: "R U' R U R U R U' R' U' R2",
    },
    NamedAlg {
        name: "Aa-Perm",
        moves: "x R' U R' D2 R U' R' D2 R2",
    },
    NamedAlg {
        name: "Ab-Perm",
        moves: "x R2 D2 R U R' D2 R U' R",
    },
    NamedAlg {
        name: "H-Perm",
        moves: "M2 U M2 U2 M2 U M2",
    },
    NamedAlg {
        name: "Z-Perm",
        moves: "M' U M2 U M2 U M' U2 M2",
    },
    NamedAlg {
        name: "Y-Perm",
        moves: "F R U' R' U' R U R' F' R U R' U' R' F R F'",
    },
    NamedAlg {
        name: "J-Perm",
        moves: "R U R' F' R U R' U' R' F R2 U' R'",
    },
    NamedAlg {
        name: "F-Perm",
        moves: "R' U' F' R U R' U' R' F R2 U' R' U' R U R' U R",
    },
];

/// Common OLL corner-orientation cases, in match-priority order.
pub static OLL_CASES: &[NamedAlg] = &[
    NamedAlg {
        name: "Sune",
        moves: "R U R' U R U2 R'",
    },
    NamedAlg {
        name: "Antisune",
        moves: "R U2 R' U' R U' R'",
    },
    NamedAlg {
        name: "T-OLL",
        moves: "F R U R' U' F'",
    },
    NamedAlg {
        name: "U-OLL",
        moves: "R2 D R' U2 R D' R' U2 R'",
    },
    NamedAlg {
        name: "L-OLL",
        moves: "F R' F' r U R U' r'",
    },
];

/// A successful table match: the case name and the full sequence to apply,
/// pre-rotation prefix included.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgMatch {
    pub name: &'static str,
    pub moves: Vec<Move>,
}

/// Probe `library` against `state` under the four top-face pre-rotations.
///
/// A candidate wins when applying the pre-rotation and the entry satisfies
/// both `goal` and `validator`. The first winner in (rotation, table) order
/// is returned; `None` means no entry fits and the caller should fall back
/// to the search engine.
pub fn match_algorithm(
    state: &CubeState,
    library: &[NamedAlg],
    goal: &dyn Fn(&CubeState) -> bool,
    validator: &dyn Fn(&CubeState) -> bool,
) -> Option<AlgMatch> {
    let parsed: Vec<(&NamedAlg, Vec<Move>)> = library
        .iter()
        .filter_map(|case| match parse_moves(case.moves) {
            Ok(alg) => Some((case, alg)),
            Err(err) => {
                debug!("skipping algorithm entry {}: {err}", case.name);
                None
            }
        })
        .collect();

    for rotation in U_ADJUSTMENTS {
        let rotated = state.apply_moves(rotation);
        for (case, alg) in &parsed {
            let candidate = rotated.apply_moves(alg);
            if goal(&candidate) && validator(&candidate) {
                let mut moves = rotation.to_vec();
                moves.extend_from_slice(alg);
                return Some(AlgMatch {
                    name: case.name,
                    moves,
                });
            }
        }
    }

    None
}

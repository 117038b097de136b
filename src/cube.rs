//! Cube state representation, move notation and move application.
//!
//! The state types deserialize directly from the JSON pattern dumps of the
//! TypeScript frontend: one object per piece orbit with `pieces` and
//! `orientation` arrays. Slot indexing follows the upstream kpuzzle
//! definition and is fixed throughout the crate.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The six turnable faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

impl Face {
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
        }
    }
}

/// One of the 18 face turns: a face and a clockwise quarter-turn count.
///
/// `turns` is 1 (clockwise), 2 (half turn) or 3 (counterclockwise, written
/// with a prime in notation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    face: Face,
    turns: u8,
}

impl Move {
    /// Build a move. Panics if `turns` is outside 1..=3.
    pub const fn new(face: Face, turns: u8) -> Self {
        assert!(turns >= 1 && turns <= 3);
        Self { face, turns }
    }

    pub const fn face(self) -> Face {
        self.face
    }

    pub const fn turns(self) -> u8 {
        self.turns
    }

    /// The move undoing this one (same face, complementary turn count).
    pub const fn inverse(self) -> Move {
        Move::new(self.face, 4 - self.turns)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.turns {
            1 => "",
            2 => "2",
            _ => "'",
        };
        write!(f, "{}{}", self.face.letter(), suffix)
    }
}

/// A token outside the 18-turn face notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized move token `{0}`")]
pub struct ParseMoveError(String);

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = match chars.next() {
            Some('U') => Face::U,
            Some('D') => Face::D,
            Some('L') => Face::L,
            Some('R') => Face::R,
            Some('F') => Face::F,
            Some('B') => Face::B,
            _ => return Err(ParseMoveError(s.to_string())),
        };
        let turns = match chars.as_str() {
            "" => 1,
            "2" => 2,
            "'" => 3,
            _ => return Err(ParseMoveError(s.to_string())),
        };
        Ok(Move::new(face, turns))
    }
}

/// Parse a whitespace-separated move sequence. Empty input is the identity.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, ParseMoveError> {
    s.split_whitespace().map(str::parse).collect()
}

/// Render a sequence in standard notation, tokens joined by single spaces.
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().join(" ")
}

/// Inverse of a sequence: reversed order, each move inverted.
pub fn inverse_moves(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|m| m.inverse()).collect()
}

pub(crate) const U1: Move = Move::new(Face::U, 1);
pub(crate) const U2: Move = Move::new(Face::U, 2);
pub(crate) const U3: Move = Move::new(Face::U, 3);
pub(crate) const D1: Move = Move::new(Face::D, 1);
pub(crate) const D2: Move = Move::new(Face::D, 2);
pub(crate) const D3: Move = Move::new(Face::D, 3);
pub(crate) const L1: Move = Move::new(Face::L, 1);
pub(crate) const L2: Move = Move::new(Face::L, 2);
pub(crate) const L3: Move = Move::new(Face::L, 3);
pub(crate) const R1: Move = Move::new(Face::R, 1);
pub(crate) const R2: Move = Move::new(Face::R, 2);
pub(crate) const R3: Move = Move::new(Face::R, 3);
pub(crate) const F1: Move = Move::new(Face::F, 1);
pub(crate) const F2: Move = Move::new(Face::F, 2);
pub(crate) const F3: Move = Move::new(Face::F, 3);
pub(crate) const B1: Move = Move::new(Face::B, 1);
pub(crate) const B2: Move = Move::new(Face::B, 2);
pub(crate) const B3: Move = Move::new(Face::B, 3);

/// The full 18-turn alphabet in search order. The bounded search breaks
/// ties in this order.
pub const ALL_MOVES: [Move; 18] = [
    U1, U3, U2, D1, D3, D2, L1, L3, L2, R1, R3, R2, F1, F3, F2, B1, B3, B2,
];

/// Edge orbit: 12 slots in the fixed order
/// UF UR UB UL DF DR DB DL FR FL BR BL.
///
/// `pieces[i]` is the piece currently in slot `i`; `orientation[i]` is the
/// flip (mod 2) of that piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeOrbit {
    pub pieces: [u8; 12],
    pub orientation: [u8; 12],
}

/// Corner orbit: 8 slots in the fixed order UFR UBR UBL UFL DFR DFL DBL DBR.
///
/// `orientation[i]` is the twist (mod 3) of the piece in slot `i`, counted
/// clockwise from the U/D sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerOrbit {
    pub pieces: [u8; 8],
    pub orientation: [u8; 8],
}

/// A full cube state - matches the TypeScript pattern JSON. Unknown orbits
/// in the input (centers) are ignored on deserialization.
///
/// States are immutable: every operation returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeState {
    #[serde(rename = "EDGES")]
    pub edges: EdgeOrbit,
    #[serde(rename = "CORNERS")]
    pub corners: CornerOrbit,
}

/// Canonical visited-set key: both orbits' piece and orientation arrays
/// concatenated in fixed order.
pub type Fingerprint = [u8; 40];

/// One clockwise quarter turn of a face, as a slot permutation plus
/// orientation deltas. `edge_perm[i]` names the slot whose piece moves into
/// slot `i`; the flip/twist delta is added to the arriving piece.
struct FaceTable {
    edge_perm: [usize; 12],
    edge_flip: [u8; 12],
    corner_perm: [usize; 8],
    corner_twist: [u8; 8],
}

/// Base tables indexed by `Face as usize`. Only F and B flip edges; U and D
/// leave all orientations alone.
const FACE_TABLES: [FaceTable; 6] = [
    // U
    FaceTable {
        edge_perm: [1, 2, 3, 0, 4, 5, 6, 7, 8, 9, 10, 11],
        edge_flip: [0; 12],
        corner_perm: [1, 2, 3, 0, 4, 5, 6, 7],
        corner_twist: [0; 8],
    },
    // D
    FaceTable {
        edge_perm: [0, 1, 2, 3, 7, 4, 5, 6, 8, 9, 10, 11],
        edge_flip: [0; 12],
        corner_perm: [0, 1, 2, 3, 5, 6, 7, 4],
        corner_twist: [0; 8],
    },
    // L
    FaceTable {
        edge_perm: [0, 1, 2, 11, 4, 5, 6, 9, 8, 3, 10, 7],
        edge_flip: [0; 12],
        corner_perm: [0, 1, 6, 2, 4, 3, 5, 7],
        corner_twist: [0, 0, 2, 1, 0, 2, 1, 0],
    },
    // R
    FaceTable {
        edge_perm: [0, 8, 2, 3, 4, 10, 6, 7, 5, 9, 1, 11],
        edge_flip: [0; 12],
        corner_perm: [4, 0, 2, 3, 7, 5, 6, 1],
        corner_twist: [2, 1, 0, 0, 1, 0, 0, 2],
    },
    // F
    FaceTable {
        edge_perm: [9, 1, 2, 3, 8, 5, 6, 7, 0, 4, 10, 11],
        edge_flip: [1, 0, 0, 0, 1, 0, 0, 0, 1, 1, 0, 0],
        corner_perm: [3, 1, 2, 5, 0, 4, 6, 7],
        corner_twist: [1, 0, 0, 2, 2, 1, 0, 0],
    },
    // B
    FaceTable {
        edge_perm: [0, 1, 10, 3, 4, 5, 11, 7, 8, 9, 6, 2],
        edge_flip: [0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 1],
        corner_perm: [0, 7, 1, 3, 4, 5, 2, 6],
        corner_twist: [0, 2, 1, 0, 0, 0, 2, 1],
    },
];

impl CubeState {
    /// The solved state: every slot holds its own piece, unrotated.
    pub const fn solved() -> Self {
        CubeState {
            edges: EdgeOrbit {
                pieces: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
                orientation: [0; 12],
            },
            corners: CornerOrbit {
                pieces: [0, 1, 2, 3, 4, 5, 6, 7],
                orientation: [0; 8],
            },
        }
    }

    /// Apply one move, returning the new state. Total: succeeds on any
    /// state, including ill-formed ones.
    pub fn apply(&self, mv: Move) -> CubeState {
        let table = &FACE_TABLES[mv.face() as usize];
        let mut state = *self;
        for _ in 0..mv.turns() {
            state = state.quarter_turn(table);
        }
        state
    }

    /// Apply a sequence left to right. The empty sequence is the identity.
    pub fn apply_moves(&self, moves: &[Move]) -> CubeState {
        moves.iter().fold(*self, |state, &mv| state.apply(mv))
    }

    fn quarter_turn(&self, table: &FaceTable) -> CubeState {
        let mut next = *self;
        for i in 0..12 {
            let from = table.edge_perm[i];
            next.edges.pieces[i] = self.edges.pieces[from];
            next.edges.orientation[i] =
                (self.edges.orientation[from] % 2 + table.edge_flip[i]) % 2;
        }
        for i in 0..8 {
            let from = table.corner_perm[i];
            next.corners.pieces[i] = self.corners.pieces[from];
            next.corners.orientation[i] =
                (self.corners.orientation[from] % 3 + table.corner_twist[i]) % 3;
        }
        next
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let mut key = [0u8; 40];
        key[..12].copy_from_slice(&self.edges.pieces);
        key[12..24].copy_from_slice(&self.edges.orientation);
        key[24..32].copy_from_slice(&self.corners.pieces);
        key[32..].copy_from_slice(&self.corners.orientation);
        key
    }

    fn edge_home(&self, slot: usize) -> bool {
        self.edges.pieces[slot] == slot as u8 && self.edges.orientation[slot] == 0
    }

    fn corner_home(&self, slot: usize) -> bool {
        self.corners.pieces[slot] == slot as u8 && self.corners.orientation[slot] == 0
    }

    /// Bottom-layer cross: edge slots 4..=7 hold their own pieces, oriented.
    pub fn is_cross_solved(&self) -> bool {
        (4..8).all(|i| self.edge_home(i))
    }

    /// One F2L pair: the given edge and corner slot each hold their own
    /// piece, oriented.
    pub fn is_pair_solved(&self, edge: usize, corner: usize) -> bool {
        self.edge_home(edge) && self.corner_home(corner)
    }

    /// First two layers: cross, middle-layer edges and bottom corners all
    /// home.
    pub fn is_f2l_solved(&self) -> bool {
        self.is_cross_solved()
            && (8..12).all(|i| self.edge_home(i))
            && (4..8).all(|i| self.corner_home(i))
    }

    /// All four top-layer edges oriented (the top cross shows).
    pub fn is_top_cross_oriented(&self) -> bool {
        self.edges.orientation[..4].iter().all(|&o| o == 0)
    }

    /// All four top-layer corners oriented.
    pub fn is_top_corners_oriented(&self) -> bool {
        self.corners.orientation[..4].iter().all(|&o| o == 0)
    }

    /// Last layer fully oriented on top of a solved F2L.
    pub fn is_oll_solved(&self) -> bool {
        self.is_f2l_solved() && self.is_top_cross_oriented() && self.is_top_corners_oriented()
    }

    pub fn is_solved(&self) -> bool {
        *self == CubeState::solved()
    }

    /// Solved once some final top-face adjustment is applied.
    pub fn is_solved_up_to_auf(&self) -> bool {
        first_u_adjustment(self, CubeState::is_solved).is_some()
    }

    /// Last layer permuted: only a top-face adjustment remains.
    pub fn is_pll_solved(&self) -> bool {
        self.is_oll_solved() && self.is_solved_up_to_auf()
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

/// The four top-face adjustments, identity first. Shared by the algorithm
/// matcher, the PLL goal check and the final AUF stage.
pub const U_ADJUSTMENTS: [&[Move]; 4] = [&[], &[U1], &[U2], &[U3]];

/// The first adjustment in [`U_ADJUSTMENTS`] order whose application
/// satisfies `pred`, if any.
pub fn first_u_adjustment(
    state: &CubeState,
    pred: impl Fn(&CubeState) -> bool,
) -> Option<&'static [Move]> {
    U_ADJUSTMENTS
        .into_iter()
        .find(|adj| pred(&state.apply_moves(adj)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrambled() -> CubeState {
        CubeState::solved().apply_moves(&parse_moves("R U F2 L' D B' R2 U'").unwrap())
    }

    #[test]
    fn test_four_quarter_turns_is_identity() {
        for face in [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B] {
            let mv = Move::new(face, 1);
            let mut state = scrambled();
            for _ in 0..4 {
                state = state.apply(mv);
            }
            assert_eq!(state, scrambled(), "{face:?}4 should be the identity");
        }
    }

    #[test]
    fn test_apply_then_inverse_is_identity() {
        let start = scrambled();
        for mv in ALL_MOVES {
            assert_eq!(
                start.apply(mv).apply(mv.inverse()),
                start,
                "{mv} then {} should restore the state",
                mv.inverse()
            );
        }
    }

    #[test]
    fn test_empty_sequence_is_identity() {
        let start = scrambled();
        assert_eq!(start.apply_moves(&[]), start);
    }

    #[test]
    fn test_sexy_move_has_order_six() {
        let sexy = parse_moves("R U R' U'").unwrap();
        let mut state = CubeState::solved();
        for _ in 0..5 {
            state = state.apply_moves(&sexy);
            assert!(!state.is_solved());
        }
        state = state.apply_moves(&sexy);
        assert!(state.is_solved());
    }

    #[test]
    fn test_t_perm_is_self_inverse() {
        let t_perm = parse_moves("R U R' U' R' F R2 U' R' U' R U R' F'").unwrap();
        let once = CubeState::solved().apply_moves(&t_perm);
        assert!(!once.is_solved());
        assert!(once.apply_moves(&t_perm).is_solved());
    }

    #[test]
    fn test_sequence_inverse_restores_state() {
        let seq = parse_moves("F R' D2 B L U' R F2").unwrap();
        let state = CubeState::solved().apply_moves(&seq);
        assert!(state.apply_moves(&inverse_moves(&seq)).is_solved());
    }

    #[test]
    fn test_move_notation_round_trip() {
        for mv in ALL_MOVES {
            let rendered = mv.to_string();
            assert_eq!(rendered.parse::<Move>().unwrap(), mv);
        }
        assert_eq!(format_moves(&parse_moves("R U2 B'").unwrap()), "R U2 B'");
    }

    #[test]
    fn test_move_notation_rejects_foreign_tokens() {
        for token in ["M2", "M'", "x", "r", "u2", "", "R2'", "U4", "RR"] {
            assert!(token.parse::<Move>().is_err(), "`{token}` should not parse");
        }
    }

    #[test]
    fn test_parse_moves_empty_input() {
        assert_eq!(parse_moves("").unwrap(), Vec::new());
        assert_eq!(parse_moves("  \n ").unwrap(), Vec::new());
    }

    #[test]
    fn test_parse_moves_reports_bad_token() {
        let err = parse_moves("R U M2 F").unwrap_err();
        assert_eq!(err.to_string(), "unrecognized move token `M2`");
    }

    #[test]
    fn test_fingerprint_tracks_state_identity() {
        let solved = CubeState::solved();
        let turned = solved.apply(U1);
        assert_eq!(solved.fingerprint(), CubeState::solved().fingerprint());
        assert_ne!(solved.fingerprint(), turned.fingerprint());
    }

    #[test]
    fn test_solved_state_predicates() {
        let solved = CubeState::solved();
        assert!(solved.is_cross_solved());
        assert!(solved.is_f2l_solved());
        assert!(solved.is_oll_solved());
        assert!(solved.is_pll_solved());
        assert!(solved.is_solved());
    }

    #[test]
    fn test_top_turn_preserves_lower_layers() {
        let state = CubeState::solved().apply(U1);
        assert!(state.is_cross_solved());
        assert!(state.is_f2l_solved());
        assert!(state.is_top_cross_oriented());
        assert!(state.is_top_corners_oriented());
        assert!(!state.is_solved());
        assert!(state.is_solved_up_to_auf());
    }

    #[test]
    fn test_side_turn_breaks_cross() {
        let state = CubeState::solved().apply(R1);
        assert!(!state.is_cross_solved());
        assert!(!state.is_f2l_solved());
        assert!(!state.is_solved_up_to_auf());
    }

    #[test]
    fn test_first_u_adjustment_picks_first_fit() {
        let state = CubeState::solved().apply(U1);
        assert_eq!(
            first_u_adjustment(&state, CubeState::is_solved),
            Some(&[U3][..])
        );
        assert_eq!(
            first_u_adjustment(&CubeState::solved(), CubeState::is_solved),
            Some(&[][..])
        );
        assert_eq!(
            first_u_adjustment(&CubeState::solved().apply(R1), CubeState::is_solved),
            None
        );
    }

    #[test]
    fn test_pattern_json_round_trip() {
        let state = scrambled();
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"EDGES\""));
        let back: CubeState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_pattern_json_ignores_unknown_orbits() {
        let json = r#"{
            "EDGES": {
                "pieces": [0,1,2,3,4,5,6,7,8,9,10,11],
                "orientation": [0,0,0,0,0,0,0,0,0,0,0,0]
            },
            "CORNERS": {
                "pieces": [0,1,2,3,4,5,6,7],
                "orientation": [0,0,0,0,0,0,0,0]
            },
            "CENTERS": {
                "pieces": [0,1,2,3,4,5],
                "orientation": [0,0,0,0,0,0]
            }
        }"#;
        let state: CubeState = serde_json::from_str(json).unwrap();
        assert!(state.is_solved());
    }
}

//! Core board engine for peg solitaire.
//!
//! This module defines the puzzle's fundamental components:
//! - `BoardState`: an immutable n x n peg layout derived from an integer seed, together
//!   with the cell that was empty in the root layout (the goal anchor).
//! - `Move`: a (jumper, goner, newpos) triple, its legality predicate and its application.
//! - Legal-move enumeration via `BoardState::applicable_actions`.
use crate::error::PegError;
use std::fmt;

/// Largest supported board side. The whole occupancy must fit the `u128` key.
pub const MAX_SIDE: usize = 11;

/// Largest supported number of cells (`MAX_SIDE * MAX_SIDE`).
pub const MAX_CELLS: usize = MAX_SIDE * MAX_SIDE;

/// Offsets (row, col) of the eight neighbours of a cell, in ascending index order.
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Represents one peg layout on a square board.
///
/// Occupancy is stored as the integer whose zero-padded binary expansion, read from the
/// most significant bit, lists the cells in row-major order (bit set = peg present).
/// That integer is the state's canonical key: two layouts on the same board are equal
/// iff their keys are equal.
///
/// A `BoardState` is never mutated. Every move produces a new value that carries the
/// board side and the root's `initial_empty` cell unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardState {
    bits: u128,
    side: usize,
    initial_empty: Option<usize>,
}

impl BoardState {
    /// Builds the root state for `seed`.
    ///
    /// The side is the smallest `n` with `n * n` at least the bit length of `seed`
    /// (the seed `0` counts as one bit). The binary expansion is left-padded to `n * n`
    /// cells and the first empty cell becomes the goal anchor; a fully occupied board has
    /// no anchor, which is legal input whose anchored goal can never be reached.
    ///
    /// # Errors
    /// Returns `PegError::BoardTooLarge` if the seed needs more than `MAX_CELLS` bits.
    ///
    /// # Examples
    /// ```
    /// use peg_solitaire::engine::BoardState;
    ///
    /// let board = BoardState::new(65023).unwrap();
    /// assert_eq!(board.side(), 4);
    /// assert_eq!(board.initial_empty(), Some(6));
    /// assert_eq!(board.peg_count(), 15);
    /// ```
    pub fn new(seed: u128) -> Result<Self, PegError> {
        let bit_length = ((u128::BITS - seed.leading_zeros()) as usize).max(1);
        if bit_length > MAX_CELLS {
            return Err(PegError::BoardTooLarge { bits: bit_length });
        }

        let mut side = 1;
        while side * side < bit_length {
            side += 1;
        }
        Ok(Self::from_cells(side, seed))
    }

    /// Builds a root state with an explicit side length.
    ///
    /// Used when the layout comes from a drawn grid, where leading empty rows must not
    /// shrink the board. The caller guarantees `side <= MAX_SIDE` and that `bits` has no
    /// set bit beyond `side * side`.
    pub(crate) fn from_cells(side: usize, bits: u128) -> Self {
        let mut board = BoardState {
            bits,
            side,
            initial_empty: None,
        };
        board.initial_empty = (0..board.cell_count()).find(|&idx| !board.is_occupied(idx));
        board
    }

    /// Returns a state on the same board (same side and anchor) with another occupancy.
    pub(crate) fn with_occupancy(&self, bits: u128) -> Self {
        BoardState { bits, ..*self }
    }

    /// The canonical integer identity of this layout.
    pub fn key(&self) -> u128 {
        self.bits
    }

    /// Side length `n` of the `n x n` grid.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of cells on the board (`side * side`).
    pub fn cell_count(&self) -> usize {
        self.side * self.side
    }

    /// The cell that was empty in the root state, if any.
    pub fn initial_empty(&self) -> Option<usize> {
        self.initial_empty
    }

    /// Converts a cell index into `(row, col)` coordinates.
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx / self.side, idx % self.side)
    }

    fn mask(&self, idx: usize) -> u128 {
        1u128 << (self.cell_count() - 1 - idx)
    }

    /// Returns whether a peg sits on cell `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is outside the board.
    pub fn is_occupied(&self, idx: usize) -> bool {
        assert!(
            idx < self.cell_count(),
            "cell {} is outside a {}x{} board",
            idx,
            self.side,
            self.side
        );
        self.bits & self.mask(idx) != 0
    }

    /// Iterates over the occupied cells in ascending index order.
    pub fn pegs(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cell_count()).filter(move |&idx| self.is_occupied(idx))
    }

    /// Number of pegs on the board.
    pub fn peg_count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Relaxed goal: exactly one peg remains, anywhere.
    pub fn goal_remaining(&self) -> bool {
        self.peg_count() == 1
    }

    /// Anchored goal: exactly one peg remains and it sits on the root's empty cell.
    ///
    /// Always false when the root board had no empty cell.
    pub fn goal(&self) -> bool {
        self.peg_count() == 1
            && self
                .initial_empty
                .map_or(false, |anchor| self.is_occupied(anchor))
    }

    /// Lists every legal move from this state, in lexicographic
    /// `(jumper, goner, newpos)` order.
    ///
    /// Every legal move lands on `goner + (goner - jumper)` in grid coordinates, so only
    /// occupied neighbours of each peg are tried and the single landing cell is confirmed
    /// with `Move::is_legal`. This yields exactly the moves a scan over all distinct
    /// index triples would accept, at O(pegs) instead of O(n^6).
    pub fn applicable_actions(&self) -> Vec<Move> {
        let side = self.side as isize;
        let in_bounds = |r: isize, c: isize| r >= 0 && r < side && c >= 0 && c < side;
        let mut actions = Vec::new();

        for jumper in self.pegs() {
            let (jr, jc) = self.coords(jumper);
            let (jr, jc) = (jr as isize, jc as isize);

            for (dr, dc) in NEIGHBOUR_OFFSETS {
                let (gr, gc) = (jr + dr, jc + dc);
                let (nr, nc) = (gr + dr, gc + dc);
                if !in_bounds(gr, gc) || !in_bounds(nr, nc) {
                    continue;
                }
                let candidate = Move::new(
                    jumper,
                    (gr * side + gc) as usize,
                    (nr * side + nc) as usize,
                );
                if candidate.is_legal(self) {
                    actions.push(candidate);
                }
            }
        }
        actions
    }

    /// Applies a move that is already known to be legal.
    pub(crate) fn jump(&self, mv: Move) -> BoardState {
        let cleared = self.bits & !self.mask(mv.jumper) & !self.mask(mv.goner);
        self.with_occupancy(cleared | self.mask(mv.newpos))
    }
}

impl fmt::Display for BoardState {
    /// Renders the grid with `X` for a peg and `O` for an empty cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.side {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.side {
                if col > 0 {
                    write!(f, " ")?;
                }
                let glyph = if self.is_occupied(row * self.side + col) {
                    'X'
                } else {
                    'O'
                };
                write!(f, "{}", glyph)?;
            }
        }
        Ok(())
    }
}

/// A single jump: the peg on `jumper` leaps over `goner` and lands on `newpos`.
///
/// Moves carry no state of their own; each one is validated against a specific board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub jumper: usize,
    pub goner: usize,
    pub newpos: usize,
}

impl Move {
    pub fn new(jumper: usize, goner: usize, newpos: usize) -> Self {
        Move {
            jumper,
            goner,
            newpos,
        }
    }

    /// Checks the move's precondition against `state`.
    ///
    /// The three cells must be distinct and on the board, `jumper` and `goner` must hold
    /// pegs, `newpos` must be empty, and the cells must form a straight horizontal,
    /// vertical or diagonal line of consecutive cells with `goner` in the middle.
    pub fn is_legal(&self, state: &BoardState) -> bool {
        let cells = state.cell_count();
        if self.jumper >= cells || self.goner >= cells || self.newpos >= cells {
            return false;
        }
        if self.jumper == self.goner || self.jumper == self.newpos || self.goner == self.newpos {
            return false;
        }
        if !state.is_occupied(self.jumper)
            || !state.is_occupied(self.goner)
            || state.is_occupied(self.newpos)
        {
            return false;
        }
        self.is_aligned(state.side())
    }

    /// Geometric half of the legality predicate, independent of occupancy.
    pub fn is_aligned(&self, side: usize) -> bool {
        let to_coords = |idx: usize| ((idx / side) as isize, (idx % side) as isize);
        let (jr, jc) = to_coords(self.jumper);
        let (gr, gc) = to_coords(self.goner);
        let (nr, nc) = to_coords(self.newpos);

        let horizontal = jr == gr && gr == nr && (jc - gc).abs() == 1 && (gc - nc).abs() == 1;
        let vertical = jc == gc && gc == nc && (jr - gr).abs() == 1 && (gr - nr).abs() == 1;
        // Unit steps in both axes on both hops; jumper and landing must differ in both
        // row and column so the hops cannot fold back.
        let diagonal = (jr - gr).abs() == 1
            && (jc - gc).abs() == 1
            && (gr - nr).abs() == 1
            && (gc - nc).abs() == 1
            && jr != nr
            && jc != nc;

        horizontal || vertical || diagonal
    }

    /// Applies the move to `state`, producing the successor.
    ///
    /// # Errors
    /// Returns `PegError::InvalidMove` if the move is not legal on `state`.
    ///
    /// # Examples
    /// ```
    /// use peg_solitaire::engine::{BoardState, Move};
    ///
    /// let board = BoardState::new(65023).unwrap();
    /// let next = Move::new(4, 5, 6).apply(&board).unwrap();
    /// assert_eq!(next.peg_count(), 14);
    /// assert_eq!(next.initial_empty(), board.initial_empty());
    /// assert!(Move::new(0, 1, 2).apply(&board).is_err());
    /// ```
    pub fn apply(&self, state: &BoardState) -> Result<BoardState, PegError> {
        if !self.is_legal(state) {
            return Err(PegError::InvalidMove {
                jumper: self.jumper,
                goner: self.goner,
                newpos: self.newpos,
            });
        }
        Ok(state.jump(*self))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The peg in slot {} jumps over the peg in slot {} and lands in slot {}",
            self.jumper, self.goner, self.newpos
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Scans every distinct index triple, as the predicate is defined.
    fn naive_actions(state: &BoardState) -> Vec<Move> {
        let cells = state.cell_count();
        let mut actions = Vec::new();
        for jumper in 0..cells {
            for goner in 0..cells {
                for newpos in 0..cells {
                    if jumper != goner && jumper != newpos && goner != newpos {
                        let mv = Move::new(jumper, goner, newpos);
                        if mv.is_legal(state) {
                            actions.push(mv);
                        }
                    }
                }
            }
        }
        actions
    }

    fn moves(triples: &[(usize, usize, usize)]) -> Vec<Move> {
        triples
            .iter()
            .map(|&(j, g, n)| Move::new(j, g, n))
            .collect()
    }

    #[test]
    fn test_new_default_seed() {
        let board = BoardState::new(65023).unwrap();
        assert_eq!(board.side(), 4);
        assert_eq!(board.cell_count(), 16);
        assert_eq!(board.key(), 65023);
        assert_eq!(board.initial_empty(), Some(6));
        assert_eq!(board.peg_count(), 15);
        assert!(!board.is_occupied(6));
        assert!(board.is_occupied(0));
        assert!(board.is_occupied(15));
        assert!(!board.goal_remaining());
        assert!(!board.goal());
    }

    #[test]
    fn test_new_pads_to_square() {
        // "1110" fills a 2x2 board exactly.
        let board = BoardState::new(0b1110).unwrap();
        assert_eq!(board.side(), 2);
        assert_eq!(board.initial_empty(), Some(3));

        // "10" is padded to "0010".
        let board = BoardState::new(0b10).unwrap();
        assert_eq!(board.side(), 2);
        assert_eq!(board.initial_empty(), Some(0));
        assert!(board.is_occupied(2));
        assert_eq!(board.pegs().collect::<Vec<_>>(), vec![2]);

        // Five bits need a 3x3 board: "000011111".
        let board = BoardState::new(0b11111).unwrap();
        assert_eq!(board.side(), 3);
        assert_eq!(board.initial_empty(), Some(0));
        assert_eq!(board.pegs().collect::<Vec<_>>(), vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_new_zero_seed() {
        let board = BoardState::new(0).unwrap();
        assert_eq!(board.side(), 1);
        assert_eq!(board.initial_empty(), Some(0));
        assert_eq!(board.peg_count(), 0);
        assert!(board.applicable_actions().is_empty());
    }

    #[test]
    fn test_new_rejects_oversized_seed() {
        let largest = (1u128 << MAX_CELLS) - 1;
        let board = BoardState::new(largest).unwrap();
        assert_eq!(board.side(), MAX_SIDE);
        assert_eq!(board.initial_empty(), None);

        let result = BoardState::new(1u128 << MAX_CELLS);
        assert_eq!(
            result,
            Err(PegError::BoardTooLarge {
                bits: MAX_CELLS + 1
            })
        );
    }

    #[test]
    fn test_two_by_two_boards_have_no_actions() {
        for seed in 0..16u128 {
            let board = BoardState::new(seed).unwrap();
            assert!(board.side() <= 2);
            assert!(
                board.applicable_actions().is_empty(),
                "seed {} produced actions on a board of side {}",
                seed,
                board.side()
            );
        }
    }

    #[test]
    fn test_default_seed_actions() {
        let board = BoardState::new(65023).unwrap();
        assert_eq!(
            board.applicable_actions(),
            moves(&[(4, 5, 6), (12, 9, 6), (14, 10, 6)])
        );
    }

    #[test]
    fn test_actions_are_lexicographic_with_diagonals() {
        // X X O
        // X X X
        // O O O
        let board = BoardState::new(0b110_111_000).unwrap();
        assert_eq!(
            board.applicable_actions(),
            moves(&[(0, 1, 2), (0, 3, 6), (0, 4, 8), (1, 4, 7)])
        );
    }

    #[test]
    fn test_move_alignment() {
        let side = 4;
        assert!(Move::new(0, 1, 2).is_aligned(side)); // horizontal
        assert!(Move::new(2, 1, 0).is_aligned(side));
        assert!(Move::new(1, 5, 9).is_aligned(side)); // vertical
        assert!(Move::new(0, 5, 10).is_aligned(side)); // diagonal
        assert!(Move::new(3, 6, 9).is_aligned(side)); // anti-diagonal
        assert!(!Move::new(0, 5, 2).is_aligned(side)); // folds back to row 0
        assert!(!Move::new(0, 5, 8).is_aligned(side)); // folds back to column 0
        assert!(!Move::new(0, 1, 5).is_aligned(side)); // bends
        assert!(!Move::new(2, 3, 4).is_aligned(side)); // wraps across rows
        assert!(!Move::new(0, 2, 4).is_aligned(side)); // gaps
    }

    #[test]
    fn test_is_legal_checks_occupancy_and_bounds() {
        let board = BoardState::new(65023).unwrap();
        assert!(Move::new(4, 5, 6).is_legal(&board));
        assert!(!Move::new(6, 5, 4).is_legal(&board)); // jumper slot is empty
        assert!(!Move::new(0, 1, 2).is_legal(&board)); // landing slot is full
        assert!(!Move::new(14, 15, 16).is_legal(&board)); // off the board
        assert!(!Move::new(5, 5, 6).is_legal(&board)); // not distinct
    }

    #[test]
    fn test_apply_updates_three_cells_only() {
        let board = BoardState::new(65023).unwrap();
        let next = Move::new(14, 10, 6).apply(&board).unwrap();

        assert_eq!(next.peg_count(), board.peg_count() - 1);
        assert!(!next.is_occupied(14));
        assert!(!next.is_occupied(10));
        assert!(next.is_occupied(6));
        for idx in (0..16).filter(|idx| ![6, 10, 14].contains(idx)) {
            assert_eq!(next.is_occupied(idx), board.is_occupied(idx));
        }
        assert_eq!(next.side(), board.side());
        assert_eq!(next.initial_empty(), Some(6));
        // The anchor is not recomputed from the new layout.
        assert_eq!(BoardState::new(next.key()).unwrap().initial_empty(), Some(10));
    }

    #[test]
    fn test_apply_rejects_illegal_move() {
        let board = BoardState::new(65023).unwrap();
        assert_eq!(
            Move::new(0, 1, 2).apply(&board),
            Err(PegError::InvalidMove {
                jumper: 0,
                goner: 1,
                newpos: 2
            })
        );
    }

    #[test]
    fn test_enumeration_matches_naive_scan_on_every_3x3_state() {
        let root = BoardState::new(0b100_000_000).unwrap();
        for bits in 0..512u128 {
            let board = root.with_occupancy(bits);
            assert_eq!(
                board.applicable_actions(),
                naive_actions(&board),
                "mismatch for layout {:09b}",
                bits
            );
        }
    }

    #[test]
    fn test_enumeration_matches_naive_scan_on_sampled_4x4_states() {
        let root = BoardState::new(65023).unwrap();
        for bits in (0..65536u128).step_by(97) {
            let board = root.with_occupancy(bits);
            assert_eq!(board.applicable_actions(), naive_actions(&board));
        }
    }

    #[test]
    fn test_every_action_removes_exactly_one_peg() {
        let root = BoardState::new(0b100_000_000).unwrap();
        for bits in 0..512u128 {
            let board = root.with_occupancy(bits);
            for mv in board.applicable_actions() {
                let next = mv.apply(&board).unwrap();
                assert_eq!(next.peg_count() + 1, board.peg_count());
                assert_eq!((next.key() ^ board.key()).count_ones(), 3);
                assert_eq!(next.initial_empty(), root.initial_empty());
                assert_eq!(next.side(), 3);
            }
        }
    }

    #[test]
    fn test_enumeration_is_repeatable() {
        let board = BoardState::new(0b110_110_010).unwrap();
        let first: HashSet<Move> = board.applicable_actions().into_iter().collect();
        let second: HashSet<Move> = board.applicable_actions().into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_goal_variants() {
        // O O X / O O O / O O O: one peg on the anchor cell 2 would be the goal.
        let board = BoardState::new(0b110_000_000).unwrap();
        assert_eq!(board.initial_empty(), Some(2));
        let solved = Move::new(0, 1, 2).apply(&board).unwrap();
        assert!(solved.goal());
        assert!(solved.goal_remaining());

        let elsewhere = board.with_occupancy(0b000_010_000);
        assert!(elsewhere.goal_remaining());
        assert!(!elsewhere.goal());
    }

    #[test]
    fn test_full_board_has_no_anchor() {
        let full = BoardState::new(0b111_111_111).unwrap();
        assert_eq!(full.initial_empty(), None);
        assert!(full.applicable_actions().is_empty());
        assert!(!full.goal());

        for idx in 0..9 {
            let single = full.with_occupancy(1u128 << idx);
            assert!(single.goal_remaining());
            assert!(!single.goal());
        }
    }

    #[test]
    fn test_display_board_formatting() {
        let board = BoardState::new(65023).unwrap();
        assert_eq!(
            board.to_string(),
            "X X X X\nX X O X\nX X X X\nX X X X"
        );
        assert_eq!(BoardState::new(0).unwrap().to_string(), "O");
    }

    #[test]
    fn test_move_display() {
        assert_eq!(
            Move::new(14, 10, 6).to_string(),
            "The peg in slot 14 jumps over the peg in slot 10 and lands in slot 6"
        );
    }
}

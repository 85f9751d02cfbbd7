use crate::engine::BoardState;
use std::fmt;

/// Weight applied to the peg count by `heuristic3`; fewer pegs is strongly preferred.
const PEG_WEIGHT: u32 = 3;

/// Estimates remaining work by the number of applicable actions.
///
/// More available moves is taken as more remaining freedom. Not admissible.
pub fn heuristic1(state: &BoardState) -> u32 {
    state.applicable_actions().len() as u32
}

/// Sums the Manhattan distance from every peg to the root's empty cell.
///
/// Returns 0 when the root board had no empty cell.
///
/// # Examples
/// ```
/// use peg_solitaire::engine::BoardState;
/// use peg_solitaire::heuristics::heuristic2;
///
/// // X X O / O O O / O O O: pegs at distance 2 and 1 from the hole in slot 2.
/// let board = BoardState::new(0b110_000_000).unwrap();
/// assert_eq!(heuristic2(&board), 3);
/// ```
pub fn heuristic2(state: &BoardState) -> u32 {
    let Some(anchor) = state.initial_empty() else {
        return 0;
    };
    let (anchor_r, anchor_c) = state.coords(anchor);

    state
        .pegs()
        .map(|idx| {
            let (r, c) = state.coords(idx);
            (r.abs_diff(anchor_r) + c.abs_diff(anchor_c)) as u32
        })
        .sum()
}

/// Combines a weighted peg count with `heuristic2`.
pub fn heuristic3(state: &BoardState) -> u32 {
    PEG_WEIGHT * state.peg_count() + heuristic2(state)
}

/// Selects the heuristic that drives a best-first search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// `heuristic1`: number of applicable actions.
    Actions,
    /// `heuristic2`: Manhattan distance of all pegs to the goal anchor.
    Manhattan,
    /// `heuristic3`: weighted peg count plus the Manhattan sum.
    WeightedPegs,
}

impl Heuristic {
    /// All heuristics, in `astar1`..`astar3` order.
    pub const ALL: [Heuristic; 3] = [
        Heuristic::Actions,
        Heuristic::Manhattan,
        Heuristic::WeightedPegs,
    ];

    pub fn evaluate(&self, state: &BoardState) -> u32 {
        match self {
            Heuristic::Actions => heuristic1(state),
            Heuristic::Manhattan => heuristic2(state),
            Heuristic::WeightedPegs => heuristic3(state),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heuristic::Actions => "heuristic1",
            Heuristic::Manhattan => "heuristic2",
            Heuristic::WeightedPegs => "heuristic3",
        };
        write!(f, "{}", name)
    }
}

//! Search algorithms over peg layouts.
//!
//! - `solve_dfs`: exhaustive depth-first search with an explicit stack.
//! - `flail_wildly`: a random walk that never backtracks.
//! - `solve_astar`: best-first (A*) search driven by a `Heuristic`.
//!
//! All searches run to completion on the calling thread and own their bookkeeping for the
//! duration of one call. Every move removes one peg, so any path is at most
//! `peg_count - 1` moves long and every search terminates.
use crate::engine::{BoardState, Move};
use crate::heuristics::Heuristic;
use log::{debug, trace, warn};
use rand::Rng;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::{Duration, Instant};

/// One move of a solution together with the state it produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub action: Move,
    pub state: BoardState,
}

/// Terminal result of a search.
///
/// Failing to reach the goal is a normal outcome, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved {
        expanded_nodes: usize,
        elapsed: Duration,
        /// Moves from the root to the goal, in order. The root itself is not included.
        path: Vec<Step>,
    },
    Failed {
        expanded_nodes: usize,
        elapsed: Duration,
    },
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved { .. })
    }

    /// Number of nodes the search reported as expanded.
    ///
    /// DFS counts every generated successor that was not yet closed, A* counts states the
    /// first time they enter the open set, and the random walk counts applied moves.
    pub fn expanded_nodes(&self) -> usize {
        match self {
            SearchOutcome::Solved { expanded_nodes, .. }
            | SearchOutcome::Failed { expanded_nodes, .. } => *expanded_nodes,
        }
    }

    pub fn elapsed(&self) -> Duration {
        match self {
            SearchOutcome::Solved { elapsed, .. } | SearchOutcome::Failed { elapsed, .. } => {
                *elapsed
            }
        }
    }

    /// The solution path, or `None` if the search failed.
    pub fn path(&self) -> Option<&[Step]> {
        match self {
            SearchOutcome::Solved { path, .. } => Some(path),
            SearchOutcome::Failed { .. } => None,
        }
    }

    /// The moves of the solution path; empty if the search failed.
    pub fn actions(&self) -> Vec<Move> {
        self.path()
            .map(|path| path.iter().map(|step| step.action).collect())
            .unwrap_or_default()
    }
}

fn warn_if_unanchored(initial: &BoardState) {
    if initial.initial_empty().is_none() {
        warn!(
            "Board {:#b} has no empty cell; the anchored goal cannot be reached",
            initial.key()
        );
    }
}

/// Solves the puzzle with depth-first search, for the anchored goal.
///
/// States are closed when popped, not when pushed, so one state may sit on the stack
/// several times via different paths; only its first pop is expanded.
///
/// # Examples
/// ```
/// use peg_solitaire::engine::BoardState;
/// use peg_solitaire::solver::solve_dfs;
///
/// let outcome = solve_dfs(&BoardState::new(65023).unwrap());
/// assert!(outcome.is_solved());
/// assert_eq!(outcome.path().unwrap().len(), 14);
/// ```
pub fn solve_dfs(initial: &BoardState) -> SearchOutcome {
    let started = Instant::now();
    warn_if_unanchored(initial);

    let mut stack: Vec<(BoardState, Vec<Step>)> = vec![(*initial, Vec::new())];
    let mut closed: HashSet<u128> = HashSet::new();
    let mut expanded_nodes = 0;

    while let Some((current, path)) = stack.pop() {
        if !closed.insert(current.key()) {
            continue;
        }

        if current.goal() {
            debug!(
                "DFS reached the goal after {} expanded nodes, path length {}",
                expanded_nodes,
                path.len()
            );
            return SearchOutcome::Solved {
                expanded_nodes,
                elapsed: started.elapsed(),
                path,
            };
        }

        for action in current.applicable_actions() {
            let next = current.jump(action);
            if closed.contains(&next.key()) {
                continue;
            }
            expanded_nodes += 1;

            let mut next_path = path.clone();
            next_path.push(Step {
                action,
                state: next,
            });
            stack.push((next, next_path));
        }
    }

    debug!("DFS exhausted the state space after {} expanded nodes", expanded_nodes);
    SearchOutcome::Failed {
        expanded_nodes,
        elapsed: started.elapsed(),
    }
}

/// Plays uniformly random legal moves until one peg is left or no move applies.
///
/// Succeeds on the relaxed goal (single peg anywhere). There is no backtracking: the
/// walk fails as soon as it gets stuck, including on a root with no moves at all.
pub fn flail_wildly<R: Rng + ?Sized>(initial: &BoardState, rng: &mut R) -> SearchOutcome {
    let started = Instant::now();
    let mut current = *initial;
    let mut path = Vec::new();

    loop {
        let actions = current.applicable_actions();
        if actions.is_empty() {
            debug!("Random walk stuck after {} moves:\n{}", path.len(), current);
            return SearchOutcome::Failed {
                expanded_nodes: path.len(),
                elapsed: started.elapsed(),
            };
        }

        let action = actions[rng.gen_range(0..actions.len())];
        trace!("Action chosen: {}", action);
        let next = current.jump(action);
        path.push(Step {
            action,
            state: next,
        });

        if next.goal_remaining() {
            debug!("Random walk solved the board in {} moves", path.len());
            return SearchOutcome::Solved {
                expanded_nodes: path.len(),
                elapsed: started.elapsed(),
                path,
            };
        }
        current = next;
    }
}

/// Solves the puzzle with A* for the anchored goal, ranking states by `g + heuristic`.
///
/// The open queue is ordered by `(f, insertion sequence)`, so equal `f` values pop in
/// insertion order. All bookkeeping is keyed by the state's integer key. A state already
/// in the open set keeps its queued `f` when a cheaper path to it is found; only its
/// predecessor and `g` are updated. Heuristic values are computed once per state.
///
/// # Examples
/// ```
/// use peg_solitaire::engine::BoardState;
/// use peg_solitaire::heuristics::Heuristic;
/// use peg_solitaire::solver::solve_astar;
///
/// let outcome = solve_astar(&BoardState::new(65023).unwrap(), Heuristic::WeightedPegs);
/// assert!(outcome.is_solved());
/// assert_eq!(outcome.expanded_nodes(), 189);
/// ```
pub fn solve_astar(initial: &BoardState, heuristic: Heuristic) -> SearchOutcome {
    let started = Instant::now();
    warn_if_unanchored(initial);

    let mut estimates: HashMap<u128, u32> = HashMap::new();
    let mut estimate = |state: &BoardState| -> u32 {
        *estimates
            .entry(state.key())
            .or_insert_with(|| heuristic.evaluate(state))
    };

    let root = initial.key();
    let mut sequence: u64 = 0;
    let mut open = BinaryHeap::new();
    open.push(Reverse((estimate(initial), sequence, root)));
    let mut open_keys: HashSet<u128> = HashSet::from([root]);
    let mut g_score: HashMap<u128, u32> = HashMap::from([(root, 0)]);
    let mut came_from: HashMap<u128, (u128, Move)> = HashMap::new();
    let mut expanded_nodes = 0;

    while let Some(Reverse((_, _, key))) = open.pop() {
        open_keys.remove(&key);
        let current = initial.with_occupancy(key);

        if current.goal() {
            let path = reconstruct_path(initial, &came_from, key);
            debug!(
                "A* ({}) reached the goal after {} expanded nodes, path length {}",
                heuristic,
                expanded_nodes,
                path.len()
            );
            return SearchOutcome::Solved {
                expanded_nodes,
                elapsed: started.elapsed(),
                path,
            };
        }

        let tentative = g_score[&key] + 1;
        for action in current.applicable_actions() {
            let next = current.jump(action);
            let next_key = next.key();
            let improves = g_score
                .get(&next_key)
                .map_or(true, |&best| tentative < best);
            if !improves {
                continue;
            }

            came_from.insert(next_key, (key, action));
            g_score.insert(next_key, tentative);
            if open_keys.insert(next_key) {
                sequence += 1;
                open.push(Reverse((tentative + estimate(&next), sequence, next_key)));
                expanded_nodes += 1;
            }
        }
    }

    debug!(
        "A* ({}) exhausted the open set after {} expanded nodes",
        heuristic, expanded_nodes
    );
    SearchOutcome::Failed {
        expanded_nodes,
        elapsed: started.elapsed(),
    }
}

/// Walks predecessor links from `goal` back to the root and returns the path root-first.
fn reconstruct_path(
    initial: &BoardState,
    came_from: &HashMap<u128, (u128, Move)>,
    goal: u128,
) -> Vec<Step> {
    let mut path = Vec::new();
    let mut key = goal;
    while let Some(&(previous, action)) = came_from.get(&key) {
        path.push(Step {
            action,
            state: initial.with_occupancy(key),
        });
        key = previous;
    }
    path.reverse();
    path
}

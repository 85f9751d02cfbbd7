//! # Peg Solitaire Solver Library
//!
//! This library provides the board engine for square-grid peg solitaire and the
//! searches that reduce a layout to a single peg.
//!
//! It is used by two binaries:
//! - `peg_solver`: Takes a command and an integer board seed, then runs a search or
//!   evaluates a heuristic and prints the result.
//! - `heuristic_evaluator`: Runs every search over a fixed set of boards and compares
//!   expanded nodes and timings.
//!
//! ## Modules
//! - `engine`: Board state encoding (`BoardState`), moves (`Move`), legality and
//!   legal-move enumeration.
//! - `heuristics`: The three state estimates used by best-first search.
//! - `solver`: Depth-first search, the random walk and A*, plus `SearchOutcome`.
//! - `utils`: Seed parsing and parsing of drawn boards.
//! - `error`: The crate error type, `PegError`.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;

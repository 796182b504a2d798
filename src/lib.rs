#![warn(missing_docs)]

//! # `pillarshift`
//!
//! A solver for pillar token puzzles: a handful of pillars each hold some tokens, links between pillars say where tokens may flow,
//! and the player must bring every pillar to its required count in as few moves as possible.
//! Begin by describing the puzzle with a [`MazeBuilder`], convert it to a [`Maze`], then call [`solve()`](crate::Maze::solve)
//! with a move budget, or [`solve_minimal()`](crate::Maze::solve_minimal) to find the shortest sequence up to some budget.
//!
//! # Internals
//! A move empties a fixed number of tokens out of one pillar into another, and that number is the length of the shortest chain of links
//! between the two. So the first step is an all-pairs shortest path pass (Floyd–Warshall over hop counts) producing, for each pillar,
//! a list of candidate moves. See [`MoveTable`].
//!
//! A move A → B whose way back B → A is exactly as long is called symmetrical.
//! Playing such a move and then its reverse gets us nowhere, so after a symmetrical move its reverse is banned for the next step.
//!
//! The search itself is a depth-first walk over move sequences, bounded by the caller's budget:
//! 1. Keep a count of pillars not yet at their required count (the "deficiency").
//! It is updated as moves are applied and undone, never recomputed.
//! 2. A move touches two pillars, so it can fix at most two; if twice the remaining budget is below the deficiency, the branch is cut.
//! 3. Otherwise try every legal move in a fixed order: pillars by index, skipping empty ones, then their moves by target index.
//!
//! The first sequence that brings the deficiency to zero wins. It may be shorter than the budget.

pub use builder::MazeBuilder;
pub use distance::{Move, MoveIndex, MoveTable};
pub use maze::Maze;
pub use node::{Distance, NodeIndex, Tokens};
pub use solver::{SearchStats, Solution, SolverFailure, Transfer};

pub(crate) mod maze;
mod tests;
pub(crate) mod node;
pub mod builder;
pub(crate) mod distance;
pub(crate) mod solver;
#[cfg(feature = "wasm")]
pub mod wasm;

use itertools::Itertools;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, trace};

use crate::distance::MoveTable;
use crate::node::{Node, NodeIndex, Tokens};
use crate::solver::{Search, Solution, SolverFailure};

/// A puzzle: pillars with initial and required token counts, and the links between them.
///
/// [`Maze`]s should be built using a [`MazeBuilder`](crate::MazeBuilder).
#[derive(Clone, Debug)]
pub struct Maze {
    pub(crate) nodes: Vec<Node>,
    pub(crate) links: DiGraphMap<NodeIndex, ()>,
}

impl Maze {
    /// Number of pillars.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Initial token counts, by pillar index.
    pub fn initial(&self) -> Vec<Tokens> {
        self.nodes.iter().map(|node| node.initial).collect_vec()
    }

    /// Required token counts, by pillar index.
    pub fn required(&self) -> Vec<Tokens> {
        self.nodes.iter().map(|node| node.required).collect_vec()
    }

    /// Precompute every candidate move without searching, e.g. to print it.
    ///
    /// Returns [`SolverFailure::MissingReverse`] if the table turns out inconsistent.
    pub fn candidates(&self) -> Result<MoveTable, SolverFailure> {
        MoveTable::try_from(self)
    }

    /// Look for a sequence of at most `moves` moves solving this maze.
    ///
    /// Returns `Ok(None)` if there is none. Otherwise the first sequence found is returned;
    /// it may be shorter than `moves` but is not necessarily the shortest. See [`Self::solve_minimal`] for that.
    ///
    /// Fails with [`SolverFailure::Conservation`] before searching if token totals don't match,
    /// or [`SolverFailure::TooManyTokens`] if the total does not fit in a single pillar's count.
    pub fn solve(&self, moves: usize) -> Result<Option<Solution>, SolverFailure> {
        self.check_sums()?;
        let table = self.candidates()?;

        Ok(Search::new(self, &table, moves).run())
    }

    /// Find a shortest sequence of at most `max_moves` moves solving this maze,
    /// trying every budget from 0 upward.
    ///
    /// Fails as [`Self::solve`] does.
    pub fn solve_minimal(&self, max_moves: usize) -> Result<Option<Solution>, SolverFailure> {
        self.check_sums()?;
        let table = self.candidates()?;

        for moves in 0..=max_moves {
            trace!(moves, "deepening");
            if let Some(solution) = Search::new(self, &table, moves).run() {
                debug!(moves = solution.len(), "found shortest solution");
                return Ok(Some(solution));
            }
        }

        debug!(max_moves, "no solution within budget");
        Ok(None)
    }

    /// Replay `solution` from the initial counts, checking no pillar is overdrawn and every pillar ends at its required count.
    pub fn verify(&self, solution: &Solution) -> bool {
        let mut current = self.initial();

        for transfer in solution.transfers() {
            if transfer.target >= current.len() {
                return false;
            }
            let Some(taken) = current.get(transfer.source).and_then(|have| have.checked_sub(transfer.distance)) else {
                return false;
            };
            current[transfer.source] = taken;
            let Some(given) = current[transfer.target].checked_add(transfer.distance) else {
                return false;
            };
            current[transfer.target] = given;
        }

        current == self.required()
    }

    fn check_sums(&self) -> Result<(), SolverFailure> {
        let initial: u64 = self.nodes.iter().map(|node| u64::from(node.initial)).sum();
        let required: u64 = self.nodes.iter().map(|node| u64::from(node.required)).sum();

        if initial != required {
            return Err(SolverFailure::Conservation { initial, required });
        }
        // no pillar can hold more than the total, so counts stay in range
        if initial > u64::from(Tokens::MAX) {
            return Err(SolverFailure::TooManyTokens { total: initial });
        }

        Ok(())
    }
}

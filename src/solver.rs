use std::fmt::{Display, Formatter};

use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use crate::distance::{Move, MoveIndex, MoveTable};
use crate::maze::Maze;
use crate::node::{Distance, NodeIndex, Tokens};

/// Reasons solving a [`Maze`] may fail.
///
/// Not finding a solution within the move budget is not a failure; see [`Maze::solve`].
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SolverFailure {
    /// The pillars start with a different number of tokens in total than they must end with.
    /// No sequence of moves can fix this.
    #[error("pillars start with {initial} tokens in total but require {required}")]
    Conservation {
        /// Sum of the initial counts.
        initial: u64,
        /// Sum of the required counts.
        required: u64,
    },
    /// The pillars hold more tokens in total than one pillar's count can represent.
    #[error("pillars hold {total} tokens in total, more than {max} allowed", max = Tokens::MAX)]
    TooManyTokens {
        /// Sum of the initial counts.
        total: u64,
    },
    /// A symmetrical move was found with no move going the other way.
    /// This should probably never happen.
    #[error("symmetrical move {from} -> {to} has no reverse")]
    MissingReverse {
        /// Source of the move lacking a reverse.
        from: NodeIndex,
        /// Target of the move lacking a reverse.
        to: NodeIndex,
    },
}

/// One step of a [`Solution`]: `distance` tokens go from `source` to `target`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Transfer {
    /// The pillar tokens are taken from.
    pub source: NodeIndex,
    /// The pillar tokens are added to.
    pub target: NodeIndex,
    /// How many tokens move, equal to the link distance between the two.
    pub distance: Distance,
}

impl From<&Move> for Transfer {
    fn from(value: &Move) -> Self {
        Self {
            source: value.source,
            target: value.target,
            distance: value.distance,
        }
    }
}

impl Display for Transfer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} = {}", self.source, self.target, self.distance)
    }
}

/// Counters collected while searching.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Search states visited, including the root.
    pub expanded: u64,
    /// States abandoned because the remaining budget could not possibly fix every pillar.
    pub pruned: u64,
}

/// A sequence of moves taking every pillar from its initial to its required count.
#[derive(Clone, Debug)]
pub struct Solution {
    pub(crate) transfers: Vec<Transfer>,
    pub(crate) stats: SearchStats,
}

impl Solution {
    /// The moves, in the order they must be played.
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Number of moves.
    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    /// Whether the puzzle was already solved before any move.
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Counters from the search which found this solution.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution size: {}", self.transfers.len())?;
        for transfer in self.transfers.iter() {
            writeln!(f, "{}", transfer)?;
        }

        Ok(())
    }
}

/// Everything the search mutates. Undoing a move must restore it exactly.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SearchState {
    pub(crate) current: Vec<Tokens>,
    // parallel to MoveTable::moves; nonzero means the move is banned
    pub(crate) bans: Vec<u32>,
    pub(crate) deficiency: usize,
}

/// Depth-first search for a sequence of at most `budget` moves.
///
/// Only one search runs over a given [`SearchState`]; moves are applied in place and undone on backtrack.
pub(crate) struct Search<'a> {
    table: &'a MoveTable,
    required: Vec<Tokens>,
    budget: usize,
    state: SearchState,
    path: Vec<MoveIndex>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    pub(crate) fn new(maze: &Maze, table: &'a MoveTable, budget: usize) -> Self {
        Self {
            table,
            required: maze.nodes.iter().map(|node| node.required).collect_vec(),
            budget,
            state: SearchState {
                current: maze.nodes.iter().map(|node| node.initial).collect_vec(),
                bans: vec![0; table.len()],
                deficiency: maze.nodes.iter().filter(|node| !node.starts_satisfied()).count(),
            },
            path: Vec::with_capacity(budget),
            stats: SearchStats::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &SearchState {
        &self.state
    }

    /// Run the search to completion, consuming it.
    pub(crate) fn run(mut self) -> Option<Solution> {
        let found = self.descend(0);
        debug!(
            budget = self.budget,
            found,
            length = ?found.then_some(self.path.len()),
            expanded = self.stats.expanded,
            pruned = self.stats.pruned,
            "search finished"
        );

        let table = self.table;
        found.then(|| Solution {
            transfers: self.path.iter().map(|index| Transfer::from(&table.moves()[*index])).collect_vec(),
            stats: self.stats,
        })
    }

    /// Returns `true` with the winning moves left on `self.path`, or `false` with everything undone.
    pub(crate) fn descend(&mut self, depth: usize) -> bool {
        self.stats.expanded += 1;

        if self.state.deficiency == 0 {
            return true;
        }

        // a move changes two pillars, so fixes at most two
        // depth never exceeds budget: at depth == budget this always prunes
        let remaining = self.budget - depth;
        if remaining * 2 < self.state.deficiency {
            self.stats.pruned += 1;
            return false;
        }

        for source in 0..self.state.current.len() {
            // nothing to move out of an empty pillar
            if self.state.current[source] == 0 {
                continue;
            }

            for index in self.table.range_from(source) {
                if !self.try_apply(index) {
                    continue;
                }

                self.path.push(index);
                if self.descend(depth + 1) {
                    return true;
                }
                self.path.pop();
                self.undo(index);
            }
        }

        false
    }

    /// Apply the move at `index` if it is legal, returning whether it was.
    ///
    /// A move is illegal while banned or if its source holds fewer tokens than it carries.
    pub(crate) fn try_apply(&mut self, index: MoveIndex) -> bool {
        let m = self.table.moves()[index];
        if self.state.bans[index] != 0 || self.state.current[m.source] < m.distance {
            return false;
        }

        self.adjust(m.source, |current| current - m.distance);
        self.adjust(m.target, |current| current + m.distance);

        // moved A -> B symmetrically, so B -> A is pointless next
        if let Some(reverse) = m.reverse {
            self.state.bans[reverse] += 1;
        }

        true
    }

    /// Exactly reverse a previous successful [`Self::try_apply`] of the same move.
    pub(crate) fn undo(&mut self, index: MoveIndex) {
        let m = self.table.moves()[index];

        self.adjust(m.source, |current| current + m.distance);
        self.adjust(m.target, |current| current - m.distance);

        if let Some(reverse) = m.reverse {
            self.state.bans[reverse] -= 1;
        }
    }

    /// Change the count of `node`, keeping the deficiency in step.
    #[inline]
    fn adjust(&mut self, node: NodeIndex, change: impl FnOnce(Tokens) -> Tokens) {
        let required = self.required[node];
        let current = &mut self.state.current[node];

        // leaving the required count makes one more deficient pillar, arriving at it one fewer
        if *current == required {
            self.state.deficiency += 1;
        }
        *current = change(*current);
        if *current == required {
            self.state.deficiency -= 1;
        }
    }
}

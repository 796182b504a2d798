use std::fmt::{Display, Formatter};
use std::ops::Range;

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::maze::Maze;
use crate::node::{Distance, NodeIndex};
use crate::solver::SolverFailure;

/// Placeholder distance for pairs with no chain of links between them.
pub(crate) const UNREACHABLE: Distance = Distance::MAX;

/// Index of a [`Move`] within its [`MoveTable`].
pub type MoveIndex = usize;

/// A candidate move: empty [`distance`](Self::distance) tokens out of [`source`](Self::source) into [`target`](Self::target).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Move {
    pub(crate) source: NodeIndex,
    pub(crate) target: NodeIndex,
    pub(crate) distance: Distance,
    pub(crate) symmetrical: bool,
    // set for every symmetrical move once the table is built
    pub(crate) reverse: Option<MoveIndex>,
}

impl Move {
    /// The pillar tokens are taken from.
    pub fn source(&self) -> NodeIndex {
        self.source
    }

    /// The pillar tokens are added to.
    pub fn target(&self) -> NodeIndex {
        self.target
    }

    /// Shortest link distance from source to target, also the number of tokens moved.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Whether the way back from target to source is exactly as long.
    pub fn is_symmetrical(&self) -> bool {
        self.symmetrical
    }

    /// The move going the other way, if this move is symmetrical.
    pub fn reverse(&self) -> Option<MoveIndex> {
        self.reverse
    }
}

/// Every candidate move of a [`Maze`], grouped by source pillar.
///
/// Moves from one pillar are stored contiguously, ordered by target index, and pillars are ordered by index.
/// The search explores moves in exactly this order.
///
/// The [`Display`] impl dumps one move per line, e.g. `0 -> 2 = 2 [SYM]`.
#[derive(Clone, Debug)]
pub struct MoveTable {
    distances: Array2<Distance>,
    moves: Vec<Move>,
    by_source: Vec<Range<MoveIndex>>,
}

impl TryFrom<&Maze> for MoveTable {
    type Error = SolverFailure;

    fn try_from(maze: &Maze) -> Result<Self, Self::Error> {
        let node_count = maze.node_count();
        let distances = shortest_distances(node_count, &maze.links);

        let mut moves = Vec::new();
        let mut by_source = Vec::with_capacity(node_count);
        for source in 0..node_count {
            let start = moves.len();
            moves.extend((0..node_count).filter_map(|target| {
                let distance = distances[[source, target]];
                // staying put and going nowhere are not moves
                if distance == 0 || distance == UNREACHABLE {
                    return None;
                }

                Some(Move {
                    source,
                    target,
                    distance,
                    symmetrical: distances[[target, source]] == distance,
                    reverse: None,
                })
            }));
            by_source.push(start..moves.len());
        }

        for index in 0..moves.len() {
            let Move { source, target, symmetrical, .. } = moves[index];
            if !symmetrical {
                continue;
            }

            let reverse = find_move(&moves, by_source[target].clone(), source)
                .ok_or(SolverFailure::MissingReverse { from: source, to: target })?;
            moves[index].reverse = Some(reverse);
        }

        debug!(
            nodes = node_count,
            moves = moves.len(),
            symmetrical = moves.iter().filter(|m| m.symmetrical).count(),
            "built move table"
        );

        Ok(Self {
            distances,
            moves,
            by_source,
        })
    }
}

impl MoveTable {
    /// Number of pillars the table was built for.
    pub fn node_count(&self) -> usize {
        self.by_source.len()
    }

    /// Total number of candidate moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Whether no move exists at all, i.e. no pillar can reach another.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// All moves, in search order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The move at `index`, if any.
    pub fn get(&self, index: MoveIndex) -> Option<&Move> {
        self.moves.get(index)
    }

    /// Moves out of pillar `source`, ordered by target. Empty if `source` does not exist.
    pub fn moves_from(&self, source: NodeIndex) -> &[Move] {
        match self.by_source.get(source) {
            None => &[],
            Some(range) => &self.moves[range.clone()],
        }
    }

    /// Index of the move from `source` to `target`, if one exists.
    pub fn find(&self, source: NodeIndex, target: NodeIndex) -> Option<MoveIndex> {
        self.by_source.get(source)
            .and_then(|range| find_move(&self.moves, range.clone(), target))
    }

    /// Shortest link distance from `source` to `target`.
    ///
    /// Returns `None` if either pillar does not exist or `target` cannot be reached from `source`.
    /// A pillar is at distance 0 from itself.
    pub fn distance(&self, source: NodeIndex, target: NodeIndex) -> Option<Distance> {
        self.distances.get((source, target))
            .copied()
            .filter(|distance| *distance != UNREACHABLE)
    }

    #[inline]
    pub(crate) fn range_from(&self, source: NodeIndex) -> Range<MoveIndex> {
        self.by_source[source].clone()
    }
}

impl Display for MoveTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for m in self.moves.iter() {
            write!(f, "{} -> {} = {}", m.source, m.target, m.distance)?;
            if m.symmetrical {
                write!(f, " [SYM]")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

fn find_move(moves: &[Move], mut candidates: Range<MoveIndex>, target: NodeIndex) -> Option<MoveIndex> {
    candidates.find(|index| moves[*index].target == target)
}

/// Floyd–Warshall over hop counts: every link has length 1.
fn shortest_distances(node_count: usize, links: &DiGraphMap<NodeIndex, ()>) -> Array2<Distance> {
    let mut distances = Array2::from_elem((node_count, node_count), UNREACHABLE);
    for (from, to, _) in links.all_edges() {
        distances[[from, to]] = 1;
    }
    // after the links, so a self-link still leaves 0
    for node in 0..node_count {
        distances[[node, node]] = 0;
    }

    for via in 0..node_count {
        for (from, to) in (0..node_count).cartesian_product(0..node_count) {
            // saturating so UNREACHABLE + anything stays UNREACHABLE
            let through = distances[[from, via]].saturating_add(distances[[via, to]]);
            if through < distances[[from, to]] {
                distances[[from, to]] = through;
            }
        }
    }

    distances
}

//! Construction of [`Maze`]s pillar by pillar and link by link.

use petgraph::graphmap::DiGraphMap;

use crate::maze::Maze;
use crate::node::{Node, NodeIndex, Tokens};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A link was added to or from a pillar index which has not been added yet.
    NodeOutOfBounds,
}

/// A builder for [`Maze`]s.
///
/// Pillars are numbered in the order they are added, starting at 0.
/// Links may only refer to pillars which already exist.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug, Default)]
pub struct MazeBuilder {
    nodes: Vec<Node>,
    // directed, in insertion order
    links: Vec<(NodeIndex, NodeIndex)>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl MazeBuilder {
    /// Construct an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pillar starting with `initial` tokens which must end with `required` tokens.
    /// Its index is the number of pillars added before it.
    ///
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_node(&mut self, initial: Tokens, required: Tokens) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.nodes.push(Node { initial, required });
        self
    }

    /// Shorthand for multiple calls to [`Self::add_node`], with the same conditions.
    /// Each item is an `(initial, required)` pair.
    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = (Tokens, Tokens)>) -> &mut Self {
        for (initial, required) in nodes {
            self.add_node(initial, required);
        }

        self
    }

    /// Add a one-way link letting tokens flow from `from` to `to`.
    ///
    /// May cause the builder to enter a [`NodeOutOfBounds`](BuilderInvalidReason::NodeOutOfBounds) invalid state if either index has no pillar.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_mono_link(&mut self, from: NodeIndex, to: NodeIndex) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.contains(from) || !self.contains(to) {
            self.invalid_reasons.push(BuilderInvalidReason::NodeOutOfBounds);
            return self;
        }

        self.links.push((from, to));
        self
    }

    /// Add a two-way link between `a` and `b`; the same as one-way links in both directions.
    ///
    /// May cause the builder to enter a [`NodeOutOfBounds`](BuilderInvalidReason::NodeOutOfBounds) invalid state if either index has no pillar.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_bi_link(&mut self, a: NodeIndex, b: NodeIndex) -> &mut Self {
        self.add_mono_link(a, b).add_mono_link(b, a)
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Maze`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Maze, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let mut links = DiGraphMap::with_capacity(self.nodes.len(), self.links.len());
        // isolated pillars still need a vertex
        for index in 0..self.nodes.len() {
            links.add_node(index);
        }
        for (from, to) in self.links.iter() {
            links.add_edge(*from, *to, ());
        }

        Ok(Maze {
            nodes: self.nodes.clone(),
            links,
        })
    }

    #[inline]
    fn contains(&self, index: NodeIndex) -> bool {
        index < self.nodes.len()
    }
}

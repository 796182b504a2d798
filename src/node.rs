/// Index of a pillar, in the order pillars were added to the [`MazeBuilder`](crate::MazeBuilder).
pub type NodeIndex = usize;
/// A count of tokens held by a pillar.
pub type Tokens = u32;
/// Length of the shortest chain of links between two pillars, which is also how many tokens a move between them carries.
pub type Distance = Tokens;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Node {
    pub(crate) initial: Tokens,
    pub(crate) required: Tokens,
}

impl Node {
    #[inline]
    pub(crate) fn starts_satisfied(&self) -> bool {
        self.initial == self.required
    }
}

use pillarshift::builder::BuilderInvalidReason;
use pillarshift::{Maze, MazeBuilder};
use strum::{Display, EnumString, VariantArray};

/// Puzzles shipped with the solver, named by level number.
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, PartialEq, VariantArray)]
pub enum Scenario {
    #[strum(serialize = "95")]
    Level95,
    #[strum(serialize = "96")]
    Level96,
    #[strum(serialize = "97")]
    Level97,
    #[strum(serialize = "100")]
    Level100,
}

impl Scenario {
    /// Moves the level allows.
    pub fn moves(self) -> usize {
        match self {
            Self::Level95 => 7,
            Self::Level96 => 4,
            Self::Level97 => 6,
            Self::Level100 => 8,
        }
    }

    pub fn maze(self) -> Result<Maze, Vec<BuilderInvalidReason>> {
        let mut builder = MazeBuilder::new();
        match self {
            Self::Level95 => builder
                // anticlockwise from the top
                .add_nodes([(4, 9), (4, 3), (1, 0), (7, 9), (1, 3), (7, 0)])
                .add_bi_link(0, 1)
                .add_bi_link(1, 2)
                .add_bi_link(2, 3)
                .add_bi_link(3, 4)
                .add_bi_link(4, 5)
                .add_bi_link(5, 0),
            Self::Level96 => builder
                // top row, then bottom
                .add_nodes([(0, 0), (0, 0), (0, 0), (2, 0)])
                .add_nodes([(0, 6), (0, 0), (1, 0), (3, 0)])
                .add_bi_link(4, 0)
                .add_bi_link(0, 1)
                .add_bi_link(1, 5)
                .add_bi_link(5, 6)
                .add_bi_link(6, 2)
                .add_bi_link(6, 3)
                .add_bi_link(3, 7),
            Self::Level97 => builder
                .add_node(2, 0)
                .add_nodes([(3, 0), (0, 4), (2, 6)])
                .add_nodes([(0, 1), (5, 0), (0, 1)])
                .add_bi_link(0, 2)
                .add_bi_link(1, 2)
                .add_mono_link(3, 2)
                .add_bi_link(1, 4)
                .add_bi_link(4, 5)
                .add_bi_link(5, 6)
                .add_bi_link(3, 6),
            Self::Level100 => builder
                .add_node(0, 4)
                .add_nodes([(0, 4), (0, 4)])
                // main row
                .add_nodes([(0, 0), (0, 0), (0, 0), (0, 0)])
                .add_nodes([(6, 0), (6, 0)])
                .add_mono_link(1, 0)
                .add_mono_link(2, 0)
                .add_mono_link(3, 1)
                .add_mono_link(6, 2)
                .add_bi_link(3, 4)
                .add_bi_link(4, 5)
                .add_bi_link(5, 6)
                .add_mono_link(7, 3)
                .add_mono_link(8, 6),
        };

        builder.build().map_err(|reasons| reasons.clone())
    }
}

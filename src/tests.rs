#[cfg(test)]
mod tests {
    use crate::builder::{BuilderInvalidReason, MazeBuilder};
    use crate::maze::Maze;
    use crate::solver::{Search, SearchStats, Solution, SolverFailure, Transfer};

    // pillars anticlockwise from the top, linked in a ring
    fn ring() -> Maze {
        MazeBuilder::new()
            .add_nodes([(4, 9), (4, 3), (1, 0), (7, 9), (1, 3), (7, 0)])
            .add_bi_link(0, 1)
            .add_bi_link(1, 2)
            .add_bi_link(2, 3)
            .add_bi_link(3, 4)
            .add_bi_link(4, 5)
            .add_bi_link(5, 0)
            .build()
            .unwrap()
    }

    // top row, then bottom; everything gathers on pillar 4
    fn tree() -> Maze {
        MazeBuilder::new()
            .add_nodes([(0, 0), (0, 0), (0, 0), (2, 0), (0, 6), (0, 0), (1, 0), (3, 0)])
            .add_bi_link(4, 0)
            .add_bi_link(0, 1)
            .add_bi_link(1, 5)
            .add_bi_link(5, 6)
            .add_bi_link(6, 2)
            .add_bi_link(6, 3)
            .add_bi_link(3, 7)
            .build()
            .unwrap()
    }

    // has a one-way link into pillar 2
    fn three_rows() -> Maze {
        MazeBuilder::new()
            .add_node(2, 0)
            .add_nodes([(3, 0), (0, 4), (2, 6)])
            .add_nodes([(0, 1), (5, 0), (0, 1)])
            .add_bi_link(0, 2)
            .add_bi_link(1, 2)
            .add_mono_link(3, 2)
            .add_bi_link(1, 4)
            .add_bi_link(4, 5)
            .add_bi_link(5, 6)
            .add_bi_link(3, 6)
            .build()
            .unwrap()
    }

    // mostly one-way links
    fn funnel() -> Maze {
        MazeBuilder::new()
            .add_node(0, 4)
            .add_nodes([(0, 4), (0, 4)])
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
            .add_mono_link(8, 6)
            .build()
            .unwrap()
    }

    fn line() -> Maze {
        MazeBuilder::new()
            .add_nodes([(2, 0), (0, 1), (0, 1)])
            .add_bi_link(0, 1)
            .add_mono_link(1, 2)
            .build()
            .unwrap()
    }

    fn transfers(steps: &[(usize, usize, u32)]) -> Vec<Transfer> {
        steps.iter()
            .map(|(source, target, distance)| Transfer { source: *source, target: *target, distance: *distance })
            .collect()
    }

    #[test]
    fn builder_rejects_unknown_nodes() {
        let mut builder = MazeBuilder::new();
        builder.add_nodes([(1, 0), (0, 1)]);
        assert!(builder.is_valid().is_none());

        builder.add_mono_link(0, 2);
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::NodeOutOfBounds]));

        // further changes are ignored once invalid
        builder.add_node(0, 0).add_bi_link(0, 1);
        assert_eq!(builder.build().unwrap_err(), &vec![BuilderInvalidReason::NodeOutOfBounds]);
    }

    #[test]
    fn conservation_checked_before_search() {
        let maze = MazeBuilder::new()
            .add_nodes([(3, 1), (0, 1)])
            .add_bi_link(0, 1)
            .build()
            .unwrap();

        let expected = SolverFailure::Conservation { initial: 3, required: 2 };
        assert_eq!(maze.solve(10).unwrap_err(), expected);
        assert_eq!(maze.solve_minimal(10).unwrap_err(), expected);
        assert_eq!(format!("{}", expected), "pillars start with 3 tokens in total but require 2");

        // the table itself does not care
        assert!(maze.candidates().is_ok());
    }

    #[test]
    fn token_total_must_fit_a_pillar() {
        let maze = MazeBuilder::new()
            .add_nodes([(u32::MAX, 0), (1, 1), (0, u32::MAX)])
            .add_bi_link(0, 1)
            .add_bi_link(1, 2)
            .build()
            .unwrap();

        let expected = SolverFailure::TooManyTokens { total: u64::from(u32::MAX) + 1 };
        assert_eq!(maze.solve(3).unwrap_err(), expected);
        assert_eq!(maze.solve_minimal(3).unwrap_err(), expected);

        // exactly the maximum is fine
        let full = MazeBuilder::new()
            .add_nodes([(u32::MAX, 0), (0, u32::MAX)])
            .add_bi_link(0, 1)
            .build()
            .unwrap();
        assert!(full.solve(0).unwrap().is_none());
    }

    #[test]
    fn dump_line() {
        let table = line().candidates().unwrap();

        assert_eq!(format!("{}", table), "0 -> 1 = 1 [SYM]
0 -> 2 = 2
1 -> 0 = 1 [SYM]
1 -> 2 = 1
");
        assert!(table.moves_from(2).is_empty());
        assert!(table.moves_from(3).is_empty());
        assert_eq!(table.get(0).unwrap().reverse(), Some(2));
        assert_eq!(table.get(2).unwrap().reverse(), Some(0));
        assert_eq!(table.get(1).unwrap().reverse(), None);
    }

    #[test]
    fn ring_distances() {
        let table = ring().candidates().unwrap();

        assert_eq!(table.node_count(), 6);
        // every pillar reaches the five others
        assert_eq!(table.len(), 30);
        assert_eq!(table.distance(0, 0), Some(0));
        assert_eq!(table.distance(0, 1), Some(1));
        assert_eq!(table.distance(0, 2), Some(2));
        assert_eq!(table.distance(0, 3), Some(3));
        assert_eq!(table.distance(0, 4), Some(2));
        assert_eq!(table.distance(0, 5), Some(1));
        assert_eq!(table.distance(0, 6), None);
        assert!(table.moves().iter().all(|m| m.is_symmetrical()));
    }

    #[test]
    fn one_way_distances() {
        let table = funnel().candidates().unwrap();

        assert_eq!(table.distance(7, 0), Some(3));
        assert_eq!(table.distance(0, 7), None);
        assert_eq!(table.distance(8, 2), Some(2));
        assert_eq!(table.distance(3, 6), Some(3));
        assert_eq!(table.distance(6, 3), Some(3));

        let m = table.get(table.find(7, 0).unwrap()).unwrap();
        assert_eq!(m.distance(), 3);
        assert!(!m.is_symmetrical());
        assert_eq!(m.reverse(), None);

        // sinks have nowhere to go
        assert!(table.moves_from(0).is_empty());
        assert_eq!(table.find(0, 1), None);
    }

    #[test]
    fn reverse_moves_point_back() {
        for maze in [ring(), tree(), three_rows(), funnel(), line()] {
            let table = maze.candidates().unwrap();

            for (index, m) in table.moves().iter().enumerate() {
                let back = table.find(m.target(), m.source());
                let symmetrical = back.is_some_and(|back| table.get(back).unwrap().distance() == m.distance());
                assert_eq!(m.is_symmetrical(), symmetrical);

                match m.reverse() {
                    None => assert!(!m.is_symmetrical()),
                    Some(reverse) => {
                        let r = table.get(reverse).unwrap();
                        assert_eq!(r.reverse(), Some(index));
                        assert_eq!((r.source(), r.target()), (m.target(), m.source()));
                        assert_eq!(r.distance(), m.distance());
                    }
                }
            }
        }
    }

    #[test]
    fn apply_then_undo_is_identity() {
        let maze = ring();
        let table = maze.candidates().unwrap();
        let mut search = Search::new(&maze, &table, 7);
        let before = search.state().clone();

        for index in 0..table.len() {
            if search.try_apply(index) {
                assert_ne!(search.state(), &before);
                search.undo(index);
            }
            assert_eq!(search.state(), &before);
        }

        // nested, undone last to first
        let first = table.find(3, 0).unwrap();
        let second = table.find(5, 2).unwrap();
        assert!(search.try_apply(first));
        assert!(search.try_apply(second));
        search.undo(second);
        search.undo(first);
        assert_eq!(search.state(), &before);
    }

    #[test]
    fn overdrawn_moves_are_illegal() {
        let maze = ring();
        let table = maze.candidates().unwrap();
        let mut search = Search::new(&maze, &table, 7);
        let before = search.state().clone();

        // pillar 2 holds 1 token but 2 -> 5 carries 3
        assert!(!search.try_apply(table.find(2, 5).unwrap()));
        assert_eq!(search.state(), &before);
        assert!(search.try_apply(table.find(2, 1).unwrap()));
        assert_eq!(search.state().current[2], 0);
    }

    #[test]
    fn symmetrical_move_bans_its_reverse() {
        let maze = ring();
        let table = maze.candidates().unwrap();
        let mut search = Search::new(&maze, &table, 7);

        let forth = table.find(1, 0).unwrap();
        let back = table.find(0, 1).unwrap();
        assert_eq!(search.state().bans[back], 0);

        assert!(search.try_apply(forth));
        assert_eq!(search.state().bans[back], 1);
        let banned = search.state().clone();
        assert!(!search.try_apply(back));
        assert_eq!(search.state(), &banned);

        // the same direction again is fine
        assert!(search.try_apply(forth));
        assert_eq!(search.state().bans[back], 2);
        search.undo(forth);
        search.undo(forth);
        assert_eq!(search.state().bans[back], 0);
        assert!(search.try_apply(back));
    }

    #[test]
    fn deficiency_tracks_pillars() {
        let maze = line();
        let table = maze.candidates().unwrap();
        let mut search = Search::new(&maze, &table, 3);
        assert_eq!(search.state().deficiency, 3);

        let step = table.find(0, 1).unwrap();
        assert!(search.try_apply(step));
        // pillar 1 arrives at 1, pillar 0 is still off
        assert_eq!(search.state().deficiency, 2);
        assert!(search.try_apply(step));
        // pillar 0 arrives at 0, pillar 1 leaves its count
        assert_eq!(search.state().deficiency, 2);
        assert!(search.try_apply(table.find(1, 2).unwrap()));
        assert_eq!(search.state().deficiency, 0);
    }

    #[test]
    fn failed_search_restores_state() {
        let maze = ring();
        let table = maze.candidates().unwrap();
        let mut search = Search::new(&maze, &table, 4);
        let before = search.state().clone();

        assert!(!search.descend(0));
        assert_eq!(search.state(), &before);
    }

    #[test]
    fn solve_ring() {
        let maze = ring();
        let solution = maze.solve(7).unwrap().unwrap();

        assert_eq!(solution.len(), 7);
        assert_eq!(solution.transfers(), transfers(&[(1, 0, 1), (5, 0, 1), (5, 0, 1), (5, 2, 3), (2, 0, 2), (2, 4, 2), (5, 3, 2)]));
        assert!(maze.verify(&solution));
    }

    #[test]
    fn ring_needs_seven() {
        assert!(ring().solve(6).unwrap().is_none());
    }

    #[test]
    fn solve_tree() {
        let maze = tree();
        let solution = maze.solve(4).unwrap().unwrap();

        assert_eq!(format!("{}", solution), "Solution size: 4
3 -> 2 = 2
6 -> 2 = 1
2 -> 7 = 3
7 -> 4 = 6
");
        assert!(maze.verify(&solution));
    }

    #[test]
    fn solve_with_one_way_link() {
        let maze = three_rows();
        let solution = maze.solve(6).unwrap().unwrap();

        assert_eq!(solution.transfers(), transfers(&[(0, 1, 2), (1, 2, 1), (1, 3, 4), (5, 2, 3), (5, 4, 1), (5, 6, 1)]));
        assert!(maze.verify(&solution));
    }

    #[test]
    fn solve_funnel() {
        let maze = funnel();
        let solution = maze.solve(8).unwrap().unwrap();

        assert_eq!(solution.transfers(), transfers(&[(7, 0, 3), (7, 5, 3), (5, 2, 2), (8, 1, 5), (1, 0, 1), (8, 6, 1), (6, 5, 1), (5, 2, 2)]));
        assert!(maze.verify(&solution));
    }

    #[test]
    fn larger_budget_may_find_longer_solution() {
        let maze = tree();

        // the first hit in search order, not the shortest
        let first = maze.solve(6).unwrap().unwrap();
        assert_eq!(first.transfers(), transfers(&[(3, 2, 2), (2, 5, 2), (6, 5, 1), (5, 4, 3), (7, 5, 3), (5, 4, 3)]));
        assert!(maze.verify(&first));

        let shortest = maze.solve_minimal(6).unwrap().unwrap();
        assert_eq!(shortest.len(), 4);
        assert!(maze.verify(&shortest));
    }

    #[test]
    fn minimal_solution_has_no_solved_prefix() {
        let maze = three_rows();
        let solution = maze.solve_minimal(9).unwrap().unwrap();
        assert_eq!(solution.len(), 6);

        for length in 0..solution.len() {
            let prefix = Solution { transfers: solution.transfers()[..length].to_vec(), stats: SearchStats::default() };
            assert!(!maze.verify(&prefix));
        }
    }

    #[test]
    fn minimal_gives_up_past_budget() {
        assert!(tree().solve_minimal(3).unwrap().is_none());
    }

    #[test]
    fn already_solved() {
        let maze = MazeBuilder::new()
            .add_nodes([(2, 2), (0, 0)])
            .add_bi_link(0, 1)
            .build()
            .unwrap();

        let solution = maze.solve(0).unwrap().unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.stats(), SearchStats { expanded: 1, pruned: 0 });
        assert_eq!(format!("{}", solution), "Solution size: 0\n");
    }

    #[test]
    fn unlinked_pillars_cannot_trade() {
        let maze = MazeBuilder::new()
            .add_nodes([(1, 0), (0, 1)])
            .build()
            .unwrap();

        assert!(maze.candidates().unwrap().is_empty());
        assert!(maze.solve(3).unwrap().is_none());
    }

    #[test]
    fn verify_rejects_bad_sequences() {
        let maze = line();
        let overdrawn = Solution { transfers: transfers(&[(0, 2, 2), (0, 1, 1)]), stats: SearchStats::default() };
        assert!(!maze.verify(&overdrawn));

        let unknown = Solution { transfers: transfers(&[(0, 5, 1)]), stats: SearchStats::default() };
        assert!(!maze.verify(&unknown));

        let good = Solution { transfers: transfers(&[(0, 1, 1), (0, 1, 1), (1, 2, 1)]), stats: SearchStats::default() };
        assert!(maze.verify(&good));
        assert_eq!(maze.solve(3).unwrap().unwrap().transfers(), good.transfers());
    }
}

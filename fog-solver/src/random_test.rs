#[cfg(test)]
mod random_tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::error::MazeError;
    use crate::geometry::{Coord, Dimensions, Direction};
    use crate::knowledge::KnowledgeMap;
    use crate::navigator::{Navigator, Step};
    use crate::sensor_trait::Sensor;
    use crate::session::explore_grid;
    use crate::world::{Grid, GridSensor};

    const SIZES: [(i64, i64); 6] = [(1, 1), (1, 9), (9, 1), (4, 4), (13, 7), (20, 20)];

    fn random_grid(seed: u64, width: i64, height: i64) -> Grid {
        let mut rng = StdRng::seed_from_u64(seed);
        Grid::generate(Dimensions::new(width, height).unwrap(), &mut rng)
    }

    /// Knowledge map with every cell sensed; used as the fidelity oracle.
    fn oracle(grid: &Grid) -> KnowledgeMap {
        let mut km = KnowledgeMap::new(grid.dimensions());
        let mut sensor = GridSensor::new(grid);
        for at in grid.dimensions().coords() {
            sensor.sense(at, &mut km).unwrap();
        }
        km
    }

    fn step_direction(dims: Dimensions, from: Coord, to: Coord) -> Option<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .find(|&d| dims.neighbor(from, d) == Some(to))
    }

    /// Records the known-direction count of every cell after each sense.
    struct SnapshotSensor<'a> {
        inner: GridSensor<'a>,
        snapshots: Vec<Vec<usize>>,
    }

    impl Sensor for SnapshotSensor<'_> {
        fn sense(&mut self, at: Coord, knowledge: &mut KnowledgeMap) -> Result<(), MazeError> {
            self.inner.sense(at, knowledge)?;
            let dims = knowledge.dimensions();
            self.snapshots.push(
                dims.coords()
                    .map(|c| knowledge.get(c).map(|r| r.known_count()).unwrap_or(0))
                    .collect(),
            );
            Ok(())
        }
    }

    #[test]
    fn random_mazes_always_solve_along_a_simple_path() {
        let mut seeds = StdRng::seed_from_u64(2025);
        for (w, h) in SIZES {
            for _ in 0..10 {
                let grid = random_grid(seeds.gen(), w, h);
                let dims = grid.dimensions();
                let (exploration, knowledge, _) = explore_grid(&grid).unwrap();

                assert!(exploration.is_solved(), "{}x{} not solved", w, h);
                let path = exploration.require_solved().unwrap();
                assert_eq!(path.first(), Some(&dims.start()));
                assert_eq!(path.last(), Some(&dims.goal()));

                let unique: HashSet<&Coord> = path.iter().collect();
                assert_eq!(unique.len(), path.len());
                for pair in path.windows(2) {
                    let dir = step_direction(dims, pair[0], pair[1]).unwrap();
                    assert!(knowledge.get(pair[0]).unwrap().is_passable(dir));
                }
                assert_eq!(knowledge.path_count(), path.len());
            }
        }
    }

    #[test]
    fn known_walls_match_ground_truth() {
        for seed in 0..15u64 {
            let grid = random_grid(seed, 11, 8);
            let truth = oracle(&grid);
            let (_, knowledge, _) = explore_grid(&grid).unwrap();
            for (at, record) in knowledge.records() {
                let real = truth.get(at).unwrap();
                for dir in Direction::ALL {
                    if let Some(wall) = record.known_wall(dir) {
                        assert_eq!(Some(wall), real.known_wall(dir), "seed {} at {} {}", seed, at, dir);
                    }
                }
            }
        }
    }

    #[test]
    fn knowledge_only_grows() {
        for seed in 0..10u64 {
            let grid = random_grid(seed, 9, 9);
            let mut sensor = SnapshotSensor {
                inner: GridSensor::new(&grid),
                snapshots: Vec::new(),
            };
            let mut navigator = Navigator::new(KnowledgeMap::new(grid.dimensions()));
            navigator.explore(&mut sensor).unwrap();

            assert!(!sensor.snapshots.is_empty());
            for pair in sensor.snapshots.windows(2) {
                for (before, after) in pair[0].iter().zip(&pair[1]) {
                    assert!(after >= before, "seed {}: knowledge shrank", seed);
                }
            }
        }
    }

    #[test]
    fn every_move_was_justified_by_knowledge_at_the_time() {
        for seed in 0..10u64 {
            let grid = random_grid(seed, 12, 10);
            let dims = grid.dimensions();
            let (exploration, _, _) = explore_grid(&grid).unwrap();

            // replay the same sensing sequence and check each move against
            // what had been sensed up to that point
            let mut replay = KnowledgeMap::new(dims);
            let mut sensor = GridSensor::new(&grid);
            let mut stack: Vec<Coord> = Vec::new();
            for step in &exploration.trace {
                match *step {
                    Step::Sensed(at) => sensor.sense(at, &mut replay).unwrap(),
                    Step::Entered(at) => {
                        if let Some(&from) = stack.last() {
                            let dir = step_direction(dims, from, at).unwrap();
                            let record = replay.get(from).unwrap();
                            assert!(record.is_known(dir) && !record.wall(dir));
                        }
                        stack.push(at);
                    }
                    Step::Backtracked(_) => {
                        stack.pop();
                    }
                    Step::ReachedGoal(at) => assert_eq!(at, dims.goal()),
                }
            }
        }
    }

    #[test]
    fn identical_grids_give_identical_explorations() {
        for seed in 0..10u64 {
            let grid = random_grid(seed, 10, 6);
            let (a, ka, _) = explore_grid(&grid).unwrap();
            let (b, kb, _) = explore_grid(&grid).unwrap();
            assert_eq!(a.trace, b.trace);
            assert_eq!(a.path, b.path);
            let visited = |k: &KnowledgeMap| -> Vec<Coord> {
                k.records().filter(|(_, r)| r.visited).map(|(c, _)| c).collect()
            };
            assert_eq!(visited(&ka), visited(&kb));
        }
    }

    #[test]
    fn navigator_agrees_with_reference_solver() {
        for seed in 0..10u64 {
            let mut grid = random_grid(seed, 8, 12);
            let reference = grid.solve_reference().unwrap();
            let (exploration, _, _) = explore_grid(&grid).unwrap();
            // perfect mazes have a single simple path, so both must match
            assert_eq!(exploration.path, reference);
        }
    }

    #[test]
    fn observed_covers_visited_on_random_mazes() {
        for seed in 0..10u64 {
            let grid = random_grid(seed, 15, 15);
            let (_, knowledge, calls) = explore_grid(&grid).unwrap();
            let mut visited = 0;
            for (at, record) in knowledge.records() {
                if record.visited {
                    visited += 1;
                    assert!(knowledge.is_observed(at));
                }
            }
            assert!(visited <= calls);
        }
    }
}

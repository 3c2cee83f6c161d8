use rand::Rng;
use tracing::debug;

use crate::error::MazeError;
use crate::geometry::{Coord, Dimensions, Direction, DIRECTION_COUNT};

/// Ground-truth cell. Wall data never leaves the `world` module.
#[derive(Debug, Clone)]
pub struct GridCell {
    walls: [bool; DIRECTION_COUNT],
    /// Generation bookkeeping only.
    pub(super) visited: bool,
    /// Set by the reference solver for the comparison view.
    pub(super) path_member: bool,
}

impl GridCell {
    fn sealed() -> Self {
        Self {
            walls: [true; DIRECTION_COUNT],
            visited: false,
            path_member: false,
        }
    }
}

/// The maze as it really is.
#[derive(Debug, Clone)]
pub struct Grid {
    dimensions: Dimensions,
    cells: Vec<GridCell>,
}

impl Grid {
    /// A grid with every wall standing.
    pub fn sealed(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            cells: vec![GridCell::sealed(); dimensions.cell_count()],
        }
    }

    /// Carves a perfect maze with the recursive backtracker, starting from
    /// the start cell.
    pub fn generate<R: Rng + ?Sized>(dimensions: Dimensions, rng: &mut R) -> Self {
        let mut grid = Self::sealed(dimensions);
        let start = dimensions.start();
        grid.cell_mut(start).visited = true;
        let mut stack = vec![start];
        let mut carved = 0usize;

        while let Some(&current) = stack.last() {
            let candidates: Vec<(Direction, Coord)> = Direction::ALL
                .iter()
                .filter_map(|&dir| dimensions.neighbor(current, dir).map(|n| (dir, n)))
                .filter(|&(_, n)| !grid.cell(n).visited)
                .collect();

            if candidates.is_empty() {
                stack.pop();
                continue;
            }

            let (dir, next) = candidates[rng.gen_range(0..candidates.len())];
            grid.open(current, dir, next);
            grid.cell_mut(next).visited = true;
            stack.push(next);
            carved += 1;
        }

        debug!(
            width = dimensions.width(),
            height = dimensions.height(),
            carved,
            "generated maze"
        );
        grid
    }

    /// Removes the wall between `at` and its neighbor in `dir`.
    pub fn carve(&mut self, at: Coord, dir: Direction) -> Result<(), MazeError> {
        if !self.dimensions.contains(at) {
            return Err(MazeError::OutOfBounds { at });
        }
        let next = self
            .dimensions
            .neighbor(at, dir)
            .ok_or(MazeError::OutOfBounds { at })?;
        self.open(at, dir, next);
        Ok(())
    }

    fn open(&mut self, at: Coord, dir: Direction, next: Coord) {
        self.cell_mut(at).walls[dir.index()] = false;
        self.cell_mut(next).walls[dir.opposite().index()] = false;
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn start(&self) -> Coord {
        self.dimensions.start()
    }

    pub fn goal(&self) -> Coord {
        self.dimensions.goal()
    }

    pub(super) fn cell(&self, at: Coord) -> &GridCell {
        &self.cells[at.y * self.dimensions.width() + at.x]
    }

    pub(super) fn cell_mut(&mut self, at: Coord) -> &mut GridCell {
        let width = self.dimensions.width();
        &mut self.cells[at.y * width + at.x]
    }

    /// True wall values at `at`, or `None` outside the grid.
    pub(super) fn walls_at(&self, at: Coord) -> Option<[bool; DIRECTION_COUNT]> {
        self.dimensions.contains(at).then(|| self.cell(at).walls)
    }

    pub(super) fn is_open(&self, at: Coord, dir: Direction) -> bool {
        self.walls_at(at).is_some_and(|walls| !walls[dir.index()])
            && self.dimensions.neighbor(at, dir).is_some()
    }

    /// Whether every cell is reachable from the start and there are exactly
    /// `cells - 1` passages, i.e. the maze is a spanning tree.
    pub fn check_perfect(&self) -> bool {
        let dims = self.dimensions;
        let mut passages = 0usize;
        for at in dims.coords() {
            // count each passage once, from its west/north side
            for dir in [Direction::East, Direction::South] {
                if self.is_open(at, dir) {
                    passages += 1;
                }
            }
        }
        if passages + 1 != dims.cell_count() {
            return false;
        }

        let mut seen = vec![false; dims.cell_count()];
        let mut stack = vec![dims.start()];
        seen[0] = true;
        let mut reached = 1usize;
        while let Some(at) = stack.pop() {
            for dir in Direction::ALL {
                if !self.is_open(at, dir) {
                    continue;
                }
                let Some(next) = dims.neighbor(at, dir) else {
                    continue;
                };
                let Some(idx) = dims.index_of(next) else {
                    continue;
                };
                if !seen[idx] {
                    seen[idx] = true;
                    reached += 1;
                    stack.push(next);
                }
            }
        }
        reached == dims.cell_count()
    }

    pub fn is_reference_path(&self, at: Coord) -> bool {
        self.dimensions.contains(at) && self.cell(at).path_member
    }
}

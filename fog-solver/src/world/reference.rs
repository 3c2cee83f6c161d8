use tracing::debug;

use super::grid::Grid;
use crate::geometry::{Coord, Direction};

impl Grid {
    /// Full-information depth-first solve from start to goal. Marks the
    /// path on the grid cells for the comparison view and returns it.
    ///
    /// Walls are untouched; only the path flags change.
    pub fn solve_reference(&mut self) -> Option<Vec<Coord>> {
        let dims = self.dimensions();
        for at in dims.coords() {
            self.cell_mut(at).path_member = false;
        }

        let start = dims.start();
        let goal = dims.goal();
        let mut parent: Vec<Option<Coord>> = vec![None; dims.cell_count()];
        let mut seen = vec![false; dims.cell_count()];
        let mut stack = vec![start];
        seen[0] = true;

        let mut found = false;
        while let Some(at) = stack.pop() {
            if at == goal {
                found = true;
                break;
            }
            // reversed so North is popped first
            for &dir in Direction::ALL.iter().rev() {
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
                    parent[idx] = Some(at);
                    stack.push(next);
                }
            }
        }

        if !found {
            debug!("reference solver found no path");
            return None;
        }

        let mut path = vec![goal];
        let mut cursor = goal;
        while let Some(prev) = dims.index_of(cursor).and_then(|idx| parent[idx]) {
            path.push(prev);
            cursor = prev;
        }
        path.reverse();

        for &at in &path {
            self.cell_mut(at).path_member = true;
        }
        debug!(length = path.len(), "reference path marked");
        Some(path)
    }
}

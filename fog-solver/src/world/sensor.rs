use tracing::trace;

use super::grid::Grid;
use crate::error::MazeError;
use crate::geometry::{Coord, Direction};
use crate::knowledge::{KnowledgeMap, Observation};
use crate::sensor_trait::Sensor;

/// Sensor backed by the ground-truth grid. This is the only code outside
/// the grid itself that reads wall data on the agent's behalf.
pub struct GridSensor<'a> {
    grid: &'a Grid,
    calls: usize,
}

impl<'a> GridSensor<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid, calls: 0 }
    }

    /// Number of `sense` invocations so far, repeats included.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Sensor for GridSensor<'_> {
    fn sense(&mut self, at: Coord, knowledge: &mut KnowledgeMap) -> Result<(), MazeError> {
        let walls = self
            .grid
            .walls_at(at)
            .ok_or(MazeError::OutOfBounds { at })?;
        self.calls += 1;

        knowledge.ensure(at)?;
        knowledge.observe(at, Observation::Scanned)?;

        let dims = self.grid.dimensions();
        for dir in Direction::ALL {
            let wall = walls[dir.index()];
            knowledge.learn_wall(at, dir, wall)?;
            if wall {
                continue;
            }
            if let Some(next) = dims.neighbor(at, dir) {
                knowledge.ensure(next)?;
                knowledge.observe(next, Observation::Discovered)?;
            }
        }

        trace!(%at, ?walls, "sensed");
        Ok(())
    }
}
